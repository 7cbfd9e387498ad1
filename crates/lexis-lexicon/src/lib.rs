use lexis_types::{LookupKey, WordRecord};

mod free_dictionary;

pub use free_dictionary::{FreeDictionaryClient, parse_entries};

/// Lexical data provider interface
#[async_trait::async_trait]
pub trait Lexicon: Send + Sync {
    /// Look up a single word. `Ok(None)` means the provider has no entry for it.
    async fn lookup(&self, key: &LookupKey) -> Result<Option<WordRecord>, LexiconError>;

    /// Provider metadata
    fn provider(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub base_url: String,
    pub language: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Response is not JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Malformed word record: {0}")]
    MalformedRecord(#[source] serde_json::Error),
}
