use async_trait::async_trait;
use lexis_types::{LookupKey, WordRecord};

use crate::{Lexicon, LexiconError, ProviderMetadata};

/// Client for the dictionaryapi.dev entries endpoint
#[derive(Clone)]
pub struct FreeDictionaryClient {
    client: reqwest::Client,
    base_url: String,
}

impl FreeDictionaryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Self { client, base_url }
    }

    pub fn request_url(&self, key: &LookupKey) -> String {
        format!("{}{}", self.base_url, key)
    }
}

#[async_trait]
impl Lexicon for FreeDictionaryClient {
    async fn lookup(&self, key: &LookupKey) -> Result<Option<WordRecord>, LexiconError> {
        let url = self.request_url(key);
        tracing::debug!("[LEXICON] GET {}", url);

        let response = self.client.get(&url).send().await?;

        // Unknown words come back as a 404 with a JSON object body, which parses to None
        let status = response.status();
        if !status.is_success() {
            tracing::debug!("[LEXICON] '{}' answered HTTP {}", key, status);
        }

        let body = response.text().await?;
        parse_entries(&body)
    }

    fn provider(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Free Dictionary API".to_string(),
            base_url: self.base_url.clone(),
            language: "en".to_string(),
        }
    }
}

/// Takes the first entry of a JSON array body. Non-arrays and empty arrays are `None`.
pub fn parse_entries(body: &str) -> Result<Option<WordRecord>, LexiconError> {
    let json: serde_json::Value = serde_json::from_str(body).map_err(LexiconError::InvalidJson)?;

    let Some(first) = json.as_array().and_then(|entries| entries.first()) else {
        return Ok(None);
    };

    serde_json::from_value(first.clone())
        .map(Some)
        .map_err(LexiconError::MalformedRecord)
}
