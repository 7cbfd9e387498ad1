use std::sync::Arc;

use lexis_config::Config;
use lexis_knowledge::KnowledgeStore;
use lexis_lexicon::Lexicon;
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub lexicon: Arc<dyn Lexicon>,
    pub store: Arc<dyn KnowledgeStore>,
}

impl AppState {
    pub fn new(config: Config, lexicon: Arc<dyn Lexicon>, store: Arc<dyn KnowledgeStore>) -> Self {
        let provider = lexicon.provider();
        tracing::info!(
            "Dictionary: {} ({}) at {}",
            provider.name,
            provider.language,
            provider.base_url
        );

        Self {
            config: Arc::new(RwLock::new(config)),
            lexicon,
            store,
        }
    }
}
