use serde::{Deserialize, Serialize};

fn default_store_url() -> String {
    "http://localhost:8766".to_string()
}

fn default_word_template() -> String {
    "{word}".to_string()
}

fn default_definition_template() -> String {
    "{definition}".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct KnowledgeConfig {
    /// Name of the node new words are attached under. Empty means unconfigured.
    pub root_node_name: String,
    /// Knowledge store connect endpoint
    #[serde(default = "default_store_url")]
    pub store_url: String,
    #[serde(default = "default_word_template")]
    pub word_template: String,
    #[serde(default = "default_definition_template")]
    pub definition_template: String,
}

impl KnowledgeConfig {
    pub fn root_configured(&self) -> bool {
        !self.root_node_name.trim().is_empty()
    }
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            root_node_name: String::new(),
            store_url: default_store_url(),
            word_template: default_word_template(),
            definition_template: default_definition_template(),
        }
    }
}
