use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_api_url() -> String {
    "https://api.dictionaryapi.dev/api/v2/entries/en/".to_string()
}

fn default_debounce_ms() -> u64 {
    500
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Base endpoint, the lookup key is appended to it
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Quiet period before a selection change triggers a lookup
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_url: default_api_url(),
            debounce_ms: default_debounce_ms(),
        }
    }
}
