use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::knowledge::KnowledgeConfig;
use self::ui::UiConfig;

pub mod dictionary;
pub mod knowledge;
pub mod ui;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown setting: {0}")]
    UnknownField(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("{0} is read at startup, restart to change it")]
    RequiresRestart(String),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub knowledge: KnowledgeConfig,
    pub ui: UiConfig,

    /// Clipboard poll interval
    pub delta_time: u64,
    /// Listen to websocket, if false use clipboard watcher
    pub listen_to_ws: bool,
    /// WebSocket URL to connect to
    pub ws_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: DictionaryConfig::default(),
            knowledge: KnowledgeConfig::default(),
            ui: UiConfig::default(),

            delta_time: 500,
            listen_to_ws: false,
            ws_url: "ws://localhost:8080".to_string(),
        }
    }
}

impl Config {
    /// Defaults with overrides from the process environment
    pub fn new() -> Self {
        Self::from_env(|key| env::var(key).ok())
    }

    pub fn from_env(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();

        if let Some(url) = lookup("LEXIS_DICTIONARY_URL") {
            config.dictionary.api_url = url;
        }

        if let Some(ms) = lookup("LEXIS_DEBOUNCE_MS").and_then(|v| v.parse().ok()) {
            config.dictionary.debounce_ms = ms;
        }

        if let Some(root) = lookup("LEXIS_ROOT_NODE") {
            config.knowledge.root_node_name = root;
        }

        if let Some(url) = lookup("LEXIS_STORE_URL") {
            config.knowledge.store_url = url;
        }

        if let Some(ms) = lookup("DELTA_TIME_MS").and_then(|v| v.parse().ok()) {
            config.delta_time = ms;
        }

        if let Some(url) = lookup("WS_URL") {
            config.ws_url = url;
        }

        config
    }

    /// Applies a runtime settings change addressed by dotted field name.
    /// Fields that only take effect at startup are rejected and left unchanged.
    pub fn apply_update(&mut self, field: &str, value: &str) -> Result<(), ConfigError> {
        match field {
            "dictionary.enabled" => self.dictionary.enabled = parse(field, value)?,
            // "dictionary root" is the settings id the editor plugin registers
            "knowledge.root_node_name" | "dictionary root" => {
                self.knowledge.root_node_name = value.trim().to_string()
            }
            "knowledge.word_template" => self.knowledge.word_template = value.to_string(),
            "knowledge.definition_template" => {
                self.knowledge.definition_template = value.to_string()
            }
            "ui.show_examples" => self.ui.show_examples = parse(field, value)?,
            "dictionary.api_url" | "dictionary.debounce_ms" | "knowledge.store_url"
            | "delta_time" | "listen_to_ws" | "ws_url" => {
                return Err(ConfigError::RequiresRestart(field.to_string()));
            }
            _ => return Err(ConfigError::UnknownField(field.to_string())),
        }

        Ok(())
    }
}

fn parse<T: FromStr>(field: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults_leave_root_unconfigured() {
        let config = Config::default();
        assert!(!config.knowledge.root_configured());
        assert_eq!(config.dictionary.debounce_ms, 500);
        assert!(config.dictionary.api_url.ends_with("/entries/en/"));
    }

    #[test]
    fn env_overrides_defaults() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("LEXIS_ROOT_NODE", "Vocab"),
            ("LEXIS_DEBOUNCE_MS", "250"),
            ("DELTA_TIME_MS", "not a number"),
        ]);

        let config = Config::from_env(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.knowledge.root_node_name, "Vocab");
        assert_eq!(config.dictionary.debounce_ms, 250);
        assert_eq!(config.delta_time, 500);
    }

    #[test]
    fn apply_update_sets_known_fields() {
        let mut config = Config::default();
        config.apply_update("dictionary root", "  Vocab ").unwrap();
        config.apply_update("ui.show_examples", "false").unwrap();

        assert_eq!(config.knowledge.root_node_name, "Vocab");
        assert!(!config.ui.show_examples);
    }

    #[test]
    fn apply_update_rejects_bad_input() {
        let mut config = Config::default();
        assert!(matches!(
            config.apply_update("nope", "1"),
            Err(ConfigError::UnknownField(_))
        ));
        assert!(matches!(
            config.apply_update("ui.show_examples", "soon"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(config.ui.show_examples);
    }

    #[test]
    fn apply_update_rejects_startup_only_fields() {
        let mut config = Config::default();
        for field in [
            "dictionary.api_url",
            "dictionary.debounce_ms",
            "knowledge.store_url",
            "delta_time",
            "listen_to_ws",
            "ws_url",
        ] {
            assert!(matches!(
                config.apply_update(field, "1"),
                Err(ConfigError::RequiresRestart(f)) if f == field
            ));
        }
        assert_eq!(config.dictionary.debounce_ms, 500);
        assert_eq!(config.delta_time, 500);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"knowledge": {"root_node_name": "Words"}}"#).unwrap();
        assert_eq!(config.knowledge.root_node_name, "Words");
        assert_eq!(config.knowledge.word_template, "{word}");
        assert!(config.dictionary.enabled);
    }
}
