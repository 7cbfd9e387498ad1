use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use lexis_config::Config;

/// Load a JSON config file, or defaults with environment overrides when none is given
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::new());
    };

    tracing::info!("Loading config from {}", path.display());
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let config = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

/// Write the default config so it can be edited and passed back with `--config`
pub fn write_default_config(path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    fs::write(path, serde_json::to_string_pretty(&Config::default())?)?;
    tracing::info!("Wrote default config to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_defaults_load_back() {
        let dir = std::env::temp_dir().join(format!("lexis-profile-{}", std::process::id()));
        let path = dir.join("config.json");

        write_default_config(&path).unwrap();
        let config = load_config(Some(&path)).unwrap();

        assert_eq!(config.dictionary.debounce_ms, 500);
        assert!(!config.knowledge.root_configured());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let path = std::env::temp_dir().join(format!("lexis-partial-{}.json", std::process::id()));
        fs::write(&path, r#"{"knowledge": {"root_node_name": "Vocab"}}"#).unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.knowledge.root_node_name, "Vocab");
        assert_eq!(config.ws_url, "ws://localhost:8080");

        fs::remove_file(path).unwrap();
    }
}
