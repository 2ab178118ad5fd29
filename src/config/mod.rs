pub mod model;
pub mod naming;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub use model::AppConfig;
use model::LedgerConfig;

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tally")
        .join("config.toml")
}

pub fn load_config() -> Result<AppConfig> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}

pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }
    let contents = toml::to_string_pretty(config).with_context(|| "Failed to serialize config")?;
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    Ok(())
}

/// Add `name` to the ledgers opened at startup and write the config to
/// `path`. If the write fails the in-memory config is left as it was.
pub fn keep_ledger(config: &mut AppConfig, name: &str, path: &Path) -> Result<()> {
    config.ledgers.push(LedgerConfig {
        name: name.to_string(),
        auto_open: true,
        script: vec![],
    });
    if let Err(e) = save_config_to(config, path) {
        config.ledgers.pop();
        return Err(e);
    }
    tracing::info!(name, path = %path.display(), "ledger kept");
    Ok(())
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Operation;
    use model::ScriptStep;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.ledgers[0].name, "scratch");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.ledgers.push(LedgerConfig {
            name: "rent".into(),
            auto_open: true,
            script: vec![ScriptStep {
                op: Operation::Subtract,
                value: toml::Value::Float(12.5),
            }],
        });
        config.ui.precision = Some(2);
        save_config_to(&config, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.ledgers.len(), 2);
        assert_eq!(loaded.ledgers[1].name, "rent");
        assert_eq!(loaded.ledgers[1].script, config.ledgers[1].script);
        assert_eq!(loaded.ui.precision, Some(2));
    }

    #[test]
    fn test_bad_toml_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "ledgers = 5").unwrap();
        let err = load_config_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("config.toml"));
    }

    #[test]
    fn test_keep_ledger_persists_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = AppConfig::default();
        keep_ledger(&mut config, "rent", &path).unwrap();

        assert_eq!(config.ledgers.len(), 2);
        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.ledgers[1].name, "rent");
        assert!(loaded.ledgers[1].auto_open);
        assert!(loaded.ledgers[1].script.is_empty());
    }

    #[test]
    fn test_keep_ledger_rolls_back_on_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the config directory should be
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let path = blocker.join("config.toml");

        let mut config = AppConfig::default();
        let err = keep_ledger(&mut config, "rent", &path).unwrap_err();
        assert!(format!("{:#}", err).contains("not-a-dir"));
        assert_eq!(config.ledgers.len(), 1);
        assert_eq!(config.ledgers[0].name, "scratch");
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/tmp/x"), PathBuf::from("/tmp/x"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/logs"), home.join("logs"));
        }
    }
}
