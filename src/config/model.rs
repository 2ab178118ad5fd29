//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the application works out of the box.

use crate::ledger::Operation;
use serde::{Deserialize, Serialize};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_ledgers")]
    pub ledgers: Vec<LedgerConfig>,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub journal: JournalConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ledgers: default_ledgers(),
            ui: UiConfig::default(),
            journal: JournalConfig::default(),
            diagnostics: DiagnosticsConfig::default(),
        }
    }
}

fn default_ledgers() -> Vec<LedgerConfig> {
    vec![LedgerConfig {
        name: "scratch".into(),
        auto_open: true,
        script: vec![],
    }]
}

/// A named ledger that can be opened at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub name: String,
    #[serde(default = "default_true")]
    pub auto_open: bool,
    /// Steps applied right after opening. Values go through the same
    /// validation as typed input.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub script: Vec<ScriptStep>,
}

/// One scripted mutation. `value` is kept as a raw TOML value so that a
/// non-numeric entry is reported as a rejected step instead of failing the
/// whole config parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub op: Operation,
    pub value: toml::Value,
}

/// UI appearance settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    #[serde(default = "default_max_scrollback")]
    pub max_scrollback: usize,
    /// Maximum decimals shown for totals. `None` prints full precision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<usize>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
            max_scrollback: default_max_scrollback(),
            precision: None,
        }
    }
}

/// Per-ledger journal files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_journal_dir")]
    pub dir: String,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: default_journal_dir(),
        }
    }
}

/// Diagnostic tracing output. Written to a file because the terminal is
/// owned by the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_diagnostics_file")]
    pub file: String,
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            file: default_diagnostics_file(),
            level: default_level(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_timestamp_format() -> String {
    "%H:%M:%S".to_string()
}
fn default_max_scrollback() -> usize {
    10000
}
fn default_journal_dir() -> String {
    "~/.local/share/tally/journal".to_string()
}
fn default_diagnostics_file() -> String {
    "~/.local/share/tally/tally.log".to_string()
}
fn default_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.ledgers.len(), 1);
        assert_eq!(config.ledgers[0].name, "scratch");
        assert!(config.ledgers[0].auto_open);
        assert_eq!(config.ui.max_scrollback, 10000);
        assert_eq!(config.ui.precision, None);
        assert!(!config.journal.enabled);
        assert_eq!(config.diagnostics.level, "info");
    }

    #[test]
    fn test_script_keeps_raw_values() {
        let config: AppConfig = toml::from_str(
            r#"
            [[ledgers]]
            name = "demo"
            script = [ { op = "add", value = 5 }, { op = "divide", value = "x" } ]

            [ui]
            precision = 2
            "#,
        )
        .unwrap();
        let demo = &config.ledgers[0];
        assert!(demo.auto_open);
        assert_eq!(demo.script[0].op, Operation::Add);
        assert_eq!(demo.script[0].value, toml::Value::Integer(5));
        assert_eq!(demo.script[1].value, toml::Value::String("x".into()));
        assert_eq!(config.ui.precision, Some(2));
        assert_eq!(config.ui.timestamp_format, "%H:%M:%S");
    }

    #[test]
    fn test_unknown_operation_is_a_parse_error() {
        let parsed: Result<AppConfig, _> = toml::from_str(
            r#"
            [[ledgers]]
            name = "demo"
            script = [ { op = "modulo", value = 5 } ]
            "#,
        );
        assert!(parsed.is_err());
    }
}
