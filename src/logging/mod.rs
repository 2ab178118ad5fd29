//! Ledger journals and diagnostic tracing.
//!
//! When enabled, the journal appends every entry, total and rejection to a
//! daily file per ledger, named `<ledger>_<date>.log` and stored in the
//! configured journal directory (default: `~/.local/share/tally/journal/`).
//! Journals are an audit trail only and are never read back.
//!
//! Diagnostics go through `tracing` to a separate file, since the terminal
//! belongs to the UI.

use crate::app::state::{Message, MessageKind};
use crate::config::model::{DiagnosticsConfig, JournalConfig};
use crate::config::expand_home;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// Install the file-backed tracing subscriber. Does nothing when
/// diagnostics are disabled.
pub fn init_tracing(config: &DiagnosticsConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }
    let level: tracing::Level = config
        .level
        .parse()
        .with_context(|| format!("Invalid diagnostics level '{}'", config.level))?;

    let path = expand_home(&config.file);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_max_level(level)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(path = %path.display(), %level, "diagnostics initialized");
    Ok(())
}

/// Writes ledger messages to per-ledger daily journal files.
///
/// File handles are cached for the lifetime of the journal. A file that
/// cannot be opened is reported once and its messages are dropped.
pub struct LedgerJournal {
    enabled: bool,
    dir: PathBuf,
    file_handles: HashMap<String, Option<File>>,
}

impl LedgerJournal {
    pub fn new(config: &JournalConfig) -> Self {
        Self {
            enabled: config.enabled,
            dir: expand_home(&config.dir),
            file_handles: HashMap::new(),
        }
    }

    /// Append one message to `ledger`'s journal for today.
    pub fn record(&mut self, ledger: &str, msg: &Message) {
        if !self.enabled {
            return;
        }
        let date = chrono::Local::now().format("%Y-%m-%d").to_string();
        let filename = format!("{}_{}.log", sanitize_name(ledger), date);

        let dir = &self.dir;
        let handle = self.file_handles.entry(filename.clone()).or_insert_with(|| {
            let path = dir.join(&filename);
            let opened = fs::create_dir_all(dir).and_then(|_| {
                OpenOptions::new().create(true).append(true).open(&path)
            });
            match opened {
                Ok(file) => Some(file),
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "cannot open journal file");
                    None
                }
            }
        });

        if let Some(file) = handle {
            if let Err(error) = writeln!(file, "{}", format_line(msg)) {
                tracing::warn!(%error, ledger, "journal write failed");
            }
        }
    }
}

fn format_line(msg: &Message) -> String {
    match msg.kind {
        MessageKind::Entry => format!("[{}] {} {}", msg.timestamp, msg.sender, msg.text),
        MessageKind::Total => format!("[{}] = {}", msg.timestamp, msg.text),
        MessageKind::System => format!("[{}] *** {}", msg.timestamp, msg.text),
        MessageKind::Error => format!("[{}] !!! {}", msg.timestamp, msg.text),
    }
}

/// Keep a ledger name safe to use as a file name.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' { c } else { '_' })
        .collect::<String>()
        .trim_start_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(kind: MessageKind, sender: &str, text: &str) -> Message {
        Message {
            timestamp: "12:00:00".into(),
            sender: sender.into(),
            text: text.into(),
            kind,
        }
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("rent"), "rent");
        assert_eq!(sanitize_name("../../etc/passwd"), "_.._etc_passwd");
        assert_eq!(sanitize_name("my budget"), "my_budget");
        assert_eq!(sanitize_name(".hidden"), "hidden");
    }

    #[test]
    fn test_format_line() {
        assert_eq!(
            format_line(&msg(MessageKind::Entry, "+", "add 5    0 + 5 = 5")),
            "[12:00:00] + add 5    0 + 5 = 5"
        );
        assert_eq!(
            format_line(&msg(MessageKind::Error, "!!!", "add rejected")),
            "[12:00:00] !!! add rejected"
        );
    }

    #[test]
    fn test_journal_appends_per_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let config = JournalConfig {
            enabled: true,
            dir: dir.path().join("journal").display().to_string(),
        };
        let mut journal = LedgerJournal::new(&config);
        journal.record("rent", &msg(MessageKind::Entry, "+", "add 5    0 + 5 = 5"));
        journal.record("rent", &msg(MessageKind::Total, "=", "total = 5"));
        journal.record("food", &msg(MessageKind::System, "***", "opened"));

        let date = chrono::Local::now().format("%Y-%m-%d").to_string();
        let rent = fs::read_to_string(dir.path().join("journal").join(format!("rent_{}.log", date))).unwrap();
        assert_eq!(rent.lines().count(), 2);
        assert!(rent.ends_with("[12:00:00] = total = 5\n"));
        assert!(dir.path().join("journal").join(format!("food_{}.log", date)).exists());
    }

    #[test]
    fn test_disabled_journal_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = JournalConfig {
            enabled: false,
            dir: dir.path().display().to_string(),
        };
        let mut journal = LedgerJournal::new(&config);
        journal.record("rent", &msg(MessageKind::Entry, "+", "add 1"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
