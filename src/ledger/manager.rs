use crate::app::event::{AppEvent, LedgerId};
use crate::config::model::ScriptStep;
use crate::ledger::{Accumulator, Operand, Operation};
use anyhow::Result;
use std::collections::HashMap;

/// Sole owner of every open accumulator.
///
/// Results come back as [`AppEvent`]s so the handler updates state the same
/// way for typed-in commands and configured startup scripts. They are
/// returned to the caller rather than queued, so an entry is always recorded
/// before any later input for the same ledger is handled.
#[derive(Default)]
pub struct LedgerManager {
    accumulators: HashMap<LedgerId, Accumulator>,
}

impl LedgerManager {
    pub fn new() -> Self {
        Self {
            accumulators: HashMap::new(),
        }
    }

    pub fn open(&mut self, ledger_id: LedgerId) -> Result<()> {
        if self.accumulators.contains_key(&ledger_id) {
            anyhow::bail!("Ledger {} is already open", ledger_id);
        }
        self.accumulators.insert(ledger_id, Accumulator::new());
        tracing::debug!(ledger_id, "ledger opened");
        Ok(())
    }

    /// Drop a ledger's accumulator and return its final total.
    pub fn close(&mut self, ledger_id: LedgerId) -> Result<f64> {
        let acc = self
            .accumulators
            .remove(&ledger_id)
            .ok_or_else(|| anyhow::anyhow!("Ledger {} is not open", ledger_id))?;
        tracing::debug!(ledger_id, total = acc.total(), "ledger closed");
        Ok(acc.total())
    }

    /// Validate and apply one mutation.
    ///
    /// A rejected operand is not an `Err` here: it comes back as
    /// [`AppEvent::EntryRejected`]. `Err` means the ledger does not exist.
    pub fn apply(&mut self, ledger_id: LedgerId, operation: Operation, operand: &Operand) -> Result<AppEvent> {
        let acc = self
            .accumulators
            .get_mut(&ledger_id)
            .ok_or_else(|| anyhow::anyhow!("Ledger {} is not open", ledger_id))?;

        let event = match acc.apply_operand(operation, operand) {
            Ok(entry) => {
                tracing::debug!(ledger_id, %entry, "entry applied");
                AppEvent::EntryApplied { ledger_id, entry }
            }
            Err(error) => {
                tracing::warn!(ledger_id, %operation, %error, "entry rejected");
                AppEvent::EntryRejected {
                    ledger_id,
                    operation,
                    error,
                }
            }
        };
        Ok(event)
    }

    pub fn report_total(&self, ledger_id: LedgerId) -> Result<AppEvent> {
        let total = self
            .total(ledger_id)
            .ok_or_else(|| anyhow::anyhow!("Ledger {} is not open", ledger_id))?;
        Ok(AppEvent::TotalReported { ledger_id, total })
    }

    pub fn total(&self, ledger_id: LedgerId) -> Option<f64> {
        self.accumulators.get(&ledger_id).map(Accumulator::total)
    }

    /// Apply configured steps in order. Rejected steps are reported and
    /// skipped; the rest of the script still runs.
    pub fn run_script(&mut self, ledger_id: LedgerId, steps: &[ScriptStep]) -> Result<Vec<AppEvent>> {
        steps
            .iter()
            .map(|step| self.apply(ledger_id, step.op, &Operand::from(&step.value)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LedgerError;

    #[test]
    fn test_open_twice_fails() {
        let mut mgr = LedgerManager::new();
        mgr.open(0).unwrap();
        assert!(mgr.open(0).is_err());
        assert_eq!(mgr.total(0), Some(0.0));
    }

    #[test]
    fn test_apply_reports_entry() {
        let mut mgr = LedgerManager::new();
        mgr.open(1).unwrap();
        match mgr.apply(1, Operation::Add, &Operand::Number(5.0)).unwrap() {
            AppEvent::EntryApplied { ledger_id, entry } => {
                assert_eq!(ledger_id, 1);
                assert_eq!(entry.after, 5.0);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_rejection_is_an_event_not_an_error() {
        let mut mgr = LedgerManager::new();
        mgr.open(1).unwrap();
        match mgr.apply(1, Operation::Add, &Operand::Text("x".into())).unwrap() {
            AppEvent::EntryRejected { error, operation, .. } => {
                assert_eq!(operation, Operation::Add);
                assert_eq!(error, LedgerError::InvalidArgument { value: "\"x\"".into() });
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(mgr.total(1), Some(0.0));
    }

    #[test]
    fn test_ledgers_are_independent() {
        let mut mgr = LedgerManager::new();
        mgr.open(1).unwrap();
        mgr.open(2).unwrap();
        mgr.apply(1, Operation::Add, &Operand::Number(9.0)).unwrap();
        mgr.apply(1, Operation::Multiply, &Operand::Number(3.0)).unwrap();
        assert_eq!(mgr.total(1), Some(27.0));
        assert_eq!(mgr.total(2), Some(0.0));
    }

    #[test]
    fn test_unknown_ledger_is_an_error() {
        let mut mgr = LedgerManager::new();
        assert!(mgr.apply(7, Operation::Add, &Operand::Number(1.0)).is_err());
        assert!(mgr.report_total(7).is_err());
        assert!(mgr.close(7).is_err());
    }

    #[test]
    fn test_close_returns_final_total() {
        let mut mgr = LedgerManager::new();
        mgr.open(4).unwrap();
        mgr.apply(4, Operation::Add, &Operand::Number(5.0)).unwrap();
        assert_eq!(mgr.close(4).unwrap(), 5.0);
        assert_eq!(mgr.total(4), None);
        assert!(mgr.close(4).is_err());
    }

    #[test]
    fn test_run_script_continues_past_rejections() {
        let mut mgr = LedgerManager::new();
        mgr.open(3).unwrap();
        #[derive(serde::Deserialize)]
        struct Script {
            steps: Vec<ScriptStep>,
        }
        let script: Script = toml::from_str(
            r#"
            steps = [
                { op = "add", value = 5 },
                { op = "add", value = "x" },
                { op = "subtract", value = 2 },
                { op = "multiply", value = 4 },
                { op = "divide", value = 2 },
                { op = "add", value = 10.0 },
            ]
            "#,
        )
        .unwrap();

        let events = mgr.run_script(3, &script.steps).unwrap();
        assert_eq!(mgr.total(3), Some(16.0));

        let applied = events
            .iter()
            .filter(|e| matches!(e, AppEvent::EntryApplied { .. }))
            .count();
        let rejected = events
            .iter()
            .filter(|e| matches!(e, AppEvent::EntryRejected { .. }))
            .count();
        assert_eq!((applied, rejected), (5, 1));
    }

    #[test]
    fn test_report_total() {
        let mut mgr = LedgerManager::new();
        mgr.open(0).unwrap();
        mgr.apply(0, Operation::Divide, &Operand::Number(0.0)).unwrap();
        match mgr.report_total(0).unwrap() {
            AppEvent::TotalReported { total, .. } => assert!(total.is_nan()),
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
