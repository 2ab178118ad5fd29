use crate::ledger::{Entry, LedgerError, Operation};
use crossterm::event::Event as CrosstermEvent;

pub type LedgerId = usize;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// A mutation passed validation and was applied
    EntryApplied {
        ledger_id: LedgerId,
        entry: Entry,
    },

    /// A mutation was refused; the total did not move
    EntryRejected {
        ledger_id: LedgerId,
        operation: Operation,
        error: LedgerError,
    },

    TotalReported {
        ledger_id: LedgerId,
        total: f64,
    },

    /// Tick for UI refresh
    Tick,
}
