use crate::app::event::LedgerId;
use crate::ledger::{Operand, Operation};

#[derive(Debug)]
pub enum Action {
    OpenLedger { name: String },
    CloseLedger { ledger_id: LedgerId },
    Apply { ledger_id: LedgerId, operation: Operation, operand: Operand },
    QueryTotal { ledger_id: LedgerId },
    KeepLedger { name: String },
    Quit,
}
