//! Ledger core: the accumulator, its operations, operand validation, and the
//! manager that owns every open accumulator.

pub mod accumulator;
pub mod commands;
pub mod error;
pub mod manager;
pub mod operand;
pub mod operation;

pub use accumulator::{format_number, Accumulator, Entry};
pub use error::LedgerError;
pub use operand::Operand;
pub use operation::Operation;
