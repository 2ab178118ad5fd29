use thiserror::Error;

/// Errors raised by accumulator mutations at the dynamic boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// The operand was not a number. The accumulator was left untouched.
    #[error("{value} must be a number")]
    InvalidArgument { value: String },
}
