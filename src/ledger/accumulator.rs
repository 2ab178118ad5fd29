//! The accumulator: a single running total with validated mutations.
//!
//! The total is private to this module. The only way to change it is one of
//! the four mutations, and the dynamic entry point [`Accumulator::apply_operand`]
//! validates its operand before anything is written.

use crate::ledger::error::LedgerError;
use crate::ledger::operand::Operand;
use crate::ledger::operation::Operation;
use std::fmt;

#[derive(Debug, Default, PartialEq)]
pub struct Accumulator {
    total: f64,
}

impl Accumulator {
    /// A fresh accumulator with a total of zero.
    pub fn new() -> Self {
        Self { total: 0.0 }
    }

    pub fn add(&mut self, x: f64) {
        self.total = Operation::Add.apply(self.total, x);
    }

    pub fn subtract(&mut self, x: f64) {
        self.total = Operation::Subtract.apply(self.total, x);
    }

    pub fn multiply(&mut self, x: f64) {
        self.total = Operation::Multiply.apply(self.total, x);
    }

    /// Divide the total by `x`. Dividing by zero is allowed and leaves an
    /// infinite or NaN total.
    pub fn divide(&mut self, x: f64) {
        self.total = Operation::Divide.apply(self.total, x);
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn apply(&mut self, op: Operation, x: f64) {
        match op {
            Operation::Add => self.add(x),
            Operation::Subtract => self.subtract(x),
            Operation::Multiply => self.multiply(x),
            Operation::Divide => self.divide(x),
        }
    }

    /// Validate `operand`, then apply it.
    ///
    /// On `Err` the total is exactly what it was before the call.
    pub fn apply_operand(&mut self, op: Operation, operand: &Operand) -> Result<Entry, LedgerError> {
        let x = operand.number()?;
        let before = self.total;
        self.apply(op, x);
        Ok(Entry {
            operation: op,
            operand: x,
            before,
            after: self.total,
        })
    }
}

/// One applied mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    pub operation: Operation,
    pub operand: f64,
    pub before: f64,
    pub after: f64,
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} → {}",
            self.operation,
            format_number(self.operand, None),
            format_number(self.after, None)
        )
    }
}

/// Render a total for display.
///
/// With a precision, finite values are rounded to at most that many decimals
/// and trailing zeros are dropped. Non-finite values always render as
/// `inf`, `-inf` or `NaN`.
pub fn format_number(x: f64, precision: Option<usize>) -> String {
    match precision {
        Some(p) if x.is_finite() => {
            let s = format!("{:.*}", p, x);
            let s = if s.contains('.') {
                s.trim_end_matches('0').trim_end_matches('.').to_string()
            } else {
                s
            };
            if s == "-0" {
                "0".to_string()
            } else {
                s
            }
        }
        _ => format!("{}", x),
    }
}
