//! The four arithmetic mutations an accumulator accepts.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    /// Apply this operation to `total` with operand `x`.
    ///
    /// Division by zero follows IEEE 754: the result is infinite or NaN.
    pub fn apply(self, total: f64, x: f64) -> f64 {
        match self {
            Operation::Add => total + x,
            Operation::Subtract => total - x,
            Operation::Multiply => total * x,
            Operation::Divide => total / x,
        }
    }

    /// Resolve a verb or symbol (`add`, `+`, `times`, `÷`, ...).
    /// Case-insensitive.
    pub fn from_word(word: &str) -> Option<Self> {
        match word.trim().to_lowercase().as_str() {
            "add" | "+" | "plus" => Some(Operation::Add),
            "sub" | "subtract" | "-" | "minus" => Some(Operation::Subtract),
            "mul" | "multiply" | "*" | "×" | "x" | "times" => Some(Operation::Multiply),
            "div" | "divide" | "÷" | "over" => Some(Operation::Divide),
            _ => None,
        }
    }

    /// Resolve a leading symbol character, used for bare input like `*4`.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operation::Add),
            '-' => Some(Operation::Subtract),
            '*' | '×' => Some(Operation::Multiply),
            '÷' => Some(Operation::Divide),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "×",
            Operation::Divide => "÷",
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_word_aliases() {
        assert_eq!(Operation::from_word("ADD"), Some(Operation::Add));
        assert_eq!(Operation::from_word("minus"), Some(Operation::Subtract));
        assert_eq!(Operation::from_word("x"), Some(Operation::Multiply));
        assert_eq!(Operation::from_word("÷"), Some(Operation::Divide));
        assert_eq!(Operation::from_word("modulo"), None);
    }

    #[test]
    fn test_apply_arithmetic() {
        assert_eq!(Operation::Add.apply(5.0, 2.0), 7.0);
        assert_eq!(Operation::Subtract.apply(5.0, 2.0), 3.0);
        assert_eq!(Operation::Multiply.apply(5.0, 2.0), 10.0);
        assert_eq!(Operation::Divide.apply(5.0, 2.0), 2.5);
        assert!(Operation::Divide.apply(0.0, 0.0).is_nan());
    }

    #[test]
    fn test_serde_names_are_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            op: Operation,
        }
        let w: Wrapper = toml::from_str(r#"op = "multiply""#).unwrap();
        assert_eq!(w.op, Operation::Multiply);
        assert!(toml::from_str::<Wrapper>(r#"op = "Multiply""#).is_err());
    }
}
