//! Operands arriving from outside the type system.
//!
//! Typed callers hand the accumulator an `f64` directly. Text typed into the
//! input line and values decoded from the config file arrive as [`Operand`]
//! instead, and must pass [`Operand::number`] before any mutation happens.

use crate::ledger::error::LedgerError;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Number(f64),
    Text(String),
    Boolean(bool),
    /// No operand was given at all (e.g. `/add` on its own).
    Missing,
    /// Any other decoded value (arrays, tables, dates), kept in display form.
    Other(String),
}

impl Operand {
    /// Decode one operand typed by the user.
    ///
    /// Anything Rust's float grammar accepts is a number, including `inf`
    /// and `NaN`. Everything else is text.
    pub fn from_input(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Operand::Missing;
        }
        match raw.parse::<f64>() {
            Ok(n) => Operand::Number(n),
            Err(_) => Operand::Text(raw.to_string()),
        }
    }

    /// The numeric check every mutation runs before touching state.
    pub fn number(&self) -> Result<f64, LedgerError> {
        match self {
            Operand::Number(n) => Ok(*n),
            other => Err(LedgerError::InvalidArgument {
                value: other.to_string(),
            }),
        }
    }
}

impl From<f64> for Operand {
    fn from(n: f64) -> Self {
        Operand::Number(n)
    }
}

/// Config values keep their TOML type: a quoted `"5"` is a string, not a
/// number, and is rejected.
impl From<&toml::Value> for Operand {
    fn from(value: &toml::Value) -> Self {
        match value {
            toml::Value::Integer(i) => Operand::Number(*i as f64),
            toml::Value::Float(f) => Operand::Number(*f),
            toml::Value::String(s) => Operand::Text(s.clone()),
            toml::Value::Boolean(b) => Operand::Boolean(*b),
            other => Operand::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Number(n) => write!(f, "{}", n),
            Operand::Text(s) => write!(f, "\"{}\"", s),
            Operand::Boolean(b) => write!(f, "{}", b),
            Operand::Missing => f.write_str("<missing>"),
            Operand::Other(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input() {
        assert_eq!(Operand::from_input(" 5 "), Operand::Number(5.0));
        assert_eq!(Operand::from_input("-2.5"), Operand::Number(-2.5));
        assert_eq!(Operand::from_input("1e3"), Operand::Number(1000.0));
        assert_eq!(Operand::from_input("x"), Operand::Text("x".into()));
        assert_eq!(Operand::from_input("5 apples"), Operand::Text("5 apples".into()));
        assert_eq!(Operand::from_input("   "), Operand::Missing);
        assert!(matches!(Operand::from_input("NaN"), Operand::Number(n) if n.is_nan()));
        assert_eq!(Operand::from_input("inf"), Operand::Number(f64::INFINITY));
    }

    #[test]
    fn test_number_rejects_non_numeric() {
        assert_eq!(Operand::Number(3.0).number(), Ok(3.0));
        assert_eq!(
            Operand::Text("x".into()).number(),
            Err(LedgerError::InvalidArgument { value: "\"x\"".into() })
        );
        assert_eq!(
            Operand::Text("5".into()).number().unwrap_err().to_string(),
            "\"5\" must be a number"
        );
        assert_eq!(
            Operand::Missing.number().unwrap_err().to_string(),
            "<missing> must be a number"
        );
        assert_eq!(
            Operand::Boolean(true).number().unwrap_err().to_string(),
            "true must be a number"
        );
    }

    #[test]
    fn test_from_toml_value_keeps_types() {
        let doc: toml::Table = toml::from_str(
            r#"
            int = 5
            float = 2.5
            quoted = "5"
            flag = false
            list = [1, 2]
            "#,
        )
        .unwrap();
        assert_eq!(Operand::from(&doc["int"]), Operand::Number(5.0));
        assert_eq!(Operand::from(&doc["float"]), Operand::Number(2.5));
        assert_eq!(Operand::from(&doc["quoted"]), Operand::Text("5".into()));
        assert_eq!(Operand::from(&doc["flag"]), Operand::Boolean(false));
        assert!(matches!(Operand::from(&doc["list"]), Operand::Other(_)));
        assert!(Operand::from(&doc["quoted"]).number().is_err());
    }
}
