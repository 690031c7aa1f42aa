//! Values a step may hand to the orchestrator.
//!
//! Output and state values arrive as strings, booleans, or numbers. Rather
//! than coercing implicitly, the accepted set is a closed sum with one
//! explicit stringification rule per variant.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A value destined for a command line (`set-output`, `save-state`,
/// `set-env`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandValue {
    /// Emitted verbatim (escaping happens at the command layer)
    String(String),

    /// Emitted as the lowercase literal `true` / `false`
    Bool(bool),

    /// Emitted in canonical decimal form (`1.0` renders as `1`)
    Number(f64),
}

impl fmt::Display for CommandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for CommandValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for CommandValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for CommandValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for CommandValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for CommandValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u32> for CommandValue {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_renders_lowercase() {
        assert_eq!(CommandValue::from(true).to_string(), "true");
        assert_eq!(CommandValue::from(false).to_string(), "false");
    }

    #[test]
    fn test_number_canonical_form() {
        assert_eq!(CommandValue::from(1.01).to_string(), "1.01");
        assert_eq!(CommandValue::from(1.0).to_string(), "1");
        assert_eq!(CommandValue::from(42).to_string(), "42");
    }

    #[test]
    fn test_string_passthrough() {
        assert_eq!(CommandValue::from("some value").to_string(), "some value");
        // Escaping is the command layer's job, not the value's
        assert_eq!(CommandValue::from("a\nb").to_string(), "a\nb");
    }

    #[test]
    fn test_untagged_deserialization() {
        assert_eq!(
            serde_json::from_str::<CommandValue>("true").unwrap(),
            CommandValue::Bool(true)
        );
        assert_eq!(
            serde_json::from_str::<CommandValue>("1.5").unwrap(),
            CommandValue::Number(1.5)
        );
        assert_eq!(
            serde_json::from_str::<CommandValue>("\"x\"").unwrap(),
            CommandValue::String("x".to_string())
        );
    }
}
