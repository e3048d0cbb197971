//! Error types

use thiserror::Error;

/// Shared error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown component class: {0} (use capacitor, resistor or inductor)")]
    UnknownComponentClass(String),
}

/// Result alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_unknown_unit() {
        let error = Error::UnknownUnit("qF".to_string());
        assert_eq!(format!("{}", error), "Unknown unit: qF");
    }

    #[test]
    fn test_error_display_invalid_input() {
        let error = Error::InvalidInput("abc".to_string());
        let display = format!("{}", error);
        assert!(display.contains("Invalid input"));
        assert!(display.contains("abc"));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::UnknownComponentClass("diode".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("UnknownComponentClass"));
        assert!(debug.contains("diode"));
    }
}
