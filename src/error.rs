//! Custom error types for tag-ledger
//!
//! This module defines the error hierarchy for the library using thiserror.
//! Aggregation requests fail with [`LedgerError::Configuration`] when a tag's
//! credit settings cannot be bucketed; malformed transaction rows are never an
//! error there, they are skipped and counted by the engine instead.

use thiserror::Error;

/// The main error type for tag-ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// A tag's credit configuration is unusable (missing or out-of-range start day, etc.)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A value could not be interpreted (unparseable date, ...)
    #[error("Data error: {0}")]
    Data(String),

    /// Settings file problems
    #[error("Settings error: {0}")]
    Settings(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Create a "not found" error for tags
    pub fn tag_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Tag",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a tag configuration error
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for LedgerError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

/// Result type alias for tag-ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::Configuration("start day missing".into());
        assert_eq!(err.to_string(), "Configuration error: start day missing");
        assert!(err.is_configuration());
    }

    #[test]
    fn test_not_found_error() {
        let err = LedgerError::tag_not_found("Groceries");
        assert_eq!(err.to_string(), "Tag not found: Groceries");
        assert!(err.is_not_found());
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let ledger_err: LedgerError = io_err.into();
        assert!(matches!(ledger_err, LedgerError::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let ledger_err: LedgerError = json_err.into();
        assert!(matches!(ledger_err, LedgerError::Json(_)));
    }
}
