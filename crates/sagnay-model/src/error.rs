//! Error types for record and layout handling.

use std::path::PathBuf;
use thiserror::Error;

use crate::kind::RecordKind;

/// Errors raised while turning records into a table or loading settings.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A record lacks a field its layout requires (strict mode only).
    #[error("record {row} ({kind}) is missing field '{field}'")]
    MissingField {
        row: usize,
        kind: RecordKind,
        field: &'static str,
    },

    /// Header count does not match the layout (strict mode only).
    #[error("{kind} layout has {expected} columns but {actual} headers were given")]
    HeaderMismatch {
        kind: RecordKind,
        expected: usize,
        actual: usize,
    },

    /// Unknown record kind name.
    #[error("unknown record kind: {name}")]
    UnknownKind { name: String },

    /// Settings failed validation.
    #[error("invalid settings: {message}")]
    InvalidSettings { message: String },

    /// Settings file could not be read.
    #[error("failed to read settings {path}: {source}")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parse error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

impl ModelError {
    /// Create an InvalidSettings error.
    pub fn invalid_settings(message: impl Into<String>) -> Self {
        Self::InvalidSettings {
            message: message.into(),
        }
    }

    /// Create an UnknownKind error.
    pub fn unknown_kind(name: impl Into<String>) -> Self {
        Self::UnknownKind { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::MissingField {
            row: 2,
            kind: RecordKind::Customer,
            field: "email",
        };
        assert_eq!(
            format!("{err}"),
            "record 2 (customer) is missing field 'email'"
        );

        let err = ModelError::HeaderMismatch {
            kind: RecordKind::Product,
            expected: 7,
            actual: 3,
        };
        assert_eq!(
            format!("{err}"),
            "product layout has 7 columns but 3 headers were given"
        );
    }
}
