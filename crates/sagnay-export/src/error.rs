//! Error types for export operations.

use std::io;
use thiserror::Error;

use sagnay_model::ModelError;

/// Errors raised while rendering or delivering an export.
///
/// These never cross the [`ExportService`](crate::ExportService) boundary;
/// the service logs them and reports an
/// [`ExportOutcome`](sagnay_model::ExportOutcome) instead.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Records could not be mapped to a table.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// CSV/TSV serialization error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// XML serialization error.
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Zip container error.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// PDF generation error.
    #[error("pdf error: {message}")]
    Pdf { message: String },

    /// Filename rejected before rendering.
    #[error("invalid filename '{name}': {reason}")]
    InvalidFilename { name: String, reason: &'static str },

    /// The export target failed to deliver the artifact.
    #[error(transparent)]
    Target(#[from] TargetError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

impl ExportError {
    /// Create a Pdf error.
    pub fn pdf(message: impl Into<String>) -> Self {
        Self::Pdf {
            message: message.into(),
        }
    }
}

/// Errors raised by an [`ExportTarget`](crate::ExportTarget).
#[derive(Debug, Error)]
pub enum TargetError {
    /// The target declined the artifact (permission denied, popup blocked).
    #[error("{artifact} delivery refused")]
    Refused { artifact: &'static str },

    /// No program is configured for this kind of delivery.
    #[error("no {what} available")]
    Unavailable { what: &'static str },

    /// A helper program could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// A helper program exited unsuccessfully.
    #[error("{program} exited with {status}")]
    CommandFailed { program: String, status: String },

    /// Lock poisoned by a panicking thread.
    #[error("target state poisoned")]
    Poisoned,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExportError::pdf("font missing");
        assert_eq!(format!("{err}"), "pdf error: font missing");

        let err: ExportError = TargetError::Refused {
            artifact: "clipboard",
        }
        .into();
        assert_eq!(format!("{err}"), "clipboard delivery refused");
        assert!(matches!(err, ExportError::Target(TargetError::Refused { .. })));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "test");
        let err: ExportError = io_err.into();
        assert!(matches!(err, ExportError::Io(_)));
    }
}
