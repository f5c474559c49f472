//! Export settings, loadable from a JSON file.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Company name printed on reports unless overridden.
pub const DEFAULT_COMPANY_NAME: &str = "From Sagnay to Every Home";

/// Report title used when the caller gives none.
pub const DEFAULT_TITLE: &str = "Product Report";

/// Delay between the print window finishing loading and the print dialog.
pub const DEFAULT_PRINT_DELAY_MS: u64 = 500;

/// Upper bound for the print delay.
pub const MAX_PRINT_DELAY_MS: u64 = 60_000;

/// What to do when a record lacks a layout field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFieldPolicy {
    /// Substitute an empty string or zero.
    #[default]
    Lenient,
    /// Fail the export.
    Strict,
}

impl fmt::Display for MissingFieldPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lenient => f.write_str("lenient"),
            Self::Strict => f.write_str("strict"),
        }
    }
}

/// Settings shared by every export call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Missing-field handling.
    pub missing_fields: MissingFieldPolicy,
    /// Company name for PDF headers and footers.
    pub company_name: String,
    /// Title used by PDF and print output when none is given.
    pub default_title: String,
    /// Wait after the print document loads before opening the dialog.
    pub print_delay_ms: u64,
    /// Program (and arguments) receiving clipboard text on stdin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clipboard_command: Option<Vec<String>>,
    /// Program (and arguments) used to open print documents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_command: Option<Vec<String>>,
    /// Directory receiving exported files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            missing_fields: MissingFieldPolicy::default(),
            company_name: DEFAULT_COMPANY_NAME.to_string(),
            default_title: DEFAULT_TITLE.to_string(),
            print_delay_ms: DEFAULT_PRINT_DELAY_MS,
            clipboard_command: None,
            open_command: None,
            output_dir: None,
        }
    }
}

impl ExportSettings {
    /// Parse settings from JSON and validate them.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| ModelError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.company_name.trim().is_empty() {
            return Err(ModelError::invalid_settings("company_name must not be empty"));
        }
        if self.print_delay_ms > MAX_PRINT_DELAY_MS {
            return Err(ModelError::invalid_settings(format!(
                "print_delay_ms must be at most {MAX_PRINT_DELAY_MS}"
            )));
        }
        for (name, command) in [
            ("clipboard_command", &self.clipboard_command),
            ("open_command", &self.open_command),
        ] {
            if command.as_ref().is_some_and(|c| c.is_empty()) {
                return Err(ModelError::invalid_settings(format!(
                    "{name} must name a program"
                )));
            }
        }
        Ok(())
    }

    /// Switch to strict missing-field handling.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.missing_fields = MissingFieldPolicy::Strict;
        self
    }

    #[must_use]
    pub fn with_company_name(mut self, name: impl Into<String>) -> Self {
        self.company_name = name.into();
        self
    }
}
