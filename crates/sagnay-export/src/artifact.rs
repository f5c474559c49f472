//! Artifacts produced by the writers and handed to an export target.

use std::fmt;
use std::path::PathBuf;

pub const CSV_MIME: &str = "text/csv";
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const PDF_MIME: &str = "application/pdf";

/// Extension and MIME type of a saved file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileType {
    pub extension: &'static str,
    pub mime: &'static str,
}

impl FileType {
    pub const CSV: Self = Self {
        extension: "csv",
        mime: CSV_MIME,
    };
    pub const XLSX: Self = Self {
        extension: "xlsx",
        mime: XLSX_MIME,
    };
    pub const PDF: Self = Self {
        extension: "pdf",
        mime: PDF_MIME,
    };
}

/// A file ready to be saved (the "download").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// File name including extension.
    pub name: String,
    /// MIME type.
    pub mime: &'static str,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// What an export produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    /// A file to save.
    File(ExportFile),
    /// Plain text for the system clipboard.
    Clipboard { text: String },
    /// A standalone HTML document to print.
    Print { title: String, html: String },
}

impl Artifact {
    /// The delivery channel this artifact needs.
    #[must_use]
    pub fn class(&self) -> ArtifactClass {
        match self {
            Self::File(_) => ArtifactClass::File,
            Self::Clipboard { .. } => ArtifactClass::Clipboard,
            Self::Print { .. } => ArtifactClass::Print,
        }
    }
}

/// Delivery channel: file writer, clipboard writer or print dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactClass {
    File,
    Clipboard,
    Print,
}

impl ArtifactClass {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Clipboard => "clipboard",
            Self::Print => "print",
        }
    }
}

impl fmt::Display for ArtifactClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a target disposed of an artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// File written to disk.
    Saved(PathBuf),
    /// Text placed on the clipboard.
    Copied,
    /// Print document written and handed to the opener.
    Opened(PathBuf),
    /// Print document written, no opener configured.
    Spooled(PathBuf),
    /// Kept in memory.
    Captured,
}
