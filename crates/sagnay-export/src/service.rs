//! The export service: five independent operations, each with its own
//! error boundary.

use std::fmt;

use chrono::Local;
use tracing::{debug, error, info, info_span};

use sagnay_model::{ExportOutcome, ExportSettings, Records, Table};

use crate::artifact::{Artifact, Delivery, ExportFile, FileType};
use crate::common::validate_filename;
use crate::delimited::{render_csv, render_tsv};
use crate::error::{ExportError, Result};
use crate::options::{ReportOptions, non_empty};
use crate::pdf::render_pdf;
use crate::print::{PrintPage, render_print_html};
use crate::target::ExportTarget;
use crate::xlsx::render_xlsx;

/// Output format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Clipboard,
    Csv,
    Excel,
    Pdf,
    Print,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::Clipboard,
        ExportFormat::Csv,
        ExportFormat::Excel,
        ExportFormat::Pdf,
        ExportFormat::Print,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Clipboard => "clipboard",
            Self::Csv => "csv",
            Self::Excel => "excel",
            Self::Pdf => "pdf",
            Self::Print => "print",
        }
    }

    const fn failure_message(&self) -> &'static str {
        match self {
            Self::Clipboard => "Failed to copy to clipboard",
            Self::Csv => "Failed to export CSV",
            Self::Excel => "Failed to export Excel file",
            Self::Pdf => "Failed to export PDF",
            Self::Print => "Failed to print",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stateless export service bound to one delivery target.
///
/// Records are never modified. Every operation returns an [`ExportOutcome`];
/// internal errors are logged and converted, never propagated.
#[derive(Debug)]
pub struct ExportService<T: ExportTarget> {
    target: T,
    settings: ExportSettings,
}

impl<T: ExportTarget> ExportService<T> {
    pub fn new(target: T) -> Self {
        Self::with_settings(target, ExportSettings::default())
    }

    pub fn with_settings(target: T, settings: ExportSettings) -> Self {
        Self { target, settings }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Copy the records to the clipboard as tab-separated text.
    pub fn copy_to_clipboard(&self, records: &Records, headers: &[String]) -> ExportOutcome {
        self.run(ExportFormat::Clipboard, records, || {
            let table = self.table(records, headers)?;
            let text = render_tsv(&table)?;
            self.target.deliver(&Artifact::Clipboard { text })?;
            Ok(format!("Copied {} to clipboard", count(records.len())))
        })
    }

    /// Save the records as `<filename>.csv`.
    pub fn export_csv(&self, records: &Records, headers: &[String], filename: &str) -> ExportOutcome {
        self.run(ExportFormat::Csv, records, || {
            self.save(FileType::CSV, records, headers, filename, |table| {
                Ok(render_csv(table)?.into_bytes())
            })
        })
    }

    /// Save the records as a single-sheet `<filename>.xlsx` workbook.
    pub fn export_excel(
        &self,
        records: &Records,
        headers: &[String],
        filename: &str,
    ) -> ExportOutcome {
        self.run(ExportFormat::Excel, records, || {
            self.save(FileType::XLSX, records, headers, filename, render_xlsx)
        })
    }

    /// Save the records as a paginated `<filename>.pdf` report.
    pub fn export_pdf(
        &self,
        records: &Records,
        headers: &[String],
        filename: &str,
        options: &ReportOptions,
    ) -> ExportOutcome {
        self.run(ExportFormat::Pdf, records, || {
            let report = options.resolve(&self.settings);
            self.save(FileType::PDF, records, headers, filename, |table| {
                render_pdf(table, &report)
            })
        })
    }

    /// Hand a printable HTML document to the target's print dispatcher.
    pub fn print(&self, records: &Records, headers: &[String], title: Option<&str>) -> ExportOutcome {
        self.run(ExportFormat::Print, records, || {
            let table = self.table(records, headers)?;
            let title = non_empty(title).unwrap_or(self.settings.default_title.as_str());
            let page = PrintPage {
                title,
                company_name: &self.settings.company_name,
                generated_on: Local::now().format("%Y-%m-%d %H:%M").to_string(),
                print_delay_ms: self.settings.print_delay_ms,
            };
            let html = render_print_html(&table, &page);
            let delivery = self.target.deliver(&Artifact::Print {
                title: title.to_string(),
                html,
            })?;
            let rows = count(records.len());
            Ok(match delivery {
                Delivery::Opened(path) => format!("Opened {} for printing", path.display()),
                Delivery::Spooled(path) => {
                    format!("Print document for {rows} written to {}", path.display())
                }
                _ => format!("Sent {rows} to print"),
            })
        })
    }

    /// Run one operation by format. `options.title` doubles as the print title.
    pub fn export(
        &self,
        format: ExportFormat,
        records: &Records,
        headers: &[String],
        filename: &str,
        options: &ReportOptions,
    ) -> ExportOutcome {
        match format {
            ExportFormat::Clipboard => self.copy_to_clipboard(records, headers),
            ExportFormat::Csv => self.export_csv(records, headers, filename),
            ExportFormat::Excel => self.export_excel(records, headers, filename),
            ExportFormat::Pdf => self.export_pdf(records, headers, filename, options),
            ExportFormat::Print => self.print(records, headers, options.title.as_deref()),
        }
    }

    fn table(&self, records: &Records, headers: &[String]) -> Result<Table> {
        Ok(Table::build(records, headers, self.settings.missing_fields)?)
    }

    fn save(
        &self,
        file_type: FileType,
        records: &Records,
        headers: &[String],
        filename: &str,
        render: impl FnOnce(&Table) -> Result<Vec<u8>>,
    ) -> Result<String> {
        validate_filename(filename)?;
        let table = self.table(records, headers)?;
        let bytes = render(&table)?;
        let name = format!("{filename}.{}", file_type.extension);
        debug!(file = %name, bytes = bytes.len(), "rendered export file");

        let delivery = self.target.deliver(&Artifact::File(ExportFile {
            name: name.clone(),
            mime: file_type.mime,
            bytes,
        }))?;
        let rows = count(records.len());
        Ok(match delivery {
            Delivery::Saved(path) => format!("Exported {rows} to {}", path.display()),
            _ => format!("Exported {rows} to {name}"),
        })
    }

    fn run(
        &self,
        format: ExportFormat,
        records: &Records,
        op: impl FnOnce() -> Result<String>,
    ) -> ExportOutcome {
        let span = info_span!(
            "export",
            format = format.label(),
            kind = %records.kind,
            records = records.len()
        );
        let _guard = span.enter();

        match op() {
            Ok(message) => {
                info!("{message}");
                ExportOutcome::succeeded(message)
            }
            Err(err) => {
                error!(error = %err, "export failed");
                ExportOutcome::failed(user_message(format, &err))
            }
        }
    }
}

/// Input and target failures name their cause; library failures stay generic.
fn user_message(format: ExportFormat, err: &ExportError) -> String {
    match err {
        ExportError::Model(_) | ExportError::InvalidFilename { .. } | ExportError::Target(_) => {
            format!("{}: {err}", format.failure_message())
        }
        _ => format.failure_message().to_string(),
    }
}

fn count(n: usize) -> String {
    if n == 1 {
        "1 record".to_string()
    } else {
        format!("{n} records")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::ArtifactClass;
    use crate::target::MemoryTarget;
    use sagnay_model::{Record, RecordKind};

    fn rice() -> Records {
        Records::new(
            RecordKind::Product,
            vec![
                Record::new()
                    .with("name", "Rice")
                    .with("category", "Grains")
                    .with("price", 150)
                    .with("stock", 20)
                    .with("status", "active")
                    .with("sales", 5)
                    .with("rating", 4.5),
            ],
        )
    }

    #[test]
    fn csv_file_is_named_and_typed() {
        let service = ExportService::new(MemoryTarget::new());
        let outcome = service.export_csv(&rice(), &[], "products");
        assert!(outcome.success);
        assert_eq!(outcome.message, "Exported 1 record to products.csv");

        let files = service.target().files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "products.csv");
        assert_eq!(files[0].mime, "text/csv");
    }

    #[test]
    fn bad_filename_fails_before_delivery() {
        let service = ExportService::new(MemoryTarget::new());
        let outcome = service.export_excel(&rice(), &[], "../escape");
        assert!(!outcome.success);
        assert!(outcome.message.starts_with("Failed to export Excel file: invalid filename"));
        assert!(service.target().artifacts().is_empty());
    }

    #[test]
    fn refused_print_is_reported() {
        let service = ExportService::new(MemoryTarget::new().refusing(ArtifactClass::Print));
        let outcome = service.print(&rice(), &[], Some("Stock"));
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Failed to print: print delivery refused");
    }

    #[test]
    fn print_uses_default_title_and_delay() {
        let service = ExportService::new(MemoryTarget::new());
        let outcome = service.print(&rice(), &[], None);
        assert!(outcome.success);
        assert_eq!(outcome.message, "Sent 1 record to print");
        let html = service.target().printed_html().unwrap();
        assert!(html.contains("<title>Product Report</title>"));
        assert!(html.contains("}, 500);"));
    }

    #[test]
    fn export_dispatches_by_format() {
        let service = ExportService::new(MemoryTarget::new());
        let options = ReportOptions::new();
        for format in ExportFormat::ALL {
            let outcome = service.export(format, &rice(), &[], "report", &options);
            assert!(outcome.success, "{format}: {}", outcome.message);
        }
        let files: Vec<(String, &str)> = service
            .target()
            .files()
            .into_iter()
            .map(|f| (f.name, f.mime))
            .collect();
        assert_eq!(
            files,
            [
                ("report.csv".to_string(), "text/csv"),
                (
                    "report.xlsx".to_string(),
                    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
                ),
                ("report.pdf".to_string(), "application/pdf"),
            ]
        );
    }
}
