//! Export marketplace records to the clipboard, CSV, XLSX, PDF or a print
//! document.
//!
//! Every format renders from one [`Table`](sagnay_model::Table), so a record
//! produces the same cell text everywhere. Side effects go through an
//! [`ExportTarget`]: [`HostTarget`] for the desktop, [`MemoryTarget`] for
//! tests and embedding.
//!
//! ```no_run
//! use sagnay_export::{ExportService, HostTarget};
//! use sagnay_model::{Record, RecordKind, Records};
//!
//! let records = Records::new(
//!     RecordKind::Product,
//!     vec![Record::new().with("name", "Rice").with("price", 150)],
//! );
//! let service = ExportService::new(HostTarget::new("exports"));
//! let outcome = service.export_csv(&records, &[], "products");
//! println!("{}", outcome.message);
//! ```

pub mod artifact;
pub mod common;
pub mod delimited;
pub mod error;
pub mod options;
pub mod pdf;
pub mod print;
pub mod service;
pub mod target;
pub mod xlsx;

pub use artifact::{Artifact, ArtifactClass, Delivery, ExportFile, FileType};
pub use delimited::{render_csv, render_tsv};
pub use error::{ExportError, Result, TargetError};
pub use options::ReportOptions;
pub use pdf::{PdfReport, ROWS_PER_PAGE, page_count, render_pdf};
pub use print::{PrintPage, render_print_html};
pub use service::{ExportFormat, ExportService};
pub use target::{CommandSpec, ExportTarget, HostTarget, MemoryTarget};
pub use xlsx::{SHEET_NAME, render_xlsx};
