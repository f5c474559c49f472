//! CLI argument definitions for the sagnay exporter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use sagnay_export::ExportFormat;
use sagnay_model::RecordKind;

#[derive(Parser)]
#[command(
    name = "sagnay",
    version,
    about = "Export marketplace records to clipboard, CSV, Excel, PDF or print",
    long_about = "Export customer, product and inventory records from the\n\
                  From Sagnay to Every Home marketplace.\n\n\
                  Reads JSON or CSV input and writes CSV, XLSX, PDF or a printable\n\
                  HTML document, or copies tab-separated text to the clipboard."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Export settings file (JSON).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Export a record file.
    Export(ExportArgs),

    /// Show the column layout of every record kind.
    Layouts,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Output to produce.
    #[arg(value_enum, value_name = "FORMAT")]
    pub format: FormatArg,

    /// Record file (JSON array or CSV with a header row).
    #[arg(long = "input", short = 'i', value_name = "FILE")]
    pub input: PathBuf,

    /// Record kind; `auto` detects it from the first record.
    #[arg(long = "kind", value_enum, default_value = "auto")]
    pub kind: KindArg,

    /// Column header label, repeated once per column (default: layout labels).
    #[arg(long = "header", value_name = "LABEL")]
    pub headers: Vec<String>,

    /// Output file name without extension (default: input file stem).
    #[arg(long = "name", value_name = "FILE_STEM")]
    pub name: Option<String>,

    /// Directory for exported files (default: settings, then current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Report or print title.
    #[arg(long = "title")]
    pub title: Option<String>,

    /// Company name shown on reports.
    #[arg(long = "company")]
    pub company: Option<String>,

    /// Fail on records missing a layout field instead of defaulting them.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Write the print document without opening it.
    #[arg(long = "no-open")]
    pub no_open: bool,

    /// Print the outcome as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Copy,
    Csv,
    Excel,
    Pdf,
    Print,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Copy => ExportFormat::Clipboard,
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Excel => ExportFormat::Excel,
            FormatArg::Pdf => ExportFormat::Pdf,
            FormatArg::Print => ExportFormat::Print,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Auto,
    Customer,
    Inventory,
    Product,
}

impl KindArg {
    /// Declared kind, or `None` for detection.
    pub fn declared(self) -> Option<RecordKind> {
        match self {
            KindArg::Auto => None,
            KindArg::Customer => Some(RecordKind::Customer),
            KindArg::Inventory => Some(RecordKind::Inventory),
            KindArg::Product => Some(RecordKind::Product),
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
