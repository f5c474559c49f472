//! Delimited text: CSV files and tab-separated clipboard text.

use std::io;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use sagnay_model::Table;

use crate::error::Result;

/// Render a table as CSV.
///
/// Every field is double quoted and embedded quotes are doubled. Rows are
/// joined with `\n`; there is no trailing terminator.
pub fn render_csv(table: &Table) -> Result<String> {
    render(table, b',', QuoteStyle::Always)
}

/// Render a table as tab-separated text for the clipboard.
///
/// Fields are quoted only when they contain a tab, quote or line break, the
/// way spreadsheets paste them back.
pub fn render_tsv(table: &Table) -> Result<String> {
    render(table, b'\t', QuoteStyle::Necessary)
}

fn render(table: &Table, delimiter: u8, quote_style: QuoteStyle) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(quote_style)
        .terminator(Terminator::Any(b'\n'))
        // Caller headers may not match the layout width in lenient mode.
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(&table.headers)?;
    for row in table.text_rows() {
        writer.write_record(row)?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    let mut text =
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}
