//! PDF report writer.
//!
//! Lays out an A4 portrait report with printpdf: a centered heading block
//! (company, title, timestamp) on the first page, a paginated grid table
//! and a footer on every page.

use std::io::BufWriter;

use chrono::NaiveDateTime;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rect, Rgb,
};
use tracing::debug;

use sagnay_model::Table;

use crate::error::{ExportError, Result};

/// Data rows drawn on each page.
pub const ROWS_PER_PAGE: usize = 25;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 14.0;
const ROW_HEIGHT: f32 = 8.0;
const HEADER_HEIGHT: f32 = 9.0;
const GRID_LINE: f32 = 0.2;

const FIRST_TABLE_TOP: f32 = 255.0;
const NEXT_TABLE_TOP: f32 = 280.0;
const FOOTER_Y: f32 = 10.0;

const FONT_SIZE_COMPANY: f32 = 16.0;
const FONT_SIZE_TITLE: f32 = 13.0;
const FONT_SIZE_META: f32 = 9.0;
const FONT_SIZE_CELL: f32 = 8.0;
const FONT_SIZE_FOOTER: f32 = 8.0;

/// Millimetres per point.
const MM_PER_PT: f32 = 0.3528;
/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

/// Header fill, #2E7D32.
const HEADER_FILL: (f32, f32, f32) = (46.0 / 255.0, 125.0 / 255.0, 50.0 / 255.0);
const STRIPE_FILL: (f32, f32, f32) = (245.0 / 255.0, 245.0 / 255.0, 245.0 / 255.0);
const GRID_COLOR: (f32, f32, f32) = (200.0 / 255.0, 200.0 / 255.0, 200.0 / 255.0);
const TEXT_COLOR: (f32, f32, f32) = (33.0 / 255.0, 33.0 / 255.0, 33.0 / 255.0);
const WHITE: (f32, f32, f32) = (1.0, 1.0, 1.0);

/// Report heading details.
#[derive(Debug, Clone)]
pub struct PdfReport<'a> {
    pub title: &'a str,
    pub company_name: &'a str,
    pub generated_at: NaiveDateTime,
}

/// Pages needed for `rows` data rows. An empty report still has one page.
#[must_use]
pub fn page_count(rows: usize) -> usize {
    rows.div_ceil(ROWS_PER_PAGE).max(1)
}

/// Footer line for one page.
#[must_use]
pub fn footer_text(company_name: &str, total: usize, page: usize, pages: usize) -> String {
    format!("Report generated by {company_name} | Total records: {total} | Page {page} of {pages}")
}

/// Map text onto what the built-in fonts can draw.
///
/// Built-in font text is written in WinAnsiEncoding, so printable Latin-1
/// passes through. The peso sign becomes `PHP `, typographic quotes and
/// dashes fold to ASCII and anything else becomes `?`.
#[must_use]
pub fn pdf_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '₱' => out.push_str("PHP "),
            '\t' | '\n' | '\r' | '\u{a0}' => out.push(' '),
            c if c.is_control() => {}
            ' '..='~' | '\u{a1}'..='\u{ff}' => out.push(ch),
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201c}' | '\u{201d}' => out.push('"'),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            _ => out.push('?'),
        }
    }
    out
}

/// Truncate text to fit `width` millimetres at `font_size`.
fn fit_text(text: &str, width: f32, font_size: f32) -> String {
    let glyph = font_size * MM_PER_PT * AVG_GLYPH_WIDTH;
    let max_chars = ((width - 2.0) / glyph).floor().max(1.0) as usize;
    let count = text.chars().count();
    if count <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return text.chars().take(max_chars).collect();
    }
    let mut out: String = text.chars().take(max_chars - 3).collect();
    out.push_str("...");
    out
}

fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * MM_PER_PT * AVG_GLYPH_WIDTH
}

fn rgb((r, g, b): (f32, f32, f32)) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Render a table as a PDF report.
pub fn render_pdf(table: &Table, report: &PdfReport<'_>) -> Result<Vec<u8>> {
    let pages = page_count(table.row_count());
    let (doc, first_page, first_layer) =
        PdfDocument::new(report.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ExportError::pdf(format!("{e:?}")))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ExportError::pdf(format!("{e:?}")))?,
    };

    let columns = table.headers.len().max(table.column_count()).max(1);
    let column_width = (PAGE_WIDTH - 2.0 * MARGIN) / columns as f32;
    let headers: Vec<String> = table
        .headers
        .iter()
        .map(|h| fit_text(&pdf_text(h), column_width, FONT_SIZE_CELL))
        .collect();

    let footer_company = pdf_text(report.company_name);
    for page in 0..pages {
        let layer = if page == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_idx, layer_idx) = doc.add_page(
                Mm(PAGE_WIDTH),
                Mm(PAGE_HEIGHT),
                format!("Page {}", page + 1),
            );
            doc.get_page(page_idx).get_layer(layer_idx)
        };

        let top = if page == 0 {
            draw_heading(&layer, &fonts, report);
            FIRST_TABLE_TOP
        } else {
            NEXT_TABLE_TOP
        };

        let start = page * ROWS_PER_PAGE;
        let end = (start + ROWS_PER_PAGE).min(table.row_count());
        let rows: Vec<Vec<String>> = table.rows[start..end]
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| fit_text(&pdf_text(&cell.text), column_width, FONT_SIZE_CELL))
                    .collect()
            })
            .collect();
        draw_table(&layer, &fonts, top, column_width, columns, &headers, &rows);

        let footer = footer_text(&footer_company, table.row_count(), page + 1, pages);
        layer.set_fill_color(rgb(TEXT_COLOR));
        draw_centered(&layer, &fonts.regular, &footer, FONT_SIZE_FOOTER, FOOTER_Y);
    }
    debug!(pages, rows = table.row_count(), "pdf layout complete");

    save(doc)
}

fn save(doc: PdfDocumentReference) -> Result<Vec<u8>> {
    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ExportError::pdf(format!("{e:?}")))?;
    buf.into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))
}

fn draw_heading(layer: &PdfLayerReference, fonts: &Fonts, report: &PdfReport<'_>) {
    layer.set_fill_color(rgb(HEADER_FILL));
    draw_centered(
        layer,
        &fonts.bold,
        &pdf_text(report.company_name),
        FONT_SIZE_COMPANY,
        280.0,
    );
    layer.set_fill_color(rgb(TEXT_COLOR));
    draw_centered(
        layer,
        &fonts.bold,
        &pdf_text(report.title),
        FONT_SIZE_TITLE,
        271.0,
    );
    let generated = format!(
        "Generated on: {}",
        report.generated_at.format("%Y-%m-%d %H:%M")
    );
    draw_centered(layer, &fonts.regular, &generated, FONT_SIZE_META, 264.0);
}

fn draw_centered(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    font_size: f32,
    y: f32,
) {
    let x = ((PAGE_WIDTH - text_width(text, font_size)) / 2.0).max(MARGIN);
    layer.use_text(text, font_size, Mm(x), Mm(y), font);
}

fn fill_rect(layer: &PdfLayerReference, x: f32, y: f32, width: f32, height: f32) {
    layer.add_rect(Rect::new(Mm(x), Mm(y), Mm(x + width), Mm(y + height)));
}

fn draw_table(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    top: f32,
    column_width: f32,
    columns: usize,
    headers: &[String],
    rows: &[Vec<String>],
) {
    let table_width = column_width * columns as f32;
    let header_bottom = top - HEADER_HEIGHT;

    layer.set_fill_color(rgb(HEADER_FILL));
    fill_rect(layer, MARGIN, header_bottom, table_width, HEADER_HEIGHT);
    layer.set_fill_color(rgb(WHITE));
    for (idx, header) in headers.iter().enumerate() {
        let x = MARGIN + idx as f32 * column_width + 1.5;
        layer.use_text(
            header.as_str(),
            FONT_SIZE_CELL,
            Mm(x),
            Mm(header_bottom + 3.0),
            &fonts.bold,
        );
    }

    for (row_idx, row) in rows.iter().enumerate() {
        let row_bottom = header_bottom - (row_idx as f32 + 1.0) * ROW_HEIGHT;
        if row_idx % 2 == 1 {
            layer.set_fill_color(rgb(STRIPE_FILL));
            fill_rect(layer, MARGIN, row_bottom, table_width, ROW_HEIGHT);
        }
        layer.set_fill_color(rgb(TEXT_COLOR));
        for (col_idx, text) in row.iter().enumerate() {
            let x = MARGIN + col_idx as f32 * column_width + 1.5;
            layer.use_text(
                text.as_str(),
                FONT_SIZE_CELL,
                Mm(x),
                Mm(row_bottom + 2.7),
                &fonts.regular,
            );
        }
    }

    // Grid lines as thin filled bars.
    let bottom = header_bottom - rows.len() as f32 * ROW_HEIGHT;
    layer.set_fill_color(rgb(GRID_COLOR));
    for col in 0..=columns {
        let x = MARGIN + col as f32 * column_width;
        fill_rect(layer, x - GRID_LINE / 2.0, bottom, GRID_LINE, top - bottom);
    }
    fill_rect(layer, MARGIN, top - GRID_LINE / 2.0, table_width, GRID_LINE);
    fill_rect(
        layer,
        MARGIN,
        header_bottom - GRID_LINE / 2.0,
        table_width,
        GRID_LINE,
    );
    for row_idx in 1..=rows.len() {
        let y = header_bottom - row_idx as f32 * ROW_HEIGHT;
        fill_rect(layer, MARGIN, y - GRID_LINE / 2.0, table_width, GRID_LINE);
    }
}
