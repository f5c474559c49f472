//! Format-neutral grid built from records and rendered by every writer.

use tracing::debug;

use crate::error::{ModelError, Result};
use crate::kind::RecordKind;
use crate::layout::{CURRENCY_SYMBOL, Column, ValueClass};
use crate::record::{FieldValue, Records, format_number};
use crate::settings::MissingFieldPolicy;

/// A rendered cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Display text, identical across formats.
    pub text: String,
    /// True when the cell holds a plain number (stored numerically in XLSX).
    pub numeric: bool,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            numeric: false,
        }
    }

    pub fn number(value: f64) -> Self {
        Self {
            text: format_number(value),
            numeric: true,
        }
    }
}

/// Header row plus data rows, all rendered to text.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub kind: RecordKind,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    /// Spreadsheet column widths in characters, one per layout column.
    pub widths: Vec<f64>,
}

impl Table {
    /// Build a table from records using the kind's layout.
    ///
    /// Empty `headers` fall back to the layout's default labels. In strict
    /// mode a header count mismatch or a missing field is an error; in
    /// lenient mode missing fields become `""` or `0`.
    pub fn build(records: &Records, headers: &[String], policy: MissingFieldPolicy) -> Result<Self> {
        let layout = records.kind.layout();
        let headers = if headers.is_empty() {
            layout.default_headers()
        } else {
            headers.to_vec()
        };
        if policy == MissingFieldPolicy::Strict && headers.len() != layout.width() {
            return Err(ModelError::HeaderMismatch {
                kind: records.kind,
                expected: layout.width(),
                actual: headers.len(),
            });
        }

        let mut defaulted = 0usize;
        let mut rows = Vec::with_capacity(records.len());
        for (row_idx, record) in records.rows.iter().enumerate() {
            let mut row = Vec::with_capacity(layout.width());
            for column in layout.columns {
                let value = record.get(column.key).filter(|v| !v.is_blank());
                let cell = match value {
                    Some(value) => render_cell(column, value),
                    None => {
                        if policy == MissingFieldPolicy::Strict {
                            return Err(ModelError::MissingField {
                                row: row_idx,
                                kind: records.kind,
                                field: column.key,
                            });
                        }
                        defaulted += 1;
                        default_cell(column)
                    }
                };
                row.push(cell);
            }
            rows.push(row);
        }
        if defaulted > 0 {
            debug!(
                kind = %records.kind,
                defaulted,
                "missing fields replaced with defaults"
            );
        }

        Ok(Self {
            kind: records.kind,
            headers,
            rows,
            widths: layout.columns.iter().map(|c| c.width).collect(),
        })
    }

    /// Number of data rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the data rows.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.widths.len()
    }

    /// Data rows as plain text.
    pub fn text_rows(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        self.rows
            .iter()
            .map(|row| row.iter().map(|c| c.text.as_str()).collect())
    }
}

fn render_cell(column: &Column, value: &FieldValue) -> Cell {
    match (column.class, value) {
        (ValueClass::Currency, FieldValue::Text(s)) if s.starts_with(CURRENCY_SYMBOL) => {
            Cell::text(s.clone())
        }
        (ValueClass::Currency, other) => Cell::text(format!("{CURRENCY_SYMBOL}{other}")),
        (ValueClass::Number, other) => match other.as_number() {
            Some(n) => Cell::number(n),
            None => Cell::text(other.to_string()),
        },
        (ValueClass::Text, other) => Cell::text(other.to_string()),
    }
}

fn default_cell(column: &Column) -> Cell {
    match column.class {
        ValueClass::Text => Cell::text(""),
        ValueClass::Number => Cell::number(0.0),
        ValueClass::Currency => Cell::text(format!("{CURRENCY_SYMBOL}0")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    fn rice() -> Record {
        Record::new()
            .with("name", "Rice")
            .with("category", "Grains")
            .with("price", 150)
            .with("stock", 20)
            .with("status", "active")
            .with("sales", 5)
            .with("rating", 4.5)
    }

    #[test]
    fn builds_product_row() {
        let records = Records::new(RecordKind::Product, vec![rice()]);
        let table = Table::build(&records, &[], MissingFieldPolicy::Lenient).unwrap();
        let rows: Vec<Vec<&str>> = table.text_rows().collect();
        assert_eq!(
            rows,
            vec![vec!["Rice", "Grains", "₱150", "20", "active", "5", "4.5"]]
        );
        assert!(table.rows[0][3].numeric);
        assert!(!table.rows[0][2].numeric);
    }

    #[test]
    fn lenient_defaults_missing_fields() {
        let records = Records::new(
            RecordKind::Customer,
            vec![Record::new().with("name", "Ana").with("email", "ana@example.com")],
        );
        let table = Table::build(&records, &[], MissingFieldPolicy::Lenient).unwrap();
        let row: Vec<&str> = table.text_rows().next().unwrap();
        assert_eq!(row, vec!["Ana", "ana@example.com", "", "0", "₱0", "", "", "0"]);
    }

    #[test]
    fn strict_rejects_missing_field() {
        let mut record = rice();
        record.insert("stock", FieldValue::Blank);
        let records = Records::new(RecordKind::Product, vec![rice(), record]);
        let err = Table::build(&records, &[], MissingFieldPolicy::Strict).unwrap_err();
        assert!(matches!(
            err,
            ModelError::MissingField {
                row: 1,
                field: "stock",
                ..
            }
        ));
    }

    #[test]
    fn strict_rejects_header_mismatch() {
        let records = Records::new(RecordKind::Product, vec![rice()]);
        let headers = vec!["Name".to_string()];
        let err = Table::build(&records, &headers, MissingFieldPolicy::Strict).unwrap_err();
        assert!(matches!(
            err,
            ModelError::HeaderMismatch {
                expected: 7,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn currency_text_keeps_existing_symbol() {
        let record = rice().with("price", "₱99");
        let records = Records::new(RecordKind::Product, vec![record]);
        let table = Table::build(&records, &[], MissingFieldPolicy::Lenient).unwrap();
        assert_eq!(table.rows[0][2].text, "₱99");
    }

    #[test]
    fn text_cells_are_not_reparsed() {
        let record = Record::new()
            .with("name", "Ana")
            .with("email", "ana@example.com")
            .with("phone", "09175550101")
            .with("totalOrders", "12");
        let records = Records::new(RecordKind::Customer, vec![record]);
        let table = Table::build(&records, &[], MissingFieldPolicy::Lenient).unwrap();
        let phone = &table.rows[0][2];
        assert_eq!(phone.text, "09175550101");
        assert!(!phone.numeric);
        let orders = &table.rows[0][3];
        assert_eq!(orders.text, "12");
        assert!(orders.numeric);
    }
}
