//! Load records from JSON or CSV files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use sagnay_model::{FieldValue, Record, RecordKind, Records};

/// Input file encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// A JSON array of flat objects.
    Json,
    /// CSV with a header row; cells stay text and empty cells are blank.
    Csv,
}

impl InputFormat {
    /// Pick the format from the file extension. Unknown extensions are read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

/// Read every record from `path`.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let format = InputFormat::from_path(path);
    let text =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let rows = match format {
        InputFormat::Json => parse_json(&text),
        InputFormat::Csv => parse_csv(&text),
    }
    .with_context(|| format!("parse {}", path.display()))?;
    info!(path = %path.display(), records = rows.len(), ?format, "loaded records");
    Ok(rows)
}

/// Parse a JSON array of objects.
pub fn parse_json(text: &str) -> Result<Vec<Record>> {
    let value: serde_json::Value = serde_json::from_str(text).context("invalid JSON")?;
    let serde_json::Value::Array(items) = value else {
        bail!("expected a JSON array of records");
    };
    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            serde_json::from_value::<Record>(item)
                .with_context(|| format!("record {idx} is not a flat object"))
        })
        .collect()
}

/// Parse CSV text with a header row.
pub fn parse_csv(text: &str) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());
    let headers = reader.headers().context("read CSV header")?.clone();
    let mut rows = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row.with_context(|| format!("read CSV row {}", idx + 1))?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(key, raw)| (key.to_string(), FieldValue::from_raw(raw)))
            .collect();
        rows.push(record);
    }
    debug!(columns = headers.len(), rows = rows.len(), "parsed CSV input");
    Ok(rows)
}

/// Wrap rows as `kind`, or detect the kind from the first record.
pub fn into_records(rows: Vec<Record>, kind: Option<RecordKind>) -> Records {
    match kind {
        Some(kind) => Records::new(kind, rows),
        None => {
            let records = Records::detect(rows);
            debug!(kind = %records.kind, "detected record kind");
            records
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_selects_format() {
        assert_eq!(InputFormat::from_path(Path::new("a/b.CSV")), InputFormat::Csv);
        assert_eq!(InputFormat::from_path(Path::new("b.json")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("b")), InputFormat::Json);
    }

    #[test]
    fn csv_fields_keep_their_text() {
        let rows = parse_csv("name, price ,phone,status\nRice,150,09175550101,\n").unwrap();
        let rice = &rows[0];
        assert_eq!(rice.get("price"), Some(&FieldValue::Text("150".into())));
        assert_eq!(rice.get("phone"), Some(&FieldValue::Text("09175550101".into())));
        assert_eq!(rice.get("name"), Some(&FieldValue::Text("Rice".into())));
        assert!(!rice.has("status"));
    }

    #[test]
    fn json_must_be_an_array() {
        let err = parse_json(r#"{"name": "Rice"}"#).unwrap_err();
        assert!(err.to_string().contains("expected a JSON array"));
    }
}
