//! Records and field values as handed over by the storefront and dashboards.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::kind::RecordKind;

/// A single field value.
///
/// Deserializes from any JSON scalar; `null` becomes [`FieldValue::Blank`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Missing or null value.
    #[default]
    Blank,
    /// Boolean flag (rare, e.g. `featured`).
    Flag(bool),
    /// Numeric value (prices, counts, ratings).
    Number(f64),
    /// Free text.
    Text(String),
}

impl FieldValue {
    /// Returns true for [`FieldValue::Blank`].
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }

    /// Numeric reading of the value.
    ///
    /// Text counts when it parses as a finite number, so numeric columns
    /// read from untyped sources still render as numbers.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Wrap a raw text cell (e.g. from CSV).
    ///
    /// Empty text is blank; anything else is kept verbatim as text.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Self::Blank
        } else {
            Self::Text(raw.to_string())
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => Ok(()),
            Self::Flag(b) => write!(f, "{b}"),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// Render a number the way the storefront displays it.
///
/// Whole numbers have no fractional part; everything else uses the
/// shortest representation that round-trips.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Avoid "-0".
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// One exportable row: column key to value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a field.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Look up a field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Returns true if the field is present and not blank.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.fields.get(key).is_some_and(|v| !v.is_blank())
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A homogeneous batch of records with its declared kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Records {
    pub kind: RecordKind,
    pub rows: Vec<Record>,
}

impl Records {
    /// Create a batch of the given kind.
    #[must_use]
    pub fn new(kind: RecordKind, rows: Vec<Record>) -> Self {
        Self { kind, rows }
    }

    /// Create a batch whose kind is inferred from the first record.
    ///
    /// An empty batch falls back to [`RecordKind::Product`].
    #[must_use]
    pub fn detect(rows: Vec<Record>) -> Self {
        let kind = rows
            .first()
            .map(RecordKind::detect)
            .unwrap_or(RecordKind::Product);
        Self { kind, rows }
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_value_deserializes_json_scalars() {
        let record: Record =
            serde_json::from_str(r#"{"name":"Rice","price":150,"featured":true,"note":null}"#)
                .unwrap();
        assert_eq!(record.get("name"), Some(&FieldValue::Text("Rice".into())));
        assert_eq!(record.get("price"), Some(&FieldValue::Number(150.0)));
        assert_eq!(record.get("featured"), Some(&FieldValue::Flag(true)));
        assert_eq!(record.get("note"), Some(&FieldValue::Blank));
        assert!(!record.has("note"));
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(150.0), "150");
        assert_eq!(format_number(4.5), "4.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.1), "0.1");
    }

    #[test]
    fn raw_values_stay_text() {
        assert_eq!(FieldValue::from_raw("  "), FieldValue::Blank);
        assert_eq!(FieldValue::from_raw("Grains"), FieldValue::Text("Grains".into()));
        assert_eq!(
            FieldValue::from_raw("09175550101"),
            FieldValue::Text("09175550101".into())
        );
        assert_eq!(FieldValue::from_raw("20"), FieldValue::Text("20".into()));
    }

    #[test]
    fn numeric_text_reads_as_number() {
        assert_eq!(FieldValue::Number(4.5).as_number(), Some(4.5));
        assert_eq!(FieldValue::from(" 20 ").as_number(), Some(20.0));
        assert_eq!(FieldValue::from("NaN").as_number(), None);
        assert_eq!(FieldValue::from("DM-014").as_number(), None);
        assert_eq!(FieldValue::Blank.as_number(), None);
    }
}
