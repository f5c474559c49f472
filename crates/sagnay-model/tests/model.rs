//! Tests for sagnay-model types.

use std::io::Write;

use proptest::prelude::*;

use sagnay_model::{
    ExportSettings, FieldValue, MissingFieldPolicy, Record, RecordKind, Records, Table,
};

fn customer() -> Record {
    Record::new()
        .with("name", "Ana Reyes")
        .with("email", "ana@example.com")
        .with("phone", "0917-555-0101")
        .with("totalOrders", 12)
        .with("totalSpent", 4520.5)
        .with("lastOrder", "2024-03-02")
        .with("status", "active")
        .with("rating", 5)
}

fn inventory_item() -> Record {
    Record::new()
        .with("name", "Dried Mango")
        .with("sku", "DM-014")
        .with("category", "Fruits")
        .with("stock", 40)
        .with("minStock", 10)
        .with("price", 120)
        .with("status", "in_stock")
}

#[test]
fn customer_records_use_customer_layout() {
    let records = Records::detect(vec![customer()]);
    assert_eq!(records.kind, RecordKind::Customer);

    let table = Table::build(&records, &[], MissingFieldPolicy::Strict).unwrap();
    let row: Vec<&str> = table.text_rows().next().unwrap();
    assert_eq!(
        row,
        vec![
            "Ana Reyes",
            "ana@example.com",
            "0917-555-0101",
            "12",
            "₱4520.5",
            "2024-03-02",
            "active",
            "5"
        ]
    );
}

#[test]
fn inventory_records_use_inventory_layout() {
    let records = Records::detect(vec![inventory_item()]);
    assert_eq!(records.kind, RecordKind::Inventory);

    let table = Table::build(&records, &[], MissingFieldPolicy::Strict).unwrap();
    assert_eq!(table.headers[1], "SKU");
    let row: Vec<&str> = table.text_rows().next().unwrap();
    assert_eq!(
        row,
        vec!["Dried Mango", "DM-014", "Fruits", "40", "10", "₱120", "in_stock"]
    );
}

#[test]
fn empty_batch_detects_product() {
    let records = Records::detect(Vec::new());
    assert_eq!(records.kind, RecordKind::Product);
    let table = Table::build(&records, &[], MissingFieldPolicy::Strict).unwrap();
    assert_eq!(table.row_count(), 0);
    assert_eq!(table.headers.len(), 7);
}

#[test]
fn settings_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"company_name":"Sagnay Farmers Cooperative","missing_fields":"strict"}}"#
    )
    .unwrap();

    let settings = ExportSettings::load(file.path()).unwrap();
    assert_eq!(settings.company_name, "Sagnay Farmers Cooperative");
    assert_eq!(settings.missing_fields, MissingFieldPolicy::Strict);
    assert_eq!(settings.default_title, "Product Report");
}

#[test]
fn settings_load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = ExportSettings::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(format!("{err}").contains("absent.json"));
}

fn field_value() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        Just(FieldValue::Blank),
        (-1_000_000i64..1_000_000).prop_map(FieldValue::from),
        "[a-zA-Z0-9 ]{0,12}".prop_map(FieldValue::Text),
    ]
}

fn product_record() -> impl Strategy<Value = Record> {
    proptest::collection::vec(field_value(), 7).prop_map(|values| {
        ["name", "category", "price", "stock", "status", "sales", "rating"]
            .into_iter()
            .zip(values)
            .collect()
    })
}

proptest! {
    #[test]
    fn lenient_table_has_one_row_per_record(rows in proptest::collection::vec(product_record(), 0..40)) {
        let records = Records::new(RecordKind::Product, rows.clone());
        let table = Table::build(&records, &[], MissingFieldPolicy::Lenient).unwrap();
        prop_assert_eq!(table.row_count(), rows.len());
        for row in &table.rows {
            prop_assert_eq!(row.len(), 7);
            prop_assert!(row[2].text.starts_with('₱'));
        }
        // Building never touches the input.
        prop_assert_eq!(&records.rows, &rows);
    }
}
