use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::layout::{CUSTOMER_LAYOUT, INVENTORY_LAYOUT, Layout, PRODUCT_LAYOUT};
use crate::record::Record;

/// The kind of record being exported. Selects the column layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Customer listing from the admin console.
    Customer,
    /// Seller inventory items (identified by SKU).
    Inventory,
    /// Storefront and dashboard products.
    Product,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [Self::Customer, Self::Inventory, Self::Product];

    /// Infer a kind from field presence.
    ///
    /// `email` marks a customer, `sku` an inventory item, anything else is
    /// treated as a product. Only used when the caller asks for detection.
    pub fn detect(record: &Record) -> Self {
        if record.has("email") {
            Self::Customer
        } else if record.has("sku") {
            Self::Inventory
        } else {
            Self::Product
        }
    }

    /// Column layout for this kind.
    pub fn layout(&self) -> &'static Layout {
        match self {
            Self::Customer => &CUSTOMER_LAYOUT,
            Self::Inventory => &INVENTORY_LAYOUT,
            Self::Product => &PRODUCT_LAYOUT,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Inventory => "inventory",
            Self::Product => "product",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" | "customers" => Ok(Self::Customer),
            "inventory" => Ok(Self::Inventory),
            "product" | "products" => Ok(Self::Product),
            other => Err(ModelError::unknown_kind(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_routes_by_field_presence() {
        let customer = Record::new()
            .with("name", "Ana")
            .with("email", "ana@example.com");
        let item = Record::new().with("name", "Rice").with("sku", "RC-001");
        let product = Record::new().with("name", "Rice").with("price", 150);
        assert_eq!(RecordKind::detect(&customer), RecordKind::Customer);
        assert_eq!(RecordKind::detect(&item), RecordKind::Inventory);
        assert_eq!(RecordKind::detect(&product), RecordKind::Product);
    }

    #[test]
    fn email_wins_over_sku() {
        let record = Record::new().with("email", "a@b.c").with("sku", "X");
        assert_eq!(RecordKind::detect(&record), RecordKind::Customer);
    }

    #[test]
    fn parse_kind_names() {
        assert_eq!("Customers".parse::<RecordKind>().unwrap(), RecordKind::Customer);
        assert_eq!(" inventory ".parse::<RecordKind>().unwrap(), RecordKind::Inventory);
        assert!("orders".parse::<RecordKind>().is_err());
    }
}
