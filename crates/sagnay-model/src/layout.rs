//! Fixed column layouts per record kind.
//!
//! Every export format renders columns in the order defined here. Header
//! labels supplied by the caller are matched to these columns by position.

use serde::Serialize;

/// Currency symbol used for prices and spend totals.
pub const CURRENCY_SYMBOL: &str = "₱";

/// How a column's value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueClass {
    /// Free text, defaults to an empty string.
    Text,
    /// Plain number, defaults to zero.
    Number,
    /// Amount in pesos, rendered with the currency symbol. Defaults to zero.
    Currency,
}

impl ValueClass {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Currency => "currency",
        }
    }
}

/// One column in a layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Column {
    /// Record field key.
    pub key: &'static str,
    /// Default header label.
    pub label: &'static str,
    /// Rendering class.
    pub class: ValueClass,
    /// Spreadsheet column width in characters.
    pub width: f64,
}

const fn col(key: &'static str, label: &'static str, class: ValueClass, width: f64) -> Column {
    Column {
        key,
        label,
        class,
        width,
    }
}

/// An ordered set of columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Layout {
    pub columns: &'static [Column],
}

impl Layout {
    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.columns.len()
    }

    /// Default header labels in column order.
    #[must_use]
    pub fn default_headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.label.to_string()).collect()
    }

    /// Field keys in column order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|c| c.key)
    }
}

pub static PRODUCT_LAYOUT: Layout = Layout {
    columns: &[
        col("name", "Name", ValueClass::Text, 25.0),
        col("category", "Category", ValueClass::Text, 15.0),
        col("price", "Price", ValueClass::Currency, 12.0),
        col("stock", "Stock", ValueClass::Number, 10.0),
        col("status", "Status", ValueClass::Text, 12.0),
        col("sales", "Sales", ValueClass::Number, 10.0),
        col("rating", "Rating", ValueClass::Number, 10.0),
    ],
};

pub static CUSTOMER_LAYOUT: Layout = Layout {
    columns: &[
        col("name", "Name", ValueClass::Text, 25.0),
        col("email", "Email", ValueClass::Text, 28.0),
        col("phone", "Phone", ValueClass::Text, 16.0),
        col("totalOrders", "Total Orders", ValueClass::Number, 12.0),
        col("totalSpent", "Total Spent", ValueClass::Currency, 14.0),
        col("lastOrder", "Last Order", ValueClass::Text, 14.0),
        col("status", "Status", ValueClass::Text, 12.0),
        col("rating", "Rating", ValueClass::Number, 10.0),
    ],
};

pub static INVENTORY_LAYOUT: Layout = Layout {
    columns: &[
        col("name", "Name", ValueClass::Text, 25.0),
        col("sku", "SKU", ValueClass::Text, 15.0),
        col("category", "Category", ValueClass::Text, 15.0),
        col("stock", "Stock", ValueClass::Number, 10.0),
        col("minStock", "Min Stock", ValueClass::Number, 10.0),
        col("price", "Price", ValueClass::Currency, 12.0),
        col("status", "Status", ValueClass::Text, 12.0),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_layout_has_seven_columns() {
        assert_eq!(PRODUCT_LAYOUT.width(), 7);
        assert_eq!(
            PRODUCT_LAYOUT.default_headers(),
            vec!["Name", "Category", "Price", "Stock", "Status", "Sales", "Rating"]
        );
    }

    #[test]
    fn layouts_have_unique_keys() {
        for layout in [&PRODUCT_LAYOUT, &CUSTOMER_LAYOUT, &INVENTORY_LAYOUT] {
            let mut keys: Vec<_> = layout.keys().collect();
            keys.sort_unstable();
            keys.dedup();
            assert_eq!(keys.len(), layout.width());
        }
    }
}
