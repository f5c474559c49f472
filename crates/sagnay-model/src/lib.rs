//! Marketplace record model.
//!
//! Records arrive from the storefront, seller dashboard and admin console as
//! loosely shaped key/value rows. This crate gives them a declared
//! [`RecordKind`], maps them through the kind's fixed column [`Layout`] and
//! produces a [`Table`] that every export format renders from.

pub mod error;
pub mod kind;
pub mod layout;
pub mod outcome;
pub mod record;
pub mod settings;
pub mod table;

pub use error::{ModelError, Result};
pub use kind::RecordKind;
pub use layout::{CURRENCY_SYMBOL, Column, Layout, ValueClass};
pub use outcome::ExportOutcome;
pub use record::{FieldValue, Record, Records, format_number};
pub use settings::{
    DEFAULT_COMPANY_NAME, DEFAULT_PRINT_DELAY_MS, DEFAULT_TITLE, ExportSettings,
    MissingFieldPolicy,
};
pub use table::{Cell, Table};
