//! Library components for the `sagnay` exporter CLI.

pub mod ingest;
pub mod logging;
