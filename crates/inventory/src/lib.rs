//! Inventory domain module.
//!
//! This crate contains the business rules for barcode inventory tracking,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage): the CSV batch parser, scan-verdict classification, and the
//! discrepancy filter predicate.

pub mod csv;
pub mod query;
pub mod record;
pub mod verify;

pub use csv::{parse_batch, CsvError};
pub use query::DiscrepancyFilter;
pub use record::{Discrepancy, DiscrepancyRecord, InventoryItem, ScanEvent};
pub use verify::{classify, locations_match, Verdict};
