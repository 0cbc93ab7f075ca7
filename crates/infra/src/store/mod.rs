//! Store abstractions.
//!
//! The core logic depends only on these traits, never on a concrete storage
//! engine. Implementations must make `insert_new` skip barcodes that already
//! exist: that store-level uniqueness closes the window between an engine's
//! existence check and its insert under concurrent uploads.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use stocktake_core::Barcode;
use stocktake_inventory::{Discrepancy, DiscrepancyFilter, DiscrepancyRecord, InventoryItem};

mod in_memory;
mod postgres;

pub use in_memory::{InMemoryDiscrepancyStore, InMemoryInventoryStore};
pub use postgres::{ensure_schema, PostgresDiscrepancyStore, PostgresInventoryStore};

/// Store operation error: opaque infrastructure failure, never a domain
/// outcome.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend failure: {0}")]
    Backend(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Durable mapping from barcode to inventory record.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Look up the item recorded for a barcode, if any.
    async fn lookup(&self, barcode: Barcode) -> Result<Option<InventoryItem>, StoreError>;

    /// Durably insert items; barcodes already present are skipped, the rest
    /// land atomically.
    async fn insert_new(&self, items: Vec<InventoryItem>) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> InventoryStore for Arc<S>
where
    S: InventoryStore + ?Sized,
{
    async fn lookup(&self, barcode: Barcode) -> Result<Option<InventoryItem>, StoreError> {
        (**self).lookup(barcode).await
    }

    async fn insert_new(&self, items: Vec<InventoryItem>) -> Result<(), StoreError> {
        (**self).insert_new(items).await
    }
}

/// Append-only log of location discrepancies.
#[async_trait]
pub trait DiscrepancyStore: Send + Sync {
    /// Commit a discrepancy to the log, assigning its monotonically
    /// increasing identity.
    async fn append(&self, discrepancy: Discrepancy) -> Result<DiscrepancyRecord, StoreError>;

    /// All records satisfying the filter, in log order. An empty result is a
    /// normal outcome.
    async fn query(&self, filter: &DiscrepancyFilter) -> Result<Vec<DiscrepancyRecord>, StoreError>;
}

#[async_trait]
impl<S> DiscrepancyStore for Arc<S>
where
    S: DiscrepancyStore + ?Sized,
{
    async fn append(&self, discrepancy: Discrepancy) -> Result<DiscrepancyRecord, StoreError> {
        (**self).append(discrepancy).await
    }

    async fn query(&self, filter: &DiscrepancyFilter) -> Result<Vec<DiscrepancyRecord>, StoreError> {
        (**self).query(filter).await
    }
}
