//! Ingestion engine: CSV batch → validated, deduplicated inventory records.

use thiserror::Error;

use stocktake_core::Clock;
use stocktake_inventory::{parse_batch, CsvError};

use crate::store::{InventoryStore, StoreError};

/// Outcome of a successful ingestion. `accepted == 0` means the batch was
/// valid but held no new records.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub accepted: usize,
}

/// Ingestion failure: either the batch failed validation (whole batch
/// rejected, nothing persisted) or the store failed.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Csv(#[from] CsvError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Combines the batch parser with store lookups to land new records.
pub struct IngestionEngine<S, C> {
    store: S,
    clock: C,
}

impl<S, C> IngestionEngine<S, C>
where
    S: InventoryStore,
    C: Clock,
{
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Validate a CSV payload and persist its new records.
    ///
    /// Candidates whose barcode is already in the store are silently dropped:
    /// first write wins across separate uploads. Duplicate barcodes *within*
    /// one batch are not cross-checked here; both rows count as accepted and
    /// both reach the store, whose uniqueness handling keeps the first.
    pub async fn ingest(&self, csv_text: &str) -> Result<IngestReport, IngestError> {
        let candidates = parse_batch(csv_text, self.clock.now())?;

        let mut fresh = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if self.store.lookup(candidate.barcode).await?.is_none() {
                fresh.push(candidate);
            }
        }

        if fresh.is_empty() {
            return Ok(IngestReport { accepted: 0 });
        }

        let accepted = fresh.len();
        self.store.insert_new(fresh).await?;
        tracing::debug!(accepted, "csv batch ingested");
        Ok(IngestReport { accepted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use stocktake_core::{Barcode, FixedClock};
    use std::sync::Arc;

    use crate::store::InMemoryInventoryStore;

    fn engine(
        store: Arc<InMemoryInventoryStore>,
    ) -> IngestionEngine<Arc<InMemoryInventoryStore>, FixedClock> {
        let clock = FixedClock::at(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());
        IngestionEngine::new(store, clock)
    }

    #[tokio::test]
    async fn accepts_new_records_and_counts_them() {
        let store = Arc::new(InMemoryInventoryStore::new());
        let report = engine(store.clone())
            .ingest(
                "11111111-1111-1111-1111-111111111111,Aisle 5,Widget,2024-01-01\n\
                 22222222-2222-2222-2222-222222222222,Aisle 6,Gadget,2024-01-01",
            )
            .await
            .unwrap();

        assert_eq!(report.accepted, 2);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn reupload_of_identical_batch_accepts_nothing() {
        let store = Arc::new(InMemoryInventoryStore::new());
        let engine = engine(store.clone());
        let csv = "11111111-1111-1111-1111-111111111111,Aisle 5,Widget,2024-01-01";

        assert_eq!(engine.ingest(csv).await.unwrap().accepted, 1);
        assert_eq!(engine.ingest(csv).await.unwrap().accepted, 0);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn existing_barcode_is_never_overwritten() {
        let store = Arc::new(InMemoryInventoryStore::new());
        let engine = engine(store.clone());

        engine
            .ingest("11111111-1111-1111-1111-111111111111,Aisle 5,Widget,2024-01-01")
            .await
            .unwrap();
        engine
            .ingest("11111111-1111-1111-1111-111111111111,Aisle 9,Widget,2024-01-01")
            .await
            .unwrap();

        let barcode: Barcode = "11111111-1111-1111-1111-111111111111".parse().unwrap();
        let item = store.lookup(barcode).await.unwrap().unwrap();
        assert_eq!(item.storage_location, "Aisle 5");
    }

    #[tokio::test]
    async fn invalid_batch_persists_nothing() {
        let store = Arc::new(InMemoryInventoryStore::new());
        let err = engine(store.clone())
            .ingest(
                "11111111-1111-1111-1111-111111111111,Aisle 5,Widget,2024-01-01\n\
                 22222222-2222-2222-2222-222222222222,Aisle 6,Gadget,2030-01-01",
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            IngestError::Csv(CsvError::InvalidDate { line: 2, .. })
        ));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn batch_internal_duplicates_both_count_as_accepted() {
        // Two same-barcode rows in one batch both pass the not-in-store check.
        // The report counts both; the store keeps the first row.
        let store = Arc::new(InMemoryInventoryStore::new());
        let report = engine(store.clone())
            .ingest(
                "11111111-1111-1111-1111-111111111111,Aisle 5,Widget,2024-01-01\n\
                 11111111-1111-1111-1111-111111111111,Aisle 9,Widget,2024-01-01",
            )
            .await
            .unwrap();

        assert_eq!(report.accepted, 2);
        assert_eq!(store.len(), 1);
    }
}
