use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use stocktake_core::Barcode;
use stocktake_inventory::{Discrepancy, DiscrepancyFilter, DiscrepancyRecord, InventoryItem};

use super::{DiscrepancyStore, InventoryStore, StoreError};

fn poisoned() -> StoreError {
    StoreError::Unavailable("store lock poisoned".to_string())
}

/// In-memory barcode-to-item map.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    items: RwLock<HashMap<Barcode, InventoryItem>>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn lookup(&self, barcode: Barcode) -> Result<Option<InventoryItem>, StoreError> {
        let map = self.items.read().map_err(|_| poisoned())?;
        Ok(map.get(&barcode).cloned())
    }

    async fn insert_new(&self, items: Vec<InventoryItem>) -> Result<(), StoreError> {
        // One write lock for the whole batch: uniqueness check and insert are
        // atomic against concurrent uploads of the same barcode.
        let mut map = self.items.write().map_err(|_| poisoned())?;
        for item in items {
            map.entry(item.barcode).or_insert(item);
        }
        Ok(())
    }
}

/// In-memory append-only discrepancy log.
#[derive(Debug, Default)]
pub struct InMemoryDiscrepancyStore {
    records: RwLock<Vec<DiscrepancyRecord>>,
}

impl InMemoryDiscrepancyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DiscrepancyStore for InMemoryDiscrepancyStore {
    async fn append(&self, discrepancy: Discrepancy) -> Result<DiscrepancyRecord, StoreError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        // Records are never deleted, so length + 1 is monotonically increasing.
        let id = records.len() as i64 + 1;
        let record = DiscrepancyRecord::from_uncommitted(id, discrepancy);
        records.push(record.clone());
        Ok(record)
    }

    async fn query(&self, filter: &DiscrepancyFilter) -> Result<Vec<DiscrepancyRecord>, StoreError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.iter().filter(|r| filter.matches(r)).cloned().collect())
    }
}
