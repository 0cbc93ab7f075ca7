//! Verification engine: scan event → verdict, recording discrepancies.

use stocktake_core::Clock;
use stocktake_inventory::{classify, Discrepancy, DiscrepancyRecord, ScanEvent, Verdict};

use crate::store::{DiscrepancyStore, InventoryStore, StoreError};

/// Outcome of verifying a scan. `Discrepancy` carries the record that was
/// appended to the log before returning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    Match,
    Unknown,
    Discrepancy(DiscrepancyRecord),
}

/// Compares a scan against the recorded item and logs mismatches.
pub struct VerificationEngine<I, D, C> {
    inventory: I,
    discrepancies: D,
    clock: C,
}

impl<I, D, C> VerificationEngine<I, D, C>
where
    I: InventoryStore,
    D: DiscrepancyStore,
    C: Clock,
{
    pub fn new(inventory: I, discrepancies: D, clock: C) -> Self {
        Self {
            inventory,
            discrepancies,
            clock,
        }
    }

    /// Verify one scan event.
    ///
    /// On a location mismatch the discrepancy is committed with the engine's
    /// own clock reading; client clock skew never reaches the log.
    pub async fn verify(&self, scan: ScanEvent) -> Result<VerifyOutcome, StoreError> {
        let item = self.inventory.lookup(scan.barcode).await?;

        match classify(item.as_ref(), &scan.reported_location) {
            Verdict::Unknown => Ok(VerifyOutcome::Unknown),
            Verdict::Match => Ok(VerifyOutcome::Match),
            Verdict::Discrepancy => {
                let record = self
                    .discrepancies
                    .append(Discrepancy {
                        barcode: scan.barcode,
                        scanned_at: self.clock.now(),
                        actual_location: scan.reported_location,
                    })
                    .await?;
                tracing::info!(
                    barcode = %record.barcode,
                    actual_location = %record.actual_location,
                    "location discrepancy recorded"
                );
                Ok(VerifyOutcome::Discrepancy(record))
            }
        }
    }
}
