//! Discrepancy query filtering.

use chrono::NaiveDate;

use crate::record::DiscrepancyRecord;

/// Optional filters over the discrepancy log. All supplied filters must hold
/// (AND semantics); omitted filters impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscrepancyFilter {
    /// Match records scanned on this calendar date (UTC); time of day ignored.
    pub scanned_on: Option<NaiveDate>,
    /// Match records with exactly this reported location.
    pub location: Option<String>,
}

impl DiscrepancyFilter {
    /// Whether a record satisfies every supplied filter.
    ///
    /// Shared by the in-memory store and tests; the Postgres store expresses
    /// the same predicate in SQL.
    pub fn matches(&self, record: &DiscrepancyRecord) -> bool {
        if let Some(date) = self.scanned_on {
            if record.scanned_at.date_naive() != date {
                return false;
            }
        }
        if let Some(location) = &self.location {
            if &record.actual_location != location {
                return false;
            }
        }
        true
    }
}
