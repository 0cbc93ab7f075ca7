//! Scan verdict classification.
//!
//! The pure half of verification: given what the store knows about a barcode
//! and the location a scan reports, decide the outcome. Recording the
//! discrepancy is the engine's job.

use crate::record::InventoryItem;

/// Outcome of comparing a scan against the recorded item.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The reported location matches the recorded one (case-insensitively).
    Match,
    /// The item exists but the reported location differs.
    Discrepancy,
    /// No item is recorded for the barcode.
    Unknown,
}

/// Case-insensitive location equality.
///
/// Tolerates operator data-entry variance ("Aisle 5" vs "aisle 5") without
/// weakening the semantic check.
pub fn locations_match(recorded: &str, reported: &str) -> bool {
    recorded.to_lowercase() == reported.to_lowercase()
}

/// Classify a scan against the stored item, if any.
pub fn classify(item: Option<&InventoryItem>, reported_location: &str) -> Verdict {
    match item {
        None => Verdict::Unknown,
        Some(item) if locations_match(&item.storage_location, reported_location) => Verdict::Match,
        Some(_) => Verdict::Discrepancy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stocktake_core::Barcode;

    fn item_at(location: &str) -> InventoryItem {
        InventoryItem {
            barcode: Barcode::new(),
            storage_location: location.to_string(),
            description: "Widget".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn missing_item_is_unknown() {
        assert_eq!(classify(None, "Aisle 5"), Verdict::Unknown);
    }

    #[test]
    fn same_location_different_case_is_match() {
        let item = item_at("Aisle 5");
        assert_eq!(classify(Some(&item), "aisle 5"), Verdict::Match);
        assert_eq!(classify(Some(&item), "AISLE 5"), Verdict::Match);
    }

    #[test]
    fn different_location_is_discrepancy() {
        let item = item_at("Aisle 5");
        assert_eq!(classify(Some(&item), "Aisle 9"), Verdict::Discrepancy);
    }

    #[test]
    fn whitespace_is_significant() {
        let item = item_at("Aisle 5");
        assert_eq!(classify(Some(&item), "Aisle  5"), Verdict::Discrepancy);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        /// Flip the case of each ASCII letter according to the mask bits.
        fn with_case_flips(s: &str, mask: u64) -> String {
            s.chars()
                .enumerate()
                .map(|(i, c)| {
                    if mask & (1 << (i % 64)) != 0 {
                        if c.is_ascii_lowercase() {
                            c.to_ascii_uppercase()
                        } else {
                            c.to_ascii_lowercase()
                        }
                    } else {
                        c
                    }
                })
                .collect()
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 512,
                ..ProptestConfig::default()
            })]

            /// Property: any case permutation of the recorded location still
            /// classifies as a match.
            #[test]
            fn case_permutations_always_match(
                location in "[A-Za-z][A-Za-z0-9 ]{0,30}",
                mask in any::<u64>(),
            ) {
                let item = item_at(&location);
                let reported = with_case_flips(&location, mask);
                prop_assert_eq!(classify(Some(&item), &reported), Verdict::Match);
            }

            /// Property: classification is deterministic.
            #[test]
            fn classification_is_deterministic(
                recorded in "[A-Za-z0-9 ]{1,30}",
                reported in "[A-Za-z0-9 ]{1,30}",
            ) {
                let item = item_at(&recorded);
                let first = classify(Some(&item), &reported);
                let second = classify(Some(&item), &reported);
                prop_assert_eq!(first, second);
            }
        }
    }
}
