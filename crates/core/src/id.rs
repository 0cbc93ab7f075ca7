//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Barcode of a physical inventory item: a 128-bit unique identifier.
///
/// The nil (all-zero) UUID is a sentinel for "no barcode" and is rejected by
/// every constructor, including deserialization.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Uuid", into = "Uuid")]
pub struct Barcode(Uuid);

impl Barcode {
    /// Mint a fresh barcode.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer fixed barcodes in tests for
    /// determinism.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wrap an existing identifier, rejecting the nil sentinel.
    pub fn from_uuid(uuid: Uuid) -> Result<Self, DomainError> {
        if uuid.is_nil() {
            return Err(DomainError::invalid_id("barcode cannot be the nil identifier"));
        }
        Ok(Self(uuid))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl core::fmt::Display for Barcode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<Uuid> for Barcode {
    type Error = DomainError;

    fn try_from(value: Uuid) -> Result<Self, Self::Error> {
        Self::from_uuid(value)
    }
}

impl From<Barcode> for Uuid {
    fn from(value: Barcode) -> Self {
        value.0
    }
}

impl FromStr for Barcode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s)
            .map_err(|e| DomainError::invalid_id(format!("Barcode: {e}")))?;
        Self::from_uuid(uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_form() {
        let barcode: Barcode = "11111111-1111-1111-1111-111111111111".parse().unwrap();
        assert_eq!(barcode.to_string(), "11111111-1111-1111-1111-111111111111");
    }

    #[test]
    fn rejects_nil_sentinel() {
        let err = "00000000-0000-0000-0000-000000000000"
            .parse::<Barcode>()
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
        assert!(Barcode::from_uuid(Uuid::nil()).is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!("not-a-barcode".parse::<Barcode>().is_err());
    }
}
