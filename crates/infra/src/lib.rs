//! Infrastructure: store abstractions and the engines that drive the domain
//! logic against them.
//!
//! The stores come in two flavours behind the same traits: in-memory
//! (tests/dev) and Postgres (production). The engines only ever see the
//! traits.

pub mod ingest;
pub mod store;
pub mod verify;

pub use ingest::{IngestError, IngestReport, IngestionEngine};
pub use store::{
    DiscrepancyStore, InMemoryDiscrepancyStore, InMemoryInventoryStore, InventoryStore,
    PostgresDiscrepancyStore, PostgresInventoryStore, StoreError,
};
pub use verify::{VerificationEngine, VerifyOutcome};
