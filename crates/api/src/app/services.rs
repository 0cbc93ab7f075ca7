//! Infrastructure wiring: store selection and engine construction.

use std::sync::Arc;

use sqlx::PgPool;

use stocktake_core::{Clock, SystemClock};
use stocktake_infra::{
    store, DiscrepancyStore, IngestionEngine, InMemoryDiscrepancyStore, InMemoryInventoryStore,
    InventoryStore, PostgresDiscrepancyStore, PostgresInventoryStore, VerificationEngine,
};

/// Engines and stores shared by all request handlers.
///
/// The stores are type-erased so the router is identical for the in-memory
/// and persistent wirings.
pub struct AppServices {
    pub ingestion: IngestionEngine<Arc<dyn InventoryStore>, Arc<dyn Clock>>,
    pub verification:
        VerificationEngine<Arc<dyn InventoryStore>, Arc<dyn DiscrepancyStore>, Arc<dyn Clock>>,
    pub discrepancies: Arc<dyn DiscrepancyStore>,
}

fn wire(
    inventory: Arc<dyn InventoryStore>,
    discrepancies: Arc<dyn DiscrepancyStore>,
) -> AppServices {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    AppServices {
        ingestion: IngestionEngine::new(inventory.clone(), clock.clone()),
        verification: VerificationEngine::new(inventory, discrepancies.clone(), clock),
        discrepancies,
    }
}

/// In-memory wiring (dev/test).
pub fn build_in_memory_services() -> AppServices {
    wire(
        Arc::new(InMemoryInventoryStore::new()),
        Arc::new(InMemoryDiscrepancyStore::new()),
    )
}

/// Postgres wiring; connects and makes sure the schema exists.
pub async fn build_persistent_services() -> AppServices {
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set when USE_PERSISTENT_STORES=true");

    let pool = PgPool::connect(&database_url)
        .await
        .expect("failed to connect to Postgres");

    store::ensure_schema(&pool)
        .await
        .expect("failed to prepare Postgres schema");

    wire(
        Arc::new(PostgresInventoryStore::new(pool.clone())),
        Arc::new(PostgresDiscrepancyStore::new(pool)),
    )
}

/// Pick the store wiring from the environment.
///
/// `USE_PERSISTENT_STORES=true` selects Postgres (requires `DATABASE_URL`);
/// anything else selects the in-memory stores.
pub async fn build_services() -> AppServices {
    let use_persistent = std::env::var("USE_PERSISTENT_STORES")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    if use_persistent {
        tracing::info!("using persistent stores");
        build_persistent_services().await
    } else {
        tracing::info!("using in-memory stores");
        build_in_memory_services()
    }
}
