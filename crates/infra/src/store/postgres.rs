//! Postgres-backed stores.
//!
//! Schema contract:
//!
//! ```sql
//! inventory_items(barcode UUID PRIMARY KEY,
//!                 storage_location TEXT NOT NULL,
//!                 description TEXT NOT NULL,
//!                 created_at TIMESTAMPTZ NOT NULL)
//! discrepancy_records(id BIGSERIAL PRIMARY KEY,
//!                     barcode UUID NOT NULL,
//!                     scanned_at TIMESTAMPTZ NOT NULL,
//!                     actual_location TEXT NOT NULL)
//! ```
//!
//! The primary key on `barcode` plus `ON CONFLICT DO NOTHING` makes the
//! insert path safe against concurrent uploads racing the engine's existence
//! check.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use stocktake_core::Barcode;
use stocktake_inventory::{Discrepancy, DiscrepancyFilter, DiscrepancyRecord, InventoryItem};

use super::{DiscrepancyStore, InventoryStore, StoreError};

/// Create the tables if they do not exist yet.
///
/// Called once at startup when persistent stores are selected.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS inventory_items (
            barcode UUID PRIMARY KEY,
            storage_location TEXT NOT NULL,
            description TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS discrepancy_records (
            id BIGSERIAL PRIMARY KEY,
            barcode UUID NOT NULL,
            scanned_at TIMESTAMPTZ NOT NULL,
            actual_location TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Postgres barcode-to-item store.
pub struct PostgresInventoryStore {
    pool: PgPool,
}

impl PostgresInventoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn barcode_from_row(raw: uuid::Uuid) -> Result<Barcode, StoreError> {
    Barcode::from_uuid(raw).map_err(|e| StoreError::Corrupt(e.to_string()))
}

#[async_trait]
impl InventoryStore for PostgresInventoryStore {
    async fn lookup(&self, barcode: Barcode) -> Result<Option<InventoryItem>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT barcode, storage_location, description, created_at
            FROM inventory_items
            WHERE barcode = $1
            "#,
        )
        .bind(barcode.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| {
            Ok(InventoryItem {
                barcode: barcode_from_row(row.try_get("barcode")?)?,
                storage_location: row.try_get("storage_location")?,
                description: row.try_get("description")?,
                created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
            })
        })
        .transpose()
    }

    async fn insert_new(&self, items: Vec<InventoryItem>) -> Result<(), StoreError> {
        // One transaction per batch: all-or-nothing durability.
        let mut tx = self.pool.begin().await?;
        for item in items {
            sqlx::query(
                r#"
                INSERT INTO inventory_items (barcode, storage_location, description, created_at)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (barcode) DO NOTHING
                "#,
            )
            .bind(item.barcode.as_uuid())
            .bind(&item.storage_location)
            .bind(&item.description)
            .bind(item.created_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}

/// Postgres append-only discrepancy log.
pub struct PostgresDiscrepancyStore {
    pool: PgPool,
}

impl PostgresDiscrepancyStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DiscrepancyStore for PostgresDiscrepancyStore {
    async fn append(&self, discrepancy: Discrepancy) -> Result<DiscrepancyRecord, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO discrepancy_records (barcode, scanned_at, actual_location)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(discrepancy.barcode.as_uuid())
        .bind(discrepancy.scanned_at)
        .bind(&discrepancy.actual_location)
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = row.try_get("id")?;
        Ok(DiscrepancyRecord::from_uncommitted(id, discrepancy))
    }

    async fn query(&self, filter: &DiscrepancyFilter) -> Result<Vec<DiscrepancyRecord>, StoreError> {
        // Same predicate as `DiscrepancyFilter::matches`, pushed down to SQL.
        // The date comparison is against the UTC calendar date.
        let rows = sqlx::query(
            r#"
            SELECT id, barcode, scanned_at, actual_location
            FROM discrepancy_records
            WHERE ($1::date IS NULL OR (scanned_at AT TIME ZONE 'UTC')::date = $1)
              AND ($2::text IS NULL OR actual_location = $2)
            ORDER BY id
            "#,
        )
        .bind(filter.scanned_on)
        .bind(filter.location.as_deref())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(DiscrepancyRecord {
                    id: row.try_get("id")?,
                    barcode: barcode_from_row(row.try_get("barcode")?)?,
                    scanned_at: row.try_get::<DateTime<Utc>, _>("scanned_at")?,
                    actual_location: row.try_get("actual_location")?,
                })
            })
            .collect()
    }
}
