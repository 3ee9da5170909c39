//! Truck repository for database operations

use super::{StoreResult, TruckInput, TruckRecord, TruckStore};
use async_trait::async_trait;
use sqlx::PgPool;

const TRUCK_COLUMNS: &str = "id, name, cell, address, city, state, zip, created_at, updated_at";

/// Postgres-backed truck store
#[derive(Clone)]
pub struct PgTruckStore {
    pool: PgPool,
}

impl PgTruckStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TruckStore for PgTruckStore {
    async fn create(&self, input: TruckInput) -> StoreResult<TruckRecord> {
        let truck = sqlx::query_as::<_, TruckRecord>(&format!(
            r#"
            INSERT INTO trucks (name, cell, address, city, state, zip)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {TRUCK_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(&input.cell)
        .bind(&input.address)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.zip)
        .fetch_one(&self.pool)
        .await?;

        Ok(truck)
    }

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<TruckRecord>> {
        let truck = sqlx::query_as::<_, TruckRecord>(&format!(
            "SELECT {TRUCK_COLUMNS} FROM trucks WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(truck)
    }

    async fn list(&self, start: i64, count: i64) -> StoreResult<Vec<TruckRecord>> {
        let trucks = sqlx::query_as::<_, TruckRecord>(&format!(
            "SELECT {TRUCK_COLUMNS} FROM trucks ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(count)
        .bind(start)
        .fetch_all(&self.pool)
        .await?;

        Ok(trucks)
    }

    async fn update(&self, id: i32, input: TruckInput) -> StoreResult<Option<TruckRecord>> {
        let truck = sqlx::query_as::<_, TruckRecord>(&format!(
            r#"
            UPDATE trucks SET
                name = $2,
                cell = $3,
                address = $4,
                city = $5,
                state = $6,
                zip = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {TRUCK_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.cell)
        .bind(&input.address)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.zip)
        .fetch_optional(&self.pool)
        .await?;

        Ok(truck)
    }

    async fn delete(&self, id: i32) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM trucks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
