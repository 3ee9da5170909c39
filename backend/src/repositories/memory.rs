//! In-memory store
//!
//! Implements both store traits over a single lock. Used by the test-suite
//! and by `database.backend = "memory"` for local runs without Postgres.

use super::{
    StoreError, StoreResult, TruckInput, TruckRecord, TruckStore, UserInput, UserRecord,
    UserStore,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    users: BTreeMap<i32, UserRecord>,
    trucks: BTreeMap<i32, TruckRecord>,
    // Sequences only move forward, like SERIAL columns
    last_user_id: i32,
    last_truck_id: i32,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn username_taken(tables: &Tables, username: &str, except: Option<i32>) -> bool {
    tables
        .users
        .values()
        .any(|u| u.username == username && Some(u.id) != except)
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, input: UserInput) -> StoreResult<UserRecord> {
        let mut tables = self.tables.write().await;
        if username_taken(&tables, &input.username, None) {
            return Err(StoreError::Duplicate("Username".to_string()));
        }

        tables.last_user_id += 1;
        let now = Utc::now();
        let record = UserRecord {
            id: tables.last_user_id,
            username: input.username,
            password_hash: input.password_hash,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            has_truck: input.has_truck,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<UserRecord>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<UserRecord>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn update(&self, id: i32, input: UserInput) -> StoreResult<Option<UserRecord>> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&id) {
            return Ok(None);
        }
        if username_taken(&tables, &input.username, Some(id)) {
            return Err(StoreError::Duplicate("Username".to_string()));
        }

        let Some(user) = tables.users.get_mut(&id) else {
            return Ok(None);
        };
        user.username = input.username;
        user.password_hash = input.password_hash;
        user.first_name = input.first_name;
        user.last_name = input.last_name;
        user.email = input.email;
        user.has_truck = input.has_truck;
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: i32) -> StoreResult<bool> {
        Ok(self.tables.write().await.users.remove(&id).is_some())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[async_trait]
impl TruckStore for MemoryStore {
    async fn create(&self, input: TruckInput) -> StoreResult<TruckRecord> {
        let mut tables = self.tables.write().await;
        tables.last_truck_id += 1;
        let now = Utc::now();
        let record = TruckRecord {
            id: tables.last_truck_id,
            name: input.name,
            cell: input.cell,
            address: input.address,
            city: input.city,
            state: input.state,
            zip: input.zip,
            created_at: now,
            updated_at: now,
        };
        tables.trucks.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<TruckRecord>> {
        Ok(self.tables.read().await.trucks.get(&id).cloned())
    }

    async fn list(&self, start: i64, count: i64) -> StoreResult<Vec<TruckRecord>> {
        let start = usize::try_from(start).unwrap_or(0);
        let count = usize::try_from(count).unwrap_or(0);
        let tables = self.tables.read().await;
        Ok(tables
            .trucks
            .values()
            .skip(start)
            .take(count)
            .cloned()
            .collect())
    }

    async fn update(&self, id: i32, input: TruckInput) -> StoreResult<Option<TruckRecord>> {
        let mut tables = self.tables.write().await;
        let Some(truck) = tables.trucks.get_mut(&id) else {
            return Ok(None);
        };
        truck.name = input.name;
        truck.cell = input.cell;
        truck.address = input.address;
        truck.city = input.city;
        truck.state = input.state;
        truck.zip = input.zip;
        truck.updated_at = Utc::now();
        Ok(Some(truck.clone()))
    }

    async fn delete(&self, id: i32) -> StoreResult<bool> {
        Ok(self.tables.write().await.trucks.remove(&id).is_some())
    }
}
