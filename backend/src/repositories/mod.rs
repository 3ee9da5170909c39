//! Database repositories
//!
//! Provides the data access layer. Services talk to the [`UserStore`] and
//! [`TruckStore`] traits; Postgres and in-memory implementations live in the
//! submodules.

pub mod memory;
pub mod truck;
pub mod user;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

pub use memory::MemoryStore;
pub use truck::PgTruckStore;
pub use user::PgUserStore;

/// Store failure
#[derive(Error, Debug)]
pub enum StoreError {
    /// A uniqueness constraint was violated; carries what was duplicated
    #[error("{0} already exists")]
    Duplicate(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// User record from the store
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub has_truck: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or replacing a user
///
/// On update the hash is always written, so callers pass the stored hash
/// through when the password does not change.
#[derive(Debug, Clone)]
pub struct UserInput {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub has_truck: bool,
}

/// Truck record from the store
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TruckRecord {
    pub id: i32,
    pub name: String,
    pub cell: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or replacing a truck
#[derive(Debug, Clone, Default)]
pub struct TruckInput {
    pub name: String,
    pub cell: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

/// Credential store: users and their password hashes
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, input: UserInput) -> StoreResult<UserRecord>;

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<UserRecord>>;

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<UserRecord>>;

    /// Replace a user; `None` when no user has this id
    async fn update(&self, id: i32, input: UserInput) -> StoreResult<Option<UserRecord>>;

    /// Returns whether a user was removed
    async fn delete(&self, id: i32) -> StoreResult<bool>;

    /// Cheap liveness probe for readiness checks
    async fn ping(&self) -> StoreResult<()>;
}

#[async_trait]
pub trait TruckStore: Send + Sync {
    async fn create(&self, input: TruckInput) -> StoreResult<TruckRecord>;

    async fn find_by_id(&self, id: i32) -> StoreResult<Option<TruckRecord>>;

    /// Page of trucks ordered by id
    async fn list(&self, start: i64, count: i64) -> StoreResult<Vec<TruckRecord>>;

    async fn update(&self, id: i32, input: TruckInput) -> StoreResult<Option<TruckRecord>>;

    async fn delete(&self, id: i32) -> StoreResult<bool>;
}
