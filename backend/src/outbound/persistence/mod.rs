//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Provides the [`EntityStore`](crate::domain::ports::EntityStore) port over
//! PostgreSQL via Diesel with async support through `diesel-async` and `bb8`
//! connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapter**: the store only translates between rows and
//!   documents. The occupancy rules live in the domain.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: database failures map onto
//!   `EntityStoreError` variants.
//!
//! # Example
//!
//! ```ignore
//! use marina::outbound::persistence::{DbPool, DieselEntityStore, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/marina")).await?;
//! let store = DieselEntityStore::new(pool);
//! ```

mod diesel_entity_store;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_entity_store::DieselEntityStore;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
