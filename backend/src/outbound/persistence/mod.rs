//! PostgreSQL persistence adapter using Diesel.
//!
//! - Thin adapter: [`DieselParcelRepository`] only translates between Diesel
//!   rows and domain parcels.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   private to this module.
//! - Connections come from a `bb8` pool through `diesel-async`.
//!
//! ```no_run
//! use swissparcel::outbound::persistence::{DbPool, DieselParcelRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/parcels")).await?;
//! let repository = DieselParcelRepository::new(pool);
//! # let _ = repository;
//! # Ok(())
//! # }
//! ```

mod diesel_parcel_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_parcel_repository::DieselParcelRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DEFAULT_MAX_CONNECTIONS, DbPool, PoolConfig, PoolError};
