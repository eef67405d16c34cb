//! Outbound adapters implementing the parcel repository port.
//!
//! - **memory**: ordered in-process store, used when no database is
//!   configured and throughout the tests.
//! - **persistence**: PostgreSQL store via Diesel.
//!
//! Adapters translate between domain types and storage representations and
//! contain no business logic.

pub mod memory;
pub mod persistence;

pub use memory::InMemoryParcelRepository;
