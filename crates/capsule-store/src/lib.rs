//! Capsule Store - durable key/attribute store on SQLite
//!
//! Provides:
//! - `SqliteStore`, an `AttributeStore` with transactional secondary indexes
//! - Connection helpers
//! - Embedded, checksummed schema migrations

pub mod db;
pub mod errors;
pub mod migrations;
pub mod sqlite_store;

// Re-export key types
pub use errors::Result;
pub use sqlite_store::SqliteStore;
