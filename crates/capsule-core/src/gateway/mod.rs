//! Persistence gateway
//!
//! - [`AttributeStore`]: the key/attribute store contract (load, put, scan,
//!   count, secondary-index query)
//! - [`MemoryStore`]: in-memory implementation of that contract
//! - [`CapsuleGateway`] / [`CapsuleRepository`]: capsule-level persistence
//!   operations built on any `AttributeStore`
//!
//! The durable SQLite implementation lives in the `capsule-store` crate.

pub mod memory;
pub mod query;
pub mod repository;
pub mod schema;
pub mod store;

/// Attribute map as held by a key/attribute store
pub type Item = serde_json::Map<String, serde_json::Value>;

pub use memory::MemoryStore;
pub use query::{Condition, IndexQuery, KeyCondition, Projection, QueryCriteria, ResolvedQuery};
pub use repository::{CapsuleGateway, CapsuleRepository};
pub use schema::{IndexSchema, KeySchema, PrimaryKey, TableSchema};
pub use store::AttributeStore;
