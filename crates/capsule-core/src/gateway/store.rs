//! Key/attribute store contract

use std::sync::Arc;

use super::query::{IndexQuery, Projection};
use super::schema::{PrimaryKey, TableSchema};
use super::Item;
use crate::errors::Result;

/// A single-table key/attribute store with secondary-index queries
///
/// Implementations own the consistency of their secondary indexes. No
/// operation retries; any fault is returned to the caller as-is.
pub trait AttributeStore: Send + Sync {
    /// Key and index layout of the table
    fn schema(&self) -> &TableSchema;

    /// Point lookup by primary key
    ///
    /// # Errors
    ///
    /// Returns `KeySchemaMismatch` when the key shape disagrees with the table
    /// key schema. An absent item is `Ok(None)`, not an error.
    fn load(&self, key: &PrimaryKey) -> Result<Option<Item>>;

    /// Unconditional upsert keyed by the item's key attributes
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when a key attribute is missing or not a string.
    fn put(&self, item: Item) -> Result<()>;

    /// All items in primary-key order, optionally reduced to a projection
    ///
    /// # Errors
    ///
    /// Returns a backend fault (`Persistence`, `Serialization`, ...).
    fn scan(&self, projection: Option<&Projection>) -> Result<Vec<Item>>;

    /// Number of items in the table
    ///
    /// # Errors
    ///
    /// Returns a backend fault.
    fn count(&self) -> Result<u64>;

    /// Equality query on a secondary index
    ///
    /// Results are ordered by index range value, then primary key.
    ///
    /// # Errors
    ///
    /// Returns `UnknownIndex` for an undeclared index and `KeySchemaMismatch`
    /// when the conditions do not name the index keys.
    fn query(&self, query: &IndexQuery) -> Result<Vec<Item>>;
}

impl<S: AttributeStore + ?Sized> AttributeStore for Arc<S> {
    fn schema(&self) -> &TableSchema {
        (**self).schema()
    }

    fn load(&self, key: &PrimaryKey) -> Result<Option<Item>> {
        (**self).load(key)
    }

    fn put(&self, item: Item) -> Result<()> {
        (**self).put(item)
    }

    fn scan(&self, projection: Option<&Projection>) -> Result<Vec<Item>> {
        (**self).scan(projection)
    }

    fn count(&self) -> Result<u64> {
        (**self).count()
    }

    fn query(&self, query: &IndexQuery) -> Result<Vec<Item>> {
        (**self).query(query)
    }
}
