//! SQLite-backed key/attribute store
//!
//! Items of every table share the `items` relation, keyed by
//! (table, hash key, range key) with the attribute map stored as JSON.
//! Secondary indexes live in `index_entries` and are rewritten in the same
//! transaction as their item, so an index query never sees a stale entry.
//! Tables without a range key store `''` in the range column.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use capsule_core::errors::{ExError, ExErrorKind};
use capsule_core::gateway::{
    AttributeStore, IndexQuery, Item, PrimaryKey, Projection, TableSchema,
};
use rusqlite::{Connection, OptionalExtension};

use crate::db;
use crate::errors::{from_rusqlite, serialization_error, Result};
use crate::migrations::apply_migrations;

/// Durable `AttributeStore` over one SQLite connection
///
/// The connection sits behind a mutex held for a single store call.
pub struct SqliteStore {
    schema: TableSchema,
    conn: Mutex<Connection>,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Wrap a connection whose schema is already migrated
    pub fn new(conn: Connection, schema: TableSchema) -> Self {
        Self {
            schema,
            conn: Mutex::new(conn),
        }
    }

    /// Open (or create) a database file, configure it and apply migrations
    ///
    /// # Errors
    ///
    /// Returns `Io` or `Persistence` when the file cannot be opened or
    /// migrated.
    pub fn open(path: impl AsRef<Path>, schema: TableSchema) -> Result<Self> {
        let mut conn = db::open(path)?;
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self::new(conn, schema))
    }

    /// Migrated in-memory database
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if migrations fail.
    pub fn open_in_memory(schema: TableSchema) -> Result<Self> {
        let mut conn = db::open_in_memory()?;
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self::new(conn, schema))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| {
            ExError::new(ExErrorKind::Internal)
                .with_op("sqlite_store")
                .with_message("connection lock poisoned")
        })
    }

    fn range_column(range: Option<&str>) -> &str {
        range.unwrap_or("")
    }
}

fn decode(op: &str, json: &str) -> Result<Item> {
    serde_json::from_str(json).map_err(|e| serialization_error(op, e))
}

impl AttributeStore for SqliteStore {
    fn schema(&self) -> &TableSchema {
        &self.schema
    }

    fn load(&self, key: &PrimaryKey) -> Result<Option<Item>> {
        self.schema.check_key(key)?;
        let conn = self.lock()?;

        let json: Option<String> = conn
            .query_row(
                "SELECT attributes FROM items
                 WHERE table_name = ?1 AND hash_key = ?2 AND range_key = ?3",
                rusqlite::params![
                    self.schema.name,
                    key.hash,
                    Self::range_column(key.range.as_deref())
                ],
                |row| row.get(0),
            )
            .optional()
            .map_err(from_rusqlite)?;

        json.map(|j| decode("load", &j)).transpose()
    }

    fn put(&self, item: Item) -> Result<()> {
        let key = self.schema.key_of(&item)?;
        let range_key = Self::range_column(key.range.as_deref());
        let json = serde_json::to_string(&item).map_err(|e| serialization_error("put", e))?;

        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(from_rusqlite)?;

        tx.execute(
            "INSERT INTO items (table_name, hash_key, range_key, attributes)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(table_name, hash_key, range_key) DO UPDATE SET
                attributes = excluded.attributes",
            rusqlite::params![self.schema.name, key.hash, range_key, json],
        )
        .map_err(from_rusqlite)?;

        tx.execute(
            "DELETE FROM index_entries
             WHERE table_name = ?1 AND item_hash_key = ?2 AND item_range_key = ?3",
            rusqlite::params![self.schema.name, key.hash, range_key],
        )
        .map_err(from_rusqlite)?;

        for index in &self.schema.indexes {
            let Some((hash_value, range_value)) = index.entry_for(&item) else {
                continue;
            };
            tx.execute(
                "INSERT INTO index_entries
                    (table_name, index_name, hash_value, range_value, item_hash_key, item_range_key)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    self.schema.name,
                    index.name,
                    hash_value,
                    Self::range_column(range_value.as_deref()),
                    key.hash,
                    range_key
                ],
            )
            .map_err(from_rusqlite)?;
        }

        tx.commit().map_err(from_rusqlite)?;
        tracing::debug!(table = %self.schema.name, key = %key, "item saved");

        Ok(())
    }

    fn scan(&self, projection: Option<&Projection>) -> Result<Vec<Item>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT attributes FROM items
                 WHERE table_name = ?1
                 ORDER BY hash_key, range_key",
            )
            .map_err(from_rusqlite)?;

        let rows = stmt
            .query_map([&self.schema.name], |row| row.get::<_, String>(0))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        rows.iter()
            .map(|json| {
                let item = decode("scan", json)?;
                Ok(match projection {
                    Some(p) => p.apply(&item),
                    None => item,
                })
            })
            .collect()
    }

    fn count(&self) -> Result<u64> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM items WHERE table_name = ?1",
                [&self.schema.name],
                |row| row.get(0),
            )
            .map_err(from_rusqlite)?;
        Ok(count.max(0) as u64)
    }

    fn query(&self, query: &IndexQuery) -> Result<Vec<Item>> {
        let resolved = query.resolve(&self.schema)?;

        let mut sql = String::from(
            "SELECT i.attributes FROM index_entries e
             JOIN items i
               ON i.table_name = e.table_name
              AND i.hash_key = e.item_hash_key
              AND i.range_key = e.item_range_key
             WHERE e.table_name = ?1 AND e.index_name = ?2 AND e.hash_value = ?3",
        );
        let mut params: Vec<&str> = vec![
            self.schema.name.as_str(),
            resolved.index.name.as_str(),
            resolved.hash_value,
        ];
        if let Some(range_value) = resolved.range_value {
            sql.push_str(" AND e.range_value = ?4");
            params.push(range_value);
        }
        sql.push_str(" ORDER BY e.range_value, e.item_hash_key, e.item_range_key");
        tracing::debug!(index = %resolved.index.name, params = ?params, "index query");

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(params.iter()), |row| {
                row.get::<_, String>(0)
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        rows.iter().map(|json| decode("query", json)).collect()
    }
}
