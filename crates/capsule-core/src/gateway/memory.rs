use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::query::{IndexQuery, Projection};
use super::schema::{PrimaryKey, TableSchema};
use super::store::AttributeStore;
use super::Item;
use crate::errors::{ExError, ExErrorKind, Result};

/// In-memory key/attribute store
///
/// A `BTreeMap` keyed by primary key, so scans come back in key order.
/// Index queries filter the whole table; there is no separate index
/// structure to keep consistent. The lock is held for a single call only.
#[derive(Debug)]
pub struct MemoryStore {
    schema: TableSchema,
    items: RwLock<BTreeMap<PrimaryKey, Item>>,
}

impl MemoryStore {
    /// Create a new empty store for the given table
    pub fn new(schema: TableSchema) -> Self {
        Self {
            schema,
            items: RwLock::new(BTreeMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<PrimaryKey, Item>>> {
        self.items.read().map_err(|_| poisoned())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<PrimaryKey, Item>>> {
        self.items.write().map_err(|_| poisoned())
    }
}

fn poisoned() -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op("memory_store")
        .with_message("store lock poisoned")
}

impl AttributeStore for MemoryStore {
    fn schema(&self) -> &TableSchema {
        &self.schema
    }

    fn load(&self, key: &PrimaryKey) -> Result<Option<Item>> {
        self.schema.check_key(key)?;
        Ok(self.read()?.get(key).cloned())
    }

    fn put(&self, item: Item) -> Result<()> {
        let key = self.schema.key_of(&item)?;
        self.write()?.insert(key, item);
        Ok(())
    }

    fn scan(&self, projection: Option<&Projection>) -> Result<Vec<Item>> {
        let items = self.read()?;
        Ok(items
            .values()
            .map(|item| match projection {
                Some(p) => p.apply(item),
                None => item.clone(),
            })
            .collect())
    }

    fn count(&self) -> Result<u64> {
        Ok(self.read()?.len() as u64)
    }

    fn query(&self, query: &IndexQuery) -> Result<Vec<Item>> {
        let resolved = query.resolve(&self.schema)?;
        let items = self.read()?;

        let mut hits: Vec<(Option<String>, Item)> = items
            .values()
            .filter(|item| resolved.matches(item))
            .map(|item| {
                let range = resolved.index.entry_for(item).and_then(|(_, r)| r);
                (range, item.clone())
            })
            .collect();
        // stable: ties keep primary-key order
        hits.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(hits.into_iter().map(|(_, item)| item).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: serde_json::Value) -> Item {
        value.as_object().cloned().unwrap()
    }

    fn store() -> MemoryStore {
        MemoryStore::new(TableSchema::capsules("Capsule", "topicGSI"))
    }

    #[test]
    fn test_put_then_load() {
        let store = store();
        store
            .put(item(json!({"capsuleId": "c1", "title": "One"})))
            .unwrap();

        let loaded = store.load(&PrimaryKey::hash("c1")).unwrap().unwrap();
        assert_eq!(loaded["title"], "One");
        assert!(store.load(&PrimaryKey::hash("c2")).unwrap().is_none());
    }

    #[test]
    fn test_put_overwrites_whole_item() {
        let store = store();
        store
            .put(item(json!({"capsuleId": "c1", "title": "One", "author": "a"})))
            .unwrap();
        store
            .put(item(json!({"capsuleId": "c1", "title": "Two"})))
            .unwrap();

        let loaded = store.load(&PrimaryKey::hash("c1")).unwrap().unwrap();
        assert_eq!(loaded["title"], "Two");
        assert!(!loaded.contains_key("author"));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_query_orders_by_range_then_key() {
        let store = store();
        for (id, topic) in [("c3", "AI"), ("c1", "RUST"), ("c2", "AI")] {
            store
                .put(item(json!({"capsuleId": id, "status": "SUBMITTED", "topicCode": topic})))
                .unwrap();
        }

        let hits = store
            .query(&IndexQuery::on("topicGSI").eq("status", "SUBMITTED"))
            .unwrap();
        let ids: Vec<&str> = hits
            .iter()
            .map(|i| i["capsuleId"].as_str().unwrap())
            .collect();

        assert_eq!(ids, vec!["c2", "c3", "c1"]);
    }

    #[test]
    fn test_composite_lookup_on_ranged_table() {
        let store = MemoryStore::new(
            TableSchema::capsules("Capsule", "topicGSI").with_range_key("topicCode"),
        );
        store
            .put(item(json!({"capsuleId": "c1", "topicCode": "AI"})))
            .unwrap();

        assert!(store
            .load(&PrimaryKey::composite("c1", "AI"))
            .unwrap()
            .is_some());
        assert!(store
            .load(&PrimaryKey::composite("c1", "RUST"))
            .unwrap()
            .is_none());
    }
}
