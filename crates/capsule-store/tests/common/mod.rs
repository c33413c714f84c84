use capsule_core::gateway::{CapsuleRepository, Item, TableSchema};
use capsule_core::model::{Capsule, Status};
use capsule_store::SqliteStore;

/// Migrated in-memory store for the default Capsule table
#[allow(dead_code)]
pub fn memory_store() -> SqliteStore {
    SqliteStore::open_in_memory(TableSchema::capsules("Capsule", "topicGSI"))
        .expect("in-memory store should open")
}

#[allow(dead_code)]
pub fn repository() -> CapsuleRepository<SqliteStore> {
    CapsuleRepository::new(memory_store())
}

#[allow(dead_code)]
pub fn capsule(id: &str, topic: &str, status: Status) -> Capsule {
    let mut c = Capsule::new(id, format!("Capsule {}", id));
    c.topic_code = topic.to_string();
    c.category = "ENGINEERING".to_string();
    c.status = status;
    c
}

#[allow(dead_code)]
pub fn item(value: serde_json::Value) -> Item {
    value.as_object().cloned().expect("object literal")
}
