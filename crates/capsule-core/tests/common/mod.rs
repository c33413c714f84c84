use capsule_core::commands::CommandMeta;
use capsule_core::gateway::{CapsuleGateway, CapsuleRepository, MemoryStore, TableSchema};
use capsule_core::model::{Capsule, Status};
use capsule_core::CapsuleService;
use capsule_core_types::{ExecBy, Origin};

pub type MemoryService = CapsuleService<CapsuleRepository<MemoryStore>>;

/// Service over an empty in-memory Capsule table
#[allow(dead_code)]
pub fn new_service() -> MemoryService {
    CapsuleService::new(CapsuleRepository::new(MemoryStore::new(
        TableSchema::capsules("Capsule", "topicGSI"),
    )))
}

/// Command provenance for `user` at a fixed time
#[allow(dead_code)]
pub fn meta(user: &str, exec_on: &str) -> CommandMeta {
    CommandMeta {
        channel: "WEB".to_string(),
        exec_by: ExecBy::new("tenant-1", user),
        exec_on: exec_on.to_string(),
    }
}

#[allow(dead_code)]
pub fn origin(user: &str) -> Origin {
    Origin::new("WEB", "tenant-1", user)
}

/// Save a capsule directly through the gateway, bypassing `create`
#[allow(dead_code)]
pub fn seed_capsule(service: &MemoryService, id: &str, topic: &str, status: Status) -> Capsule {
    let mut capsule = Capsule::new(id, format!("Capsule {}", id));
    capsule.topic_code = topic.to_string();
    capsule.category = "ENGINEERING".to_string();
    capsule.description = format!("About {}", topic);
    capsule.status = status;
    capsule.added_by = "seed".to_string();
    capsule.updated_by = "seed".to_string();
    capsule.added_on = "2024-01-01T00:00:00.000Z".to_string();
    capsule.updated_on = "2024-01-01T00:00:00.000Z".to_string();
    service
        .gateway()
        .save(capsule)
        .expect("seed save should succeed")
}

/// Ids of a capsule list, in order
#[allow(dead_code)]
pub fn ids(capsules: &[Capsule]) -> Vec<&str> {
    capsules.iter().map(|c| c.capsule_id.as_str()).collect()
}
