// Persistence round trips through the gateway on the SQLite backend

mod common;

use capsule_core::gateway::{AttributeStore, CapsuleGateway, CapsuleRepository, TableSchema};
use capsule_core::model::Status;
use capsule_core::{CapsuleService, ExErrorKind};
use capsule_store::SqliteStore;
use common::{capsule, repository};

#[test]
fn test_save_then_find_by_is_equal_on_all_attributes() {
    // Given: a fully populated capsule
    let repo = repository();
    let mut original = capsule("c1", "RUST", Status::Active);
    original.description = "Ownership and borrowing".to_string();
    original.author = "Ferris".to_string();
    original.publisher = "GITHUB".to_string();
    original.audience = "DEVELOPER".to_string();
    original.duration = 12;
    original.level = "INTERMEDIATE".to_string();
    original.capsule_type = "ARTICLE".to_string();
    original.tags = vec!["rust".to_string(), "memory".to_string()];
    original.key_points = vec!["moves".to_string(), "borrows".to_string()];
    original.image_url = "https://example.org/i.png".to_string();
    original.resource_url = "https://example.org/a".to_string();
    original.published_date = "2024-04-01".to_string();
    original.expiry_date = "2025-04-01".to_string();
    original.views = 10;
    original.bookmarks = 4;
    original.recommendations = 2;
    original.added_by = "u1".to_string();
    original.updated_by = "u2".to_string();
    original.added_on = "2024-04-01T00:00:00.000Z".to_string();
    original.updated_on = "2024-04-02T00:00:00.000Z".to_string();

    // When: it is saved and read back
    repo.save(original.clone()).unwrap();
    let loaded = repo.find_by("c1").unwrap();

    // Then: every attribute survives
    assert_eq!(loaded, Some(original));
}

#[test]
fn test_save_overwrites_existing_record() {
    let repo = repository();
    repo.save(capsule("c1", "RUST", Status::Submitted)).unwrap();
    repo.save(capsule("c1", "AI", Status::Active)).unwrap();

    assert_eq!(repo.get_all_capsules_count().unwrap(), 1);
    assert_eq!(repo.find_by("c1").unwrap().unwrap().topic_code, "AI");
    assert!(repo.find_all_by_topic_code("RUST").unwrap().is_empty());
}

#[test]
fn test_find_all_is_projected_and_key_ordered() {
    let repo = repository();
    let mut b = capsule("b", "RUST", Status::Active);
    b.description = "not projected".to_string();
    repo.save(b).unwrap();
    repo.save(capsule("a", "AI", Status::Submitted)).unwrap();

    let all = repo.find_all().unwrap();
    let ids: Vec<&str> = all.iter().map(|c| c.capsule_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert!(all[1].description.is_empty());
    assert_eq!(all[1].category, "ENGINEERING");
    assert_eq!(all[1].status, Status::Active);
}

#[test]
fn test_composite_lookup_with_range_key_table() {
    let schema = TableSchema::capsules("Capsule", "topicGSI").with_range_key("topicCode");
    let repo = CapsuleRepository::new(SqliteStore::open_in_memory(schema).unwrap());
    repo.save(capsule("c1", "RUST", Status::Active)).unwrap();

    assert!(repo.find_by_composite("c1", "RUST").unwrap().is_some());
    assert!(repo.find_by_composite("c1", "AI").unwrap().is_none());

    // a hash-only lookup no longer matches the key schema
    let err = repo.find_by("c1").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::KeySchemaMismatch);
}

#[test]
fn test_tables_are_isolated_in_one_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.db");

    let first = SqliteStore::open(&path, TableSchema::capsules("Capsule", "topicGSI")).unwrap();
    let second = SqliteStore::open(&path, TableSchema::capsules("Archive", "topicGSI")).unwrap();
    CapsuleRepository::new(first)
        .save(capsule("c1", "RUST", Status::Active))
        .unwrap();

    assert_eq!(second.count().unwrap(), 0);
}

#[test]
fn test_service_state_survives_reopen() {
    // Given: a file-backed store with an approved, viewed capsule
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("capsules.db");
    let schema = || TableSchema::capsules("Capsule", "topicGSI");

    {
        let service = CapsuleService::new(CapsuleRepository::new(
            SqliteStore::open(&path, schema()).unwrap(),
        ));
        service
            .gateway()
            .save(capsule("c1", "RUST", Status::Submitted))
            .unwrap();
        service
            .approve(capsule_core::commands::ApproveCommand {
                capsule_id: "c1".to_string(),
                meta: Default::default(),
            })
            .unwrap();
    }

    // When: the database is reopened
    let repo = CapsuleRepository::new(SqliteStore::open(&path, schema()).unwrap());

    // Then: the approval is visible through the topic index
    let feed = repo.find_all_by_topic_code("RUST").unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].status, Status::Active);
}
