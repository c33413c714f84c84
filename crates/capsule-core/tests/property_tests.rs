#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use capsule_core::commands::{
    AddBookmarkCommand, ApproveCommand, DisableCommand, RecommendCommand, ViewCommand,
};
use capsule_core::inputs::{CreateInput, UpdateInput};
use capsule_core::mapper::{build_create_command_at, build_update_command_at, format_exec_on};
use capsule_core::model::Status;
use chrono::{TimeZone, Utc};
use common::{meta, new_service, origin, seed_capsule};
use proptest::prelude::*;

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _-]{0,16}"
}

fn arb_create_input() -> impl Strategy<Value = CreateInput> {
    (
        (arb_text(), arb_text(), arb_text(), arb_text()),
        (arb_text(), arb_text(), arb_text(), any::<u32>()),
        (arb_text(), arb_text(), arb_text(), arb_text()),
        (
            prop::collection::vec(arb_text(), 0..4),
            prop::collection::vec(arb_text(), 0..4),
            arb_text(),
            arb_text(),
        ),
    )
        .prop_map(
            |(
                (title, description, author, publisher),
                (topic_code, category, audience, duration),
                (level, capsule_type, image_url, resource_url),
                (tags, key_points, published_date, expiry_date),
            )| CreateInput {
                title,
                description,
                author,
                publisher,
                topic_code,
                category,
                audience,
                duration,
                level,
                capsule_type,
                tags,
                key_points,
                image_url,
                resource_url,
                published_date,
                expiry_date,
            },
        )
}

#[derive(Debug, Clone, Copy)]
enum Mutation {
    View,
    Bookmark,
    Recommend,
    Approve,
    Disable,
}

fn arb_mutation() -> impl Strategy<Value = Mutation> {
    prop_oneof![
        Just(Mutation::View),
        Just(Mutation::Bookmark),
        Just(Mutation::Recommend),
        Just(Mutation::Approve),
        Just(Mutation::Disable),
    ]
}

proptest! {
    #[test]
    fn prop_create_builder_copies_every_field(input in arb_create_input(), secs in 0i64..4_000_000_000) {
        let at = Utc.timestamp_opt(secs, 0).unwrap();
        let cmd = build_create_command_at(input.clone(), &origin("u1"), at);

        prop_assert_eq!(&cmd.title, &input.title);
        prop_assert_eq!(&cmd.description, &input.description);
        prop_assert_eq!(&cmd.author, &input.author);
        prop_assert_eq!(&cmd.publisher, &input.publisher);
        prop_assert_eq!(&cmd.topic_code, &input.topic_code);
        prop_assert_eq!(&cmd.category, &input.category);
        prop_assert_eq!(&cmd.audience, &input.audience);
        prop_assert_eq!(cmd.duration, input.duration);
        prop_assert_eq!(&cmd.level, &input.level);
        prop_assert_eq!(&cmd.capsule_type, &input.capsule_type);
        prop_assert_eq!(&cmd.tags, &input.tags);
        prop_assert_eq!(&cmd.key_points, &input.key_points);
        prop_assert_eq!(&cmd.image_url, &input.image_url);
        prop_assert_eq!(&cmd.resource_url, &input.resource_url);
        prop_assert_eq!(&cmd.published_date, &input.published_date);
        prop_assert_eq!(&cmd.expiry_date, &input.expiry_date);
        prop_assert_eq!(&cmd.meta.channel, "WEB");
        prop_assert_eq!(cmd.meta.user_id(), "u1");
        prop_assert_eq!(cmd.meta.exec_on, format_exec_on(at));
    }

    #[test]
    fn prop_update_builder_copies_id_and_title(id in arb_text(), title in arb_text()) {
        let input = UpdateInput {
            capsule_id: id.clone(),
            title: title.clone(),
            ..UpdateInput::default()
        };
        let cmd = build_update_command_at(input, &origin("editor"), Utc::now());

        prop_assert_eq!(cmd.capsule_id, id);
        prop_assert_eq!(cmd.title, title);
        prop_assert_eq!(cmd.meta.exec_by.tenant_id, "tenant-1");
    }

    #[test]
    fn prop_counters_never_decrease(mutations in prop::collection::vec(arb_mutation(), 0..24)) {
        let service = new_service();
        seed_capsule(&service, "c1", "RUST", Status::Submitted);
        let id = || "c1".to_string();
        let m = || meta("prop", "2024-05-01T00:00:00.000Z");

        let mut expected = (0u64, 0u64, 0u64);
        for mutation in mutations {
            let before = service.find_by("c1").unwrap().unwrap();
            match mutation {
                Mutation::View => {
                    service.view(ViewCommand { capsule_id: id(), meta: m() }).unwrap();
                    expected.0 += 1;
                }
                Mutation::Bookmark => {
                    service.add_bookmark(AddBookmarkCommand { capsule_id: id(), meta: m() }).unwrap();
                    expected.1 += 1;
                }
                Mutation::Recommend => {
                    service.recommend(RecommendCommand { capsule_id: id(), meta: m() }).unwrap();
                    expected.2 += 1;
                }
                Mutation::Approve => {
                    service.approve(ApproveCommand { capsule_id: id(), meta: m() }).unwrap();
                }
                Mutation::Disable => {
                    service.disable(DisableCommand { capsule_id: id(), meta: m() }).unwrap();
                }
            }
            let after = service.find_by("c1").unwrap().unwrap();

            prop_assert!(after.views >= before.views);
            prop_assert!(after.bookmarks >= before.bookmarks);
            prop_assert!(after.recommendations >= before.recommendations);
            // nothing leaves INACTIVE
            if before.status == Status::Inactive {
                prop_assert_eq!(after.status, Status::Inactive);
            }
        }

        let last = service.find_by("c1").unwrap().unwrap();
        prop_assert_eq!((last.views, last.bookmarks, last.recommendations), expected);
    }
}
