//! Command builder
//!
//! Maps each input to its command by explicit field-by-field copy, then
//! stamps provenance from the request [`Origin`]. Nothing is validated here:
//! the copy is total and fields absent on the input stay at their zero value.
//!
//! Every builder has an `_at` twin that takes the execution time explicitly;
//! the plain form reads the current UTC time.

use capsule_core_types::Origin;
use chrono::{DateTime, SecondsFormat, Utc};

use crate::commands::{
    AddBookmarkCommand, ApproveCommand, CommandMeta, CreateCommand, DisableCommand,
    RecommendCommand, UpdateCommand, ViewCommand,
};
use crate::inputs::{
    AddBookmarkInput, ApproveInput, CreateInput, DisableInput, RecommendInput, UpdateInput,
    ViewInput,
};

/// Render a timestamp the way commands carry it (`2024-05-01T10:15:30.123Z`)
pub fn format_exec_on(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Provenance for a command executed at `at` on behalf of `origin`
pub fn stamp(origin: &Origin, at: DateTime<Utc>) -> CommandMeta {
    CommandMeta {
        channel: origin.channel.clone(),
        exec_by: origin.exec_by(),
        exec_on: format_exec_on(at),
    }
}

pub fn build_create_command(input: CreateInput, origin: &Origin) -> CreateCommand {
    build_create_command_at(input, origin, Utc::now())
}

pub fn build_create_command_at(
    input: CreateInput,
    origin: &Origin,
    at: DateTime<Utc>,
) -> CreateCommand {
    CreateCommand {
        title: input.title,
        description: input.description,
        author: input.author,
        publisher: input.publisher,
        topic_code: input.topic_code,
        category: input.category,
        audience: input.audience,
        duration: input.duration,
        level: input.level,
        capsule_type: input.capsule_type,
        tags: input.tags,
        key_points: input.key_points,
        image_url: input.image_url,
        resource_url: input.resource_url,
        published_date: input.published_date,
        expiry_date: input.expiry_date,
        meta: stamp(origin, at),
    }
}

pub fn build_update_command(input: UpdateInput, origin: &Origin) -> UpdateCommand {
    build_update_command_at(input, origin, Utc::now())
}

pub fn build_update_command_at(
    input: UpdateInput,
    origin: &Origin,
    at: DateTime<Utc>,
) -> UpdateCommand {
    UpdateCommand {
        capsule_id: input.capsule_id,
        title: input.title,
        description: input.description,
        author: input.author,
        publisher: input.publisher,
        topic_code: input.topic_code,
        audience: input.audience,
        duration: input.duration,
        level: input.level,
        capsule_type: input.capsule_type,
        tags: input.tags,
        key_points: input.key_points,
        image_url: input.image_url,
        resource_url: input.resource_url,
        published_date: input.published_date,
        expiry_date: input.expiry_date,
        meta: stamp(origin, at),
    }
}

pub fn build_disable_command(input: DisableInput, origin: &Origin) -> DisableCommand {
    build_disable_command_at(input, origin, Utc::now())
}

pub fn build_disable_command_at(
    input: DisableInput,
    origin: &Origin,
    at: DateTime<Utc>,
) -> DisableCommand {
    DisableCommand {
        capsule_id: input.capsule_id,
        meta: stamp(origin, at),
    }
}

pub fn build_approve_command(input: ApproveInput, origin: &Origin) -> ApproveCommand {
    build_approve_command_at(input, origin, Utc::now())
}

pub fn build_approve_command_at(
    input: ApproveInput,
    origin: &Origin,
    at: DateTime<Utc>,
) -> ApproveCommand {
    ApproveCommand {
        capsule_id: input.capsule_id,
        meta: stamp(origin, at),
    }
}

pub fn build_view_command(input: ViewInput, origin: &Origin) -> ViewCommand {
    build_view_command_at(input, origin, Utc::now())
}

pub fn build_view_command_at(input: ViewInput, origin: &Origin, at: DateTime<Utc>) -> ViewCommand {
    ViewCommand {
        capsule_id: input.capsule_id,
        meta: stamp(origin, at),
    }
}

pub fn build_add_bookmark_command(input: AddBookmarkInput, origin: &Origin) -> AddBookmarkCommand {
    build_add_bookmark_command_at(input, origin, Utc::now())
}

pub fn build_add_bookmark_command_at(
    input: AddBookmarkInput,
    origin: &Origin,
    at: DateTime<Utc>,
) -> AddBookmarkCommand {
    AddBookmarkCommand {
        capsule_id: input.capsule_id,
        meta: stamp(origin, at),
    }
}

pub fn build_recommend_command(input: RecommendInput, origin: &Origin) -> RecommendCommand {
    build_recommend_command_at(input, origin, Utc::now())
}

pub fn build_recommend_command_at(
    input: RecommendInput,
    origin: &Origin,
    at: DateTime<Utc>,
) -> RecommendCommand {
    RecommendCommand {
        capsule_id: input.capsule_id,
        meta: stamp(origin, at),
    }
}
