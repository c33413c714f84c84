//! Command types representing every capsule mutation
//!
//! A command is built once from an input by the command builder (see
//! [`crate::mapper`]), consumed once by [`crate::service::CapsuleService`],
//! and then dropped. Commands are never persisted.

use capsule_core_types::ExecBy;

/// Provenance stamped onto every command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandMeta {
    /// Originating channel of the request
    pub channel: String,
    /// Acting tenant and user
    pub exec_by: ExecBy,
    /// Execution time, ISO-8601 UTC
    pub exec_on: String,
}

impl CommandMeta {
    /// User id of the acting user
    pub fn user_id(&self) -> &str {
        &self.exec_by.user_id
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateCommand {
    pub title: String,
    pub description: String,
    pub author: String,
    pub publisher: String,
    pub topic_code: String,
    pub category: String,
    pub audience: String,
    pub duration: u32,
    pub level: String,
    pub capsule_type: String,
    pub tags: Vec<String>,
    pub key_points: Vec<String>,
    pub image_url: String,
    pub resource_url: String,
    pub published_date: String,
    pub expiry_date: String,
    pub meta: CommandMeta,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateCommand {
    pub capsule_id: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub publisher: String,
    pub topic_code: String,
    pub audience: String,
    pub duration: u32,
    pub level: String,
    pub capsule_type: String,
    pub tags: Vec<String>,
    pub key_points: Vec<String>,
    pub image_url: String,
    pub resource_url: String,
    pub published_date: String,
    pub expiry_date: String,
    pub meta: CommandMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisableCommand {
    pub capsule_id: String,
    pub meta: CommandMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApproveCommand {
    pub capsule_id: String,
    pub meta: CommandMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewCommand {
    pub capsule_id: String,
    pub meta: CommandMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddBookmarkCommand {
    pub capsule_id: String,
    pub meta: CommandMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendCommand {
    pub capsule_id: String,
    pub meta: CommandMeta,
}

/// Command enum covering every mutation
///
/// Dispatched by `CapsuleService::execute`.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Create(CreateCommand),
    Update(UpdateCommand),
    Disable(DisableCommand),
    Approve(ApproveCommand),
    View(ViewCommand),
    AddBookmark(AddBookmarkCommand),
    Recommend(RecommendCommand),
}

impl Command {
    /// Operation name used in log events
    pub fn op(&self) -> &'static str {
        match self {
            Command::Create(_) => "create",
            Command::Update(_) => "update",
            Command::Disable(_) => "disable",
            Command::Approve(_) => "approve",
            Command::View(_) => "view",
            Command::AddBookmark(_) => "add_bookmark",
            Command::Recommend(_) => "recommend",
        }
    }

    /// Provenance of this command
    pub fn meta(&self) -> &CommandMeta {
        match self {
            Command::Create(c) => &c.meta,
            Command::Update(c) => &c.meta,
            Command::Disable(c) => &c.meta,
            Command::Approve(c) => &c.meta,
            Command::View(c) => &c.meta,
            Command::AddBookmark(c) => &c.meta,
            Command::Recommend(c) => &c.meta,
        }
    }

    /// Target capsule id; `None` for Create, whose id is assigned on save
    pub fn capsule_id(&self) -> Option<&str> {
        match self {
            Command::Create(_) => None,
            Command::Update(c) => Some(&c.capsule_id),
            Command::Disable(c) => Some(&c.capsule_id),
            Command::Approve(c) => Some(&c.capsule_id),
            Command::View(c) => Some(&c.capsule_id),
            Command::AddBookmark(c) => Some(&c.capsule_id),
            Command::Recommend(c) => Some(&c.capsule_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_accessors() {
        let cmd = Command::View(ViewCommand {
            capsule_id: "c1".to_string(),
            meta: CommandMeta {
                channel: "WEB".to_string(),
                exec_by: ExecBy::new("t1", "u1"),
                exec_on: "2024-01-01T00:00:00.000Z".to_string(),
            },
        });

        assert_eq!(cmd.op(), "view");
        assert_eq!(cmd.capsule_id(), Some("c1"));
        assert_eq!(cmd.meta().user_id(), "u1");
    }

    #[test]
    fn test_create_has_no_target_id() {
        let cmd = Command::Create(CreateCommand::default());
        assert_eq!(cmd.capsule_id(), None);
        assert_eq!(cmd.op(), "create");
    }
}
