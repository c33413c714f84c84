//! Capsule service
//!
//! One read-modify-write cycle per command. The service is the only place
//! that knows the status transitions and counter rules:
//!
//! - SUBMITTED --approve--> ACTIVE
//! - SUBMITTED | ACTIVE --disable--> INACTIVE
//! - view, bookmark, recommend and update leave status alone
//!
//! Every mutation except `create` loads its capsule first and is skipped
//! without error when the capsule is absent. There is no locking between the
//! load and the save, so concurrent writers to one capsule can lose updates.
//!
//! ## Logging Ownership
//!
//! The service owns lifecycle logging (`log_op_start!`, `log_op_end!`,
//! `log_op_error!`). The gateway and stores log internals at `debug` only.

use std::collections::BTreeMap;
use std::time::Instant;

use crate::commands::{
    AddBookmarkCommand, ApproveCommand, Command, CommandMeta, CreateCommand, DisableCommand,
    RecommendCommand, UpdateCommand, ViewCommand,
};
use crate::errors::Result;
use crate::gateway::CapsuleGateway;
use crate::model::{Capsule, Catalogs, Status};
use crate::{log_op_end, log_op_error, log_op_skipped, log_op_start};

/// Result of a mutating call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The capsule was found, mutated and saved
    Applied,
    /// Nothing was saved: the capsule is absent, or the transition is not allowed
    Skipped,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Applied => "applied",
            Outcome::Skipped => "skipped",
        }
    }
}

/// What `execute` produced for a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Executed {
    /// Id of a newly created capsule
    Created(String),
    /// Outcome of any other mutation
    Mutated(Outcome),
}

pub struct CapsuleService<G> {
    gateway: G,
    catalogs: Catalogs,
}

impl<G: CapsuleGateway> CapsuleService<G> {
    /// Service with the built-in catalogs
    pub fn new(gateway: G) -> Self {
        Self::with_catalogs(gateway, Catalogs::default())
    }

    pub fn with_catalogs(gateway: G, catalogs: Catalogs) -> Self {
        Self { gateway, catalogs }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Dispatch a command to its operation
    ///
    /// # Errors
    ///
    /// Returns any store fault raised by the operation.
    pub fn execute(&self, command: Command) -> Result<Executed> {
        match command {
            Command::Create(cmd) => self.create(cmd).map(Executed::Created),
            Command::Update(cmd) => self.update(cmd).map(Executed::Mutated),
            Command::Disable(cmd) => self.disable(cmd).map(Executed::Mutated),
            Command::Approve(cmd) => self.approve(cmd).map(Executed::Mutated),
            Command::View(cmd) => self.view(cmd).map(Executed::Mutated),
            Command::AddBookmark(cmd) => self.add_bookmark(cmd).map(Executed::Mutated),
            Command::Recommend(cmd) => self.recommend(cmd).map(Executed::Mutated),
        }
    }

    /// Persist a new SUBMITTED capsule and return its generated id
    ///
    /// # Errors
    ///
    /// Returns any store fault raised by the save.
    pub fn create(&self, cmd: CreateCommand) -> Result<String> {
        let capsule_id = uuid::Uuid::now_v7().to_string();
        log_op_start!("create", capsule_id = %capsule_id);
        let start = Instant::now();

        let capsule = Capsule {
            capsule_id: capsule_id.clone(),
            title: cmd.title,
            description: cmd.description,
            author: cmd.author,
            publisher: cmd.publisher,
            topic_code: cmd.topic_code,
            category: cmd.category,
            audience: cmd.audience,
            duration: cmd.duration,
            level: cmd.level,
            capsule_type: cmd.capsule_type,
            tags: cmd.tags,
            key_points: cmd.key_points,
            image_url: cmd.image_url,
            resource_url: cmd.resource_url,
            published_date: cmd.published_date,
            expiry_date: cmd.expiry_date,
            status: Status::Submitted,
            views: 0,
            bookmarks: 0,
            recommendations: 0,
            added_by: cmd.meta.exec_by.user_id.clone(),
            updated_by: String::new(),
            added_on: cmd.meta.exec_on.clone(),
            updated_on: cmd.meta.exec_on,
        };

        match self.gateway.save(capsule) {
            Ok(_) => {
                log_op_end!(
                    "create",
                    duration_ms = elapsed_ms(start),
                    capsule_id = %capsule_id
                );
                Ok(capsule_id)
            }
            Err(e) => {
                log_op_error!(
                    "create",
                    e,
                    duration_ms = elapsed_ms(start),
                    capsule_id = %capsule_id
                );
                Err(e)
            }
        }
    }

    /// Overwrite the descriptive fields of an existing capsule
    ///
    /// Status, category and counters are left untouched.
    ///
    /// # Errors
    ///
    /// Returns any store fault.
    pub fn update(&self, cmd: UpdateCommand) -> Result<Outcome> {
        let capsule_id = cmd.capsule_id.clone();
        let meta = cmd.meta.clone();
        self.mutate("update", &capsule_id, &meta, move |c| {
            c.audience = cmd.audience;
            c.author = cmd.author;
            c.description = cmd.description;
            c.topic_code = cmd.topic_code;
            c.published_date = cmd.published_date;
            c.expiry_date = cmd.expiry_date;
            c.title = cmd.title;
            c.image_url = cmd.image_url;
            c.duration = cmd.duration;
            c.tags = cmd.tags;
            c.publisher = cmd.publisher;
            c.resource_url = cmd.resource_url;
            c.capsule_type = cmd.capsule_type;
            c.level = cmd.level;
            c.key_points = cmd.key_points;
            true
        })
    }

    /// Move a capsule to INACTIVE
    ///
    /// # Errors
    ///
    /// Returns any store fault.
    pub fn disable(&self, cmd: DisableCommand) -> Result<Outcome> {
        self.mutate("disable", &cmd.capsule_id, &cmd.meta, |c| {
            c.status = Status::Inactive;
            true
        })
    }

    /// Move a SUBMITTED or ACTIVE capsule to ACTIVE
    ///
    /// An INACTIVE capsule stays INACTIVE and the call is skipped.
    ///
    /// # Errors
    ///
    /// Returns any store fault.
    pub fn approve(&self, cmd: ApproveCommand) -> Result<Outcome> {
        self.mutate("approve", &cmd.capsule_id, &cmd.meta, |c| {
            if c.status == Status::Inactive {
                return false;
            }
            c.status = Status::Active;
            true
        })
    }

    /// # Errors
    ///
    /// Returns any store fault.
    pub fn view(&self, cmd: ViewCommand) -> Result<Outcome> {
        self.mutate("view", &cmd.capsule_id, &cmd.meta, |c| {
            c.views = c.views.saturating_add(1);
            true
        })
    }

    /// # Errors
    ///
    /// Returns any store fault.
    pub fn add_bookmark(&self, cmd: AddBookmarkCommand) -> Result<Outcome> {
        self.mutate("add_bookmark", &cmd.capsule_id, &cmd.meta, |c| {
            c.bookmarks = c.bookmarks.saturating_add(1);
            true
        })
    }

    /// # Errors
    ///
    /// Returns any store fault.
    pub fn recommend(&self, cmd: RecommendCommand) -> Result<Outcome> {
        self.mutate("recommend", &cmd.capsule_id, &cmd.meta, |c| {
            c.recommendations = c.recommendations.saturating_add(1);
            true
        })
    }

    /// ACTIVE capsules for each topic, in topic order
    ///
    /// # Errors
    ///
    /// Returns any store fault.
    pub fn get_my_feed(&self, topics: &[String]) -> Result<Vec<Capsule>> {
        self.gateway.find_all_feeds(topics)
    }

    /// # Errors
    ///
    /// Returns any store fault.
    pub fn get_pending_approval(&self) -> Result<Vec<Capsule>> {
        self.gateway.find_all_pending_approval()
    }

    /// # Errors
    ///
    /// Returns any store fault.
    pub fn find_by(&self, capsule_id: &str) -> Result<Option<Capsule>> {
        self.gateway.find_by(capsule_id)
    }

    /// # Errors
    ///
    /// Returns any store fault.
    pub fn find_by_topic(&self, topic_code: &str) -> Result<Vec<Capsule>> {
        self.gateway.find_all_by_topic_code(topic_code)
    }

    /// Projected capsules (id, title, topic code, category, status)
    ///
    /// # Errors
    ///
    /// Returns any store fault.
    pub fn find_all(&self) -> Result<Vec<Capsule>> {
        self.gateway.find_all()
    }

    /// # Errors
    ///
    /// Returns any store fault.
    pub fn get_all_capsules_count(&self) -> Result<u64> {
        self.gateway.get_all_capsules_count()
    }

    /// Catalog values keyed by catalog name
    pub fn get_metadata(&self) -> BTreeMap<String, Vec<String>> {
        self.catalogs.to_map()
    }

    /// Load, mutate, stamp and save one capsule
    ///
    /// `apply` returns false to leave the capsule unsaved.
    fn mutate<F>(&self, op: &str, capsule_id: &str, meta: &CommandMeta, apply: F) -> Result<Outcome>
    where
        F: FnOnce(&mut Capsule) -> bool,
    {
        log_op_start!(op, capsule_id = capsule_id, user_id = meta.user_id());
        let start = Instant::now();

        let result = self.mutate_impl(capsule_id, meta, apply);
        let duration_ms = elapsed_ms(start);

        match &result {
            Ok(Outcome::Skipped) => {
                log_op_skipped!(op, capsule_id = capsule_id);
                log_op_end!(
                    op,
                    duration_ms = duration_ms,
                    capsule_id = capsule_id,
                    outcome = "skipped"
                );
            }
            Ok(Outcome::Applied) => {
                log_op_end!(
                    op,
                    duration_ms = duration_ms,
                    capsule_id = capsule_id,
                    outcome = "applied"
                );
            }
            Err(e) => {
                log_op_error!(op, e, duration_ms = duration_ms, capsule_id = capsule_id);
            }
        }

        result
    }

    fn mutate_impl<F>(&self, capsule_id: &str, meta: &CommandMeta, apply: F) -> Result<Outcome>
    where
        F: FnOnce(&mut Capsule) -> bool,
    {
        let Some(mut capsule) = self.gateway.find_by(capsule_id)? else {
            return Ok(Outcome::Skipped);
        };

        if !apply(&mut capsule) {
            return Ok(Outcome::Skipped);
        }
        capsule.touch(meta.user_id(), &meta.exec_on);
        self.gateway.save(capsule)?;

        Ok(Outcome::Applied)
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{CapsuleRepository, MemoryStore, TableSchema};
    use capsule_core_types::ExecBy;

    fn service() -> CapsuleService<CapsuleRepository<MemoryStore>> {
        CapsuleService::new(CapsuleRepository::new(MemoryStore::new(
            TableSchema::capsules("Capsule", "topicGSI"),
        )))
    }

    fn meta(user: &str, exec_on: &str) -> CommandMeta {
        CommandMeta {
            channel: "WEB".to_string(),
            exec_by: ExecBy::new("t1", user),
            exec_on: exec_on.to_string(),
        }
    }

    #[test]
    fn test_create_sets_initial_state() {
        let svc = service();
        let id = svc
            .create(CreateCommand {
                title: "Traits".to_string(),
                category: "LANG".to_string(),
                meta: meta("author-1", "2024-05-01T10:00:00.000Z"),
                ..CreateCommand::default()
            })
            .unwrap();

        let saved = svc.find_by(&id).unwrap().unwrap();
        assert_eq!(saved.status, Status::Submitted);
        assert_eq!(saved.category, "LANG");
        assert_eq!(saved.added_by, "author-1");
        assert_eq!(saved.added_on, "2024-05-01T10:00:00.000Z");
        assert_eq!(saved.updated_on, saved.added_on);
        assert!(saved.updated_by.is_empty());
        assert_eq!((saved.views, saved.bookmarks, saved.recommendations), (0, 0, 0));
    }

    #[test]
    fn test_update_keeps_status_category_and_counters() {
        let svc = service();
        let mut existing = Capsule::new("c1", "Old");
        existing.status = Status::Active;
        existing.category = "LANG".to_string();
        existing.views = 9;
        svc.gateway().save(existing).unwrap();

        let outcome = svc
            .update(UpdateCommand {
                capsule_id: "c1".to_string(),
                title: "New".to_string(),
                meta: meta("editor", "2024-06-01T00:00:00.000Z"),
                ..UpdateCommand::default()
            })
            .unwrap();
        assert_eq!(outcome, Outcome::Applied);

        let saved = svc.find_by("c1").unwrap().unwrap();
        assert_eq!(saved.title, "New");
        assert_eq!(saved.status, Status::Active);
        assert_eq!(saved.category, "LANG");
        assert_eq!(saved.views, 9);
        assert_eq!(saved.updated_by, "editor");
    }

    #[test]
    fn test_approve_does_not_reactivate_inactive() {
        let svc = service();
        let mut existing = Capsule::new("c1", "Gone");
        existing.status = Status::Inactive;
        existing.updated_by = "someone".to_string();
        svc.gateway().save(existing.clone()).unwrap();

        let outcome = svc
            .approve(ApproveCommand {
                capsule_id: "c1".to_string(),
                meta: meta("approver", "2024-06-01T00:00:00.000Z"),
            })
            .unwrap();

        assert_eq!(outcome, Outcome::Skipped);
        assert_eq!(svc.find_by("c1").unwrap(), Some(existing));
    }

    #[test]
    fn test_execute_dispatches() {
        let svc = service();
        let created = svc
            .execute(Command::Create(CreateCommand::default()))
            .unwrap();
        let id = match created {
            Executed::Created(id) => id,
            other => panic!("expected Created, got {:?}", other),
        };

        let viewed = svc
            .execute(Command::View(ViewCommand {
                capsule_id: id,
                meta: CommandMeta::default(),
            }))
            .unwrap();
        assert_eq!(viewed, Executed::Mutated(Outcome::Applied));
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(Outcome::Applied.as_str(), "applied");
        assert_eq!(Outcome::Skipped.as_str(), "skipped");
        assert!(!Outcome::Skipped.is_applied());
    }

    #[test]
    fn test_elapsed_ms_of_fresh_instant() {
        assert!(elapsed_ms(Instant::now()) < 60_000);
    }
}
