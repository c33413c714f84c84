//! Capsule Core - content backend for short educational items
//!
//! This crate provides:
//! - The Capsule data model and the fixed metadata catalogs
//! - Input shapes, commands and the command builder that stamps provenance
//! - The key/attribute store contract, an in-memory store and the
//!   persistence gateway built on it
//! - The capsule service: approval workflow, counters, feeds
//! - The error facility, structured logging and TOML configuration
//!
//! The durable SQLite store lives in `capsule-store`.

pub mod commands;
pub mod config;
pub mod errors;
pub mod gateway;
pub mod inputs;
pub mod logging_facility;
pub mod mapper;
pub mod model;
pub mod service;

// Re-exported for the logging macros
pub use capsule_core_types;

pub use commands::{Command, CommandMeta};
pub use config::CapsuleConfig;
pub use errors::{CapsuleError, ExError, ExErrorKind, Result};
pub use gateway::{AttributeStore, CapsuleGateway, CapsuleRepository, Item, MemoryStore};
pub use model::{Capsule, Catalogs, Status};
pub use service::{CapsuleService, Executed, Outcome};
