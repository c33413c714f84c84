//! Core types shared across the capsule crates
//!
//! This crate provides foundational types used by the command builder, the
//! service layer and the logging facility:
//!
//! - **Provenance types**: Origin, ExecBy
//! - **Schema constants**: Canonical field keys and event names

pub mod provenance;
pub mod schema;

pub use provenance::{ExecBy, Origin};
