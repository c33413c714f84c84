//! External input representations
//!
//! These are the shapes the transport layer deserializes requests into.
//! No field is required: anything absent stays at its zero value, and the
//! command builder copies whatever is present without validating it.

use serde::{Deserialize, Serialize};

/// Input for creating a capsule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateInput {
    pub title: String,
    pub description: String,
    pub author: String,
    pub publisher: String,
    pub topic_code: String,
    pub category: String,
    pub audience: String,
    pub duration: u32,
    pub level: String,
    #[serde(rename = "type")]
    pub capsule_type: String,
    pub tags: Vec<String>,
    pub key_points: Vec<String>,
    pub image_url: String,
    pub resource_url: String,
    pub published_date: String,
    pub expiry_date: String,
}

/// Input for updating the descriptive fields of a capsule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateInput {
    pub capsule_id: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub publisher: String,
    pub topic_code: String,
    pub audience: String,
    pub duration: u32,
    pub level: String,
    #[serde(rename = "type")]
    pub capsule_type: String,
    pub tags: Vec<String>,
    pub key_points: Vec<String>,
    pub image_url: String,
    pub resource_url: String,
    pub published_date: String,
    pub expiry_date: String,
}

/// Input for disabling a capsule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisableInput {
    pub capsule_id: String,
}

/// Input for approving a submitted capsule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApproveInput {
    pub capsule_id: String,
}

/// Input for recording a view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewInput {
    pub capsule_id: String,
}

/// Input for recording a bookmark
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddBookmarkInput {
    pub capsule_id: String,
}

/// Input for recording a recommendation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecommendInput {
    pub capsule_id: String,
}
