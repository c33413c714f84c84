use serde::{Deserialize, Serialize};

use super::status::Status;
use crate::errors::{CapsuleError, Result};
use crate::gateway::Item;

// Attribute names that key expressions and projections depend on
pub const ATTR_CAPSULE_ID: &str = "capsuleId";
pub const ATTR_TITLE: &str = "title";
pub const ATTR_TOPIC_CODE: &str = "topicCode";
pub const ATTR_CATEGORY: &str = "category";
pub const ATTR_STATUS: &str = "status";

/// Capsule - a short educational content item
///
/// Carries the descriptive fields of the item, its approval status and its
/// engagement counters. Stored as one item keyed by `capsuleId`; attribute
/// names are the camelCase field names.
///
/// Every attribute defaults to its zero value, so a projected scan yields a
/// partially populated Capsule rather than an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Capsule {
    /// Primary key
    pub capsule_id: String,

    pub title: String,
    pub description: String,
    pub author: String,
    pub publisher: String,
    pub topic_code: String,
    pub category: String,
    pub audience: String,
    /// Expected reading/viewing time in minutes
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

    pub status: Status,

    pub views: u64,
    pub bookmarks: u64,
    pub recommendations: u64,

    pub added_by: String,
    pub updated_by: String,
    /// ISO-8601 UTC timestamp of creation
    pub added_on: String,
    /// ISO-8601 UTC timestamp of the last mutation
    pub updated_on: String,
}

impl Capsule {
    /// Create a SUBMITTED Capsule with zeroed counters
    pub fn new(capsule_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            capsule_id: capsule_id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Stamp the acting user and time of a mutation
    pub fn touch(&mut self, user_id: &str, exec_on: &str) {
        self.updated_by = user_id.to_string();
        self.updated_on = exec_on.to_string();
    }

    /// Convert into a store attribute map
    pub fn to_item(&self) -> Result<Item> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => Ok(map),
            Ok(other) => Err(CapsuleError::AttributeConversion {
                reason: format!("expected an object, got {}", other),
            }
            .into()),
            Err(e) => Err(CapsuleError::AttributeConversion {
                reason: e.to_string(),
            }
            .into()),
        }
    }

    /// Rebuild a Capsule from a store attribute map
    ///
    /// Missing attributes fall back to their zero value.
    pub fn from_item(item: Item) -> Result<Self> {
        serde_json::from_value(serde_json::Value::Object(item)).map_err(|e| {
            CapsuleError::AttributeConversion {
                reason: e.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_capsule_is_submitted_with_zero_counters() {
        let capsule = Capsule::new("c1", "Ownership in Rust");

        assert_eq!(capsule.capsule_id, "c1");
        assert_eq!(capsule.status, Status::Submitted);
        assert_eq!(capsule.views, 0);
        assert_eq!(capsule.bookmarks, 0);
        assert_eq!(capsule.recommendations, 0);
    }

    #[test]
    fn test_item_uses_camel_case_attribute_names() {
        let mut capsule = Capsule::new("c1", "Title");
        capsule.topic_code = "RUST".to_string();
        capsule.capsule_type = "ARTICLE".to_string();
        capsule.key_points = vec!["borrowing".to_string()];

        let item = capsule.to_item().unwrap();

        assert_eq!(item[ATTR_CAPSULE_ID], "c1");
        assert_eq!(item[ATTR_TOPIC_CODE], "RUST");
        assert_eq!(item[ATTR_STATUS], "SUBMITTED");
        assert_eq!(item["type"], "ARTICLE");
        assert_eq!(item["keyPoints"][0], "borrowing");
    }

    #[test]
    fn test_partial_item_fills_zero_values() {
        let mut item = Item::new();
        item.insert(ATTR_CAPSULE_ID.to_string(), "c9".into());
        item.insert(ATTR_STATUS.to_string(), "ACTIVE".into());

        let capsule = Capsule::from_item(item).unwrap();

        assert_eq!(capsule.capsule_id, "c9");
        assert_eq!(capsule.status, Status::Active);
        assert!(capsule.description.is_empty());
        assert!(capsule.tags.is_empty());
        assert_eq!(capsule.views, 0);
    }

    #[test]
    fn test_unknown_status_is_a_conversion_error() {
        let mut item = Item::new();
        item.insert(ATTR_STATUS.to_string(), "ARCHIVED".into());

        let err = Capsule::from_item(item).unwrap_err();
        assert_eq!(err.kind(), crate::errors::ExErrorKind::Serialization);
    }
}
