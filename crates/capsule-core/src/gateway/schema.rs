//! Table and index key schemas

use super::Item;
use crate::errors::{CapsuleError, Result};
use crate::model::capsule::{ATTR_CAPSULE_ID, ATTR_STATUS, ATTR_TOPIC_CODE};

pub const DEFAULT_TABLE_NAME: &str = "Capsule";
pub const DEFAULT_TOPIC_INDEX: &str = "topicGSI";

/// Primary key of an item: hash value plus optional range value
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PrimaryKey {
    pub hash: String,
    pub range: Option<String>,
}

impl PrimaryKey {
    /// Key for a hash-only table
    pub fn hash(hash: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            range: None,
        }
    }

    /// Key for a hash + range table
    pub fn composite(hash: impl Into<String>, range: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            range: Some(range.into()),
        }
    }
}

impl std::fmt::Display for PrimaryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.range {
            Some(range) => write!(f, "{}/{}", self.hash, range),
            None => f.write_str(&self.hash),
        }
    }
}

/// Attribute names forming the primary key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchema {
    pub hash_key: String,
    pub range_key: Option<String>,
}

/// A secondary index over two attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSchema {
    pub name: String,
    pub hash_key: String,
    pub range_key: Option<String>,
}

impl IndexSchema {
    /// Index key values of an item, or `None` if the item is not in the index
    ///
    /// Indexes are sparse: an item missing any index key attribute (or holding
    /// a non-string value there) is simply not indexed.
    pub fn entry_for(&self, item: &Item) -> Option<(String, Option<String>)> {
        let hash = item.get(&self.hash_key)?.as_str()?.to_string();
        let range = match &self.range_key {
            Some(name) => Some(item.get(name)?.as_str()?.to_string()),
            None => None,
        };
        Some((hash, range))
    }
}

/// Full description of one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    pub key: KeySchema,
    pub indexes: Vec<IndexSchema>,
}

impl TableSchema {
    /// Capsule table: `capsuleId` primary key and a (`status`, `topicCode`) index
    pub fn capsules(table_name: impl Into<String>, topic_index: impl Into<String>) -> Self {
        Self {
            name: table_name.into(),
            key: KeySchema {
                hash_key: ATTR_CAPSULE_ID.to_string(),
                range_key: None,
            },
            indexes: vec![IndexSchema {
                name: topic_index.into(),
                hash_key: ATTR_STATUS.to_string(),
                range_key: Some(ATTR_TOPIC_CODE.to_string()),
            }],
        }
    }

    /// Use `range_key` as the primary-key range attribute
    pub fn with_range_key(mut self, range_key: impl Into<String>) -> Self {
        self.key.range_key = Some(range_key.into());
        self
    }

    /// Look up a declared index
    pub fn index(&self, name: &str) -> Result<&IndexSchema> {
        self.indexes
            .iter()
            .find(|i| i.name == name)
            .ok_or_else(|| {
                CapsuleError::UnknownIndex {
                    table: self.name.clone(),
                    index: name.to_string(),
                }
                .into()
            })
    }

    /// Check that a lookup key has the shape of this table's key
    pub fn check_key(&self, key: &PrimaryKey) -> Result<()> {
        match (&self.key.range_key, &key.range) {
            (Some(_), Some(_)) | (None, None) => Ok(()),
            (None, Some(_)) => Err(CapsuleError::KeySchemaMismatch {
                table: self.name.clone(),
                reason: "range key given but table has no range key".to_string(),
            }
            .into()),
            (Some(name), None) => Err(CapsuleError::KeySchemaMismatch {
                table: self.name.clone(),
                reason: format!("missing value for range key '{}'", name),
            }
            .into()),
        }
    }

    /// Extract the primary key of an item
    pub fn key_of(&self, item: &Item) -> Result<PrimaryKey> {
        let hash = string_attribute(item, &self.key.hash_key)?;
        let range = match &self.key.range_key {
            Some(name) => Some(string_attribute(item, name)?),
            None => None,
        };
        Ok(PrimaryKey { hash, range })
    }
}

fn string_attribute(item: &Item, name: &str) -> Result<String> {
    item.get(name)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            CapsuleError::MissingKeyAttribute {
                attribute: name.to_string(),
            }
            .into()
        })
}
