//! Typed query builder for secondary-index lookups and scan projections
//!
//! Callers describe a lookup as an index name plus equality conditions. Each
//! store backend turns that into its own dialect: [`IndexQuery::key_condition`]
//! renders the managed-store key-condition expression, and the SQLite backend
//! binds [`ResolvedQuery`] values into SQL.

use std::collections::BTreeMap;

use super::schema::{IndexSchema, TableSchema};
use super::Item;
use crate::errors::{CapsuleError, Result};

/// Equality condition on one attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub attribute: String,
    pub value: String,
}

/// Query against a secondary index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexQuery {
    index_name: String,
    conditions: Vec<Condition>,
    consistent_read: bool,
}

impl IndexQuery {
    /// Start a query on the named index (eventually consistent)
    pub fn on(index_name: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
            conditions: Vec::new(),
            consistent_read: false,
        }
    }

    /// Add an equality condition
    pub fn eq(mut self, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.push(Condition {
            attribute: attribute.into(),
            value: value.into(),
        });
        self
    }

    pub fn consistent_read(mut self, consistent_read: bool) -> Self {
        self.consistent_read = consistent_read;
        self
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_consistent_read(&self) -> bool {
        self.consistent_read
    }

    /// Render the managed-store key-condition expression
    ///
    /// Attribute names and values are always passed through placeholders
    /// (`#name` / `:name`), since names like `status` are reserved words.
    pub fn key_condition(&self) -> KeyCondition {
        let mut attribute_names = BTreeMap::new();
        let mut attribute_values = BTreeMap::new();
        let clauses: Vec<String> = self
            .conditions
            .iter()
            .map(|c| {
                let name = format!("#{}", c.attribute);
                let value = format!(":{}", c.attribute);
                attribute_names.insert(name.clone(), c.attribute.clone());
                attribute_values.insert(value.clone(), c.value.clone());
                format!("{} = {}", name, value)
            })
            .collect();

        KeyCondition {
            expression: clauses.join(" and "),
            attribute_names,
            attribute_values,
        }
    }

    /// Validate this query against a table schema
    ///
    /// The conditions must name the index hash key, and optionally its range
    /// key, each at most once. Anything else is a key schema mismatch.
    pub fn resolve<'a>(&'a self, schema: &'a TableSchema) -> Result<ResolvedQuery<'a>> {
        let index = schema.index(&self.index_name)?;
        let mismatch = |reason: String| -> crate::errors::ExError {
            CapsuleError::KeySchemaMismatch {
                table: schema.name.clone(),
                reason: format!("index {}: {}", index.name, reason),
            }
            .into()
        };

        let mut hash_value = None;
        let mut range_value = None;
        for condition in &self.conditions {
            let slot = if condition.attribute == index.hash_key {
                &mut hash_value
            } else if index.range_key.as_deref() == Some(condition.attribute.as_str()) {
                &mut range_value
            } else {
                return Err(mismatch(format!(
                    "'{}' is not a key attribute",
                    condition.attribute
                )));
            };
            if slot.replace(condition.value.as_str()).is_some() {
                return Err(mismatch(format!(
                    "duplicate condition on '{}'",
                    condition.attribute
                )));
            }
        }

        let hash_value = hash_value
            .ok_or_else(|| mismatch(format!("missing condition on '{}'", index.hash_key)))?;

        Ok(ResolvedQuery {
            index,
            hash_value,
            range_value,
        })
    }
}

/// Managed-store dialect of an [`IndexQuery`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCondition {
    pub expression: String,
    pub attribute_names: BTreeMap<String, String>,
    pub attribute_values: BTreeMap<String, String>,
}

/// An [`IndexQuery`] checked against its index
#[derive(Debug, Clone, Copy)]
pub struct ResolvedQuery<'a> {
    pub index: &'a IndexSchema,
    pub hash_value: &'a str,
    pub range_value: Option<&'a str>,
}

impl ResolvedQuery<'_> {
    /// Whether an item's index entry satisfies this query
    pub fn matches(&self, item: &Item) -> bool {
        match self.index.entry_for(item) {
            Some((hash, range)) => {
                hash == self.hash_value
                    && self
                        .range_value
                        .map_or(true, |wanted| range.as_deref() == Some(wanted))
            }
            None => false,
        }
    }
}

/// Criteria for a lookup on a two-attribute index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryCriteria {
    pub index_name: String,
    pub hash_key_name: String,
    pub hash_key_value: String,
    /// Range key name and value; `None` to match on the hash key only
    pub range_key: Option<(String, String)>,
}

impl QueryCriteria {
    pub fn new(
        index_name: impl Into<String>,
        hash_key_name: impl Into<String>,
        hash_key_value: impl Into<String>,
    ) -> Self {
        Self {
            index_name: index_name.into(),
            hash_key_name: hash_key_name.into(),
            hash_key_value: hash_key_value.into(),
            range_key: None,
        }
    }

    pub fn with_range_key(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.range_key = Some((name.into(), value.into()));
        self
    }

    /// Build the index query for these criteria
    pub fn to_query(&self) -> IndexQuery {
        let query = IndexQuery::on(&self.index_name).eq(&self.hash_key_name, &self.hash_key_value);
        match &self.range_key {
            Some((name, value)) => query.eq(name, value),
            None => query,
        }
    }
}

/// Attributes to keep on scanned items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    attributes: Vec<String>,
}

impl Projection {
    pub fn of<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attributes: attributes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Copy of `item` reduced to the projected attributes
    pub fn apply(&self, item: &Item) -> Item {
        self.attributes
            .iter()
            .filter_map(|name| item.get(name).map(|v| (name.clone(), v.clone())))
            .collect()
    }
}
