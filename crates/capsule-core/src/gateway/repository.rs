//! Persistence gateway over a key/attribute store
//!
//! `CapsuleRepository` is the only code that knows capsule attribute names,
//! the topic index layout and the `findAll` projection. It does no retries
//! and catches nothing; store faults propagate to the caller unchanged.

use super::query::{Projection, QueryCriteria};
use super::schema::PrimaryKey;
use super::store::AttributeStore;
use super::Item;
use crate::errors::Result;
use crate::model::capsule::{
    ATTR_CAPSULE_ID, ATTR_CATEGORY, ATTR_STATUS, ATTR_TITLE, ATTR_TOPIC_CODE,
};
use crate::model::{Capsule, Status};

/// Capsule persistence operations
pub trait CapsuleGateway: Send + Sync {
    /// All capsules, reduced to id, title, topic code, category and status
    ///
    /// # Errors
    ///
    /// Returns any store fault.
    fn find_all(&self) -> Result<Vec<Capsule>>;

    /// Total number of capsules, unfiltered
    ///
    /// # Errors
    ///
    /// Returns any store fault.
    fn get_all_capsules_count(&self) -> Result<u64>;

    /// Point lookup by capsule id
    ///
    /// # Errors
    ///
    /// Returns any store fault. An absent capsule is `Ok(None)`.
    fn find_by(&self, capsule_id: &str) -> Result<Option<Capsule>>;

    /// Point lookup by hash and range key
    ///
    /// # Errors
    ///
    /// Returns `KeySchemaMismatch` when the table has no range key.
    fn find_by_composite(&self, hash_key: &str, range_key: &str) -> Result<Option<Capsule>>;

    /// Unconditional upsert; returns the saved capsule
    ///
    /// # Errors
    ///
    /// Returns any store fault.
    fn save(&self, capsule: Capsule) -> Result<Capsule>;

    /// ACTIVE capsules for each topic, concatenated in topic order
    ///
    /// # Errors
    ///
    /// Returns the first store fault; no partial result is returned.
    fn find_all_feeds(&self, topics: &[String]) -> Result<Vec<Capsule>>;

    /// ACTIVE capsules for one topic
    ///
    /// # Errors
    ///
    /// Returns any store fault.
    fn find_all_by_topic_code(&self, topic_code: &str) -> Result<Vec<Capsule>>;

    /// SUBMITTED capsules awaiting approval
    ///
    /// # Errors
    ///
    /// Returns any store fault.
    fn find_all_pending_approval(&self) -> Result<Vec<Capsule>>;
}

/// Gateway implementation generic over the store backend
#[derive(Debug)]
pub struct CapsuleRepository<S> {
    store: S,
    topic_index: String,
}

impl<S: AttributeStore> CapsuleRepository<S> {
    /// Wrap a store; the topic index is the first index its schema declares
    pub fn new(store: S) -> Self {
        let topic_index = store
            .schema()
            .indexes
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| super::schema::DEFAULT_TOPIC_INDEX.to_string());
        Self { store, topic_index }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn summary_projection() -> Projection {
        Projection::of([
            ATTR_CAPSULE_ID,
            ATTR_TITLE,
            ATTR_TOPIC_CODE,
            ATTR_CATEGORY,
            ATTR_STATUS,
        ])
    }

    fn query(&self, criteria: &QueryCriteria) -> Result<Vec<Capsule>> {
        let query = criteria.to_query();
        let key_condition = query.key_condition();
        tracing::debug!(
            index = query.index_name(),
            key_condition = %key_condition.expression,
            consistent_read = query.is_consistent_read(),
            "index query"
        );

        to_capsules(self.store.query(&query)?)
    }

    fn load(&self, key: &PrimaryKey) -> Result<Option<Capsule>> {
        self.store.load(key)?.map(Capsule::from_item).transpose()
    }
}

fn to_capsules(items: Vec<Item>) -> Result<Vec<Capsule>> {
    items.into_iter().map(Capsule::from_item).collect()
}

impl<S: AttributeStore> CapsuleGateway for CapsuleRepository<S> {
    fn find_all(&self) -> Result<Vec<Capsule>> {
        let projection = Self::summary_projection();
        to_capsules(self.store.scan(Some(&projection))?)
    }

    fn get_all_capsules_count(&self) -> Result<u64> {
        self.store.count()
    }

    fn find_by(&self, capsule_id: &str) -> Result<Option<Capsule>> {
        self.load(&PrimaryKey::hash(capsule_id))
    }

    fn find_by_composite(&self, hash_key: &str, range_key: &str) -> Result<Option<Capsule>> {
        self.load(&PrimaryKey::composite(hash_key, range_key))
    }

    fn save(&self, capsule: Capsule) -> Result<Capsule> {
        self.store.put(capsule.to_item()?)?;
        Ok(capsule)
    }

    fn find_all_feeds(&self, topics: &[String]) -> Result<Vec<Capsule>> {
        let mut feed = Vec::new();
        for topic in topics {
            feed.extend(self.find_all_by_topic_code(topic)?);
        }
        Ok(feed)
    }

    fn find_all_by_topic_code(&self, topic_code: &str) -> Result<Vec<Capsule>> {
        let criteria = QueryCriteria::new(&self.topic_index, ATTR_STATUS, Status::Active.as_str())
            .with_range_key(ATTR_TOPIC_CODE, topic_code);
        self.query(&criteria)
    }

    fn find_all_pending_approval(&self) -> Result<Vec<Capsule>> {
        let criteria =
            QueryCriteria::new(&self.topic_index, ATTR_STATUS, Status::Submitted.as_str());
        self.query(&criteria)
    }
}
