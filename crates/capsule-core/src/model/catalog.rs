//! Fixed metadata catalogs
//!
//! Catalogs are immutable tables built once at process start, from the
//! built-in values or from the `[catalogs]` configuration section.

use serde::Deserialize;
use std::collections::BTreeMap;

/// The five metadata catalogs exposed by `get_metadata`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Catalog {
    CapsuleType,
    Publisher,
    TopicLevel,
    TargetAudience,
    ExpiryInterval,
}

impl Catalog {
    pub const ALL: [Catalog; 5] = [
        Catalog::CapsuleType,
        Catalog::Publisher,
        Catalog::TopicLevel,
        Catalog::TargetAudience,
        Catalog::ExpiryInterval,
    ];

    /// Key of this catalog in the metadata map
    pub fn key(&self) -> &'static str {
        match self {
            Catalog::CapsuleType => "capsuleType",
            Catalog::Publisher => "publisher",
            Catalog::TopicLevel => "topicLevel",
            Catalog::TargetAudience => "targetAudience",
            Catalog::ExpiryInterval => "expiryInterval",
        }
    }

    /// Built-in values, in declaration order
    pub fn builtin_values(&self) -> &'static [&'static str] {
        match self {
            Catalog::CapsuleType => &[
                "ARTICLE",
                "BLOG",
                "COURSE",
                "EBOOK",
                "NEWS",
                "PODCAST",
                "RESEARCH_PAPER",
                "TUTORIAL",
                "VIDEO",
                "WEBINAR",
            ],
            Catalog::Publisher => &[
                "AWS",
                "AZURE",
                "GCP",
                "MEDIUM",
                "DEV_TO",
                "DZONE",
                "INFOQ",
                "GITHUB",
                "YOUTUBE",
                "OTHERS",
            ],
            Catalog::TopicLevel => &["BEGINNER", "INTERMEDIATE", "ADVANCED"],
            Catalog::TargetAudience => &["STUDENT", "DEVELOPER", "ARCHITECT", "MANAGER", "ALL"],
            Catalog::ExpiryInterval => &[
                "ONE_DAY",
                "ONE_WEEK",
                "ONE_MONTH",
                "THREE_MONTHS",
                "SIX_MONTHS",
                "ONE_YEAR",
                "NEVER",
            ],
        }
    }
}

fn builtin(catalog: Catalog) -> Vec<String> {
    catalog
        .builtin_values()
        .iter()
        .map(|v| v.to_string())
        .collect()
}

/// Catalog tables
///
/// Deserializes from the `[catalogs]` configuration table; any catalog the
/// table omits keeps its built-in values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Catalogs {
    pub capsule_type: Vec<String>,
    pub publisher: Vec<String>,
    pub topic_level: Vec<String>,
    pub target_audience: Vec<String>,
    pub expiry_interval: Vec<String>,
}

impl Default for Catalogs {
    fn default() -> Self {
        Self {
            capsule_type: builtin(Catalog::CapsuleType),
            publisher: builtin(Catalog::Publisher),
            topic_level: builtin(Catalog::TopicLevel),
            target_audience: builtin(Catalog::TargetAudience),
            expiry_interval: builtin(Catalog::ExpiryInterval),
        }
    }
}

impl Catalogs {
    /// Values of one catalog, in declaration order
    pub fn values(&self, catalog: Catalog) -> &[String] {
        match catalog {
            Catalog::CapsuleType => &self.capsule_type,
            Catalog::Publisher => &self.publisher,
            Catalog::TopicLevel => &self.topic_level,
            Catalog::TargetAudience => &self.target_audience,
            Catalog::ExpiryInterval => &self.expiry_interval,
        }
    }

    /// All catalogs keyed by catalog name
    pub fn to_map(&self) -> BTreeMap<String, Vec<String>> {
        Catalog::ALL
            .iter()
            .map(|c| (c.key().to_string(), self.values(*c).to_vec()))
            .collect()
    }
}
