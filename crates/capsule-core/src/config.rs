//! TOML configuration
//!
//! ```toml
//! [table]
//! name = "Capsule"
//!
//! [index]
//! name = "topicGSI"
//!
//! [store]
//! path = ".capsule/store.db"
//!
//! [logging]
//! profile = "production"
//!
//! [catalogs]
//! publisher = ["AWS", "GCP"]
//! ```
//!
//! Every section and key is optional.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::{CapsuleError, ExError, ExErrorKind, Result};
use crate::gateway::schema::{DEFAULT_TABLE_NAME, DEFAULT_TOPIC_INDEX};
use crate::gateway::TableSchema;
use crate::logging_facility::Profile;
use crate::model::Catalogs;

pub const DEFAULT_STORE_PATH: &str = ".capsule/store.db";

/// The capsule table is hash-keyed on `capsuleId`; only its name is configurable
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    pub name: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_TABLE_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    pub name: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_TOPIC_INDEX.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub profile: Profile,
}

/// Whole configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CapsuleConfig {
    pub table: TableConfig,
    pub index: IndexConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
    pub catalogs: Catalogs,
}

impl CapsuleConfig {
    /// Read and parse a configuration file
    ///
    /// # Errors
    ///
    /// Returns `Io` when the file cannot be read and `Config` when it does
    /// not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ExError::new(ExErrorKind::Io)
                .with_op("load_config")
                .with_entity_id(path.display().to_string())
                .with_message(e.to_string())
        })?;
        Self::from_toml_str(&text).map_err(|e| e.with_entity_id(path.display().to_string()))
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns `Config` on a syntax error, an unknown key, or an empty
    /// table or index name.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: CapsuleConfig = toml::from_str(text).map_err(|e| {
            ExError::from(CapsuleError::InvalidConfig {
                reason: e.to_string(),
            })
            .with_op("parse_config")
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| -> ExError {
            ExError::from(CapsuleError::InvalidConfig {
                reason: reason.to_string(),
            })
            .with_op("parse_config")
        };
        if self.table.name.trim().is_empty() {
            return Err(invalid("table.name must not be empty"));
        }
        if self.index.name.trim().is_empty() {
            return Err(invalid("index.name must not be empty"));
        }
        Ok(())
    }

    /// Table schema described by the `[table]` and `[index]` sections
    pub fn table_schema(&self) -> TableSchema {
        TableSchema::capsules(&self.table.name, &self.index.name)
    }
}
