//! Provenance types stamped onto every mutation
//!
//! An [`Origin`] describes who issued a request and through which channel.
//! Commands carry the acting identity as an [`ExecBy`].

use serde::{Deserialize, Serialize};

/// Acting tenant and user of a command
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecBy {
    pub tenant_id: String,
    pub user_id: String,
}

impl ExecBy {
    pub fn new(tenant_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            user_id: user_id.into(),
        }
    }
}

/// Provenance context of the current request
///
/// Supplied by the transport layer (an HTTP handler, the CLI, a test).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Origin {
    pub channel: String,
    pub tenant_id: String,
    pub user_id: String,
}

impl Origin {
    /// Create a new Origin
    pub fn new(
        channel: impl Into<String>,
        tenant_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            channel: channel.into(),
            tenant_id: tenant_id.into(),
            user_id: user_id.into(),
        }
    }

    /// The acting identity of this origin
    pub fn exec_by(&self) -> ExecBy {
        ExecBy::new(self.tenant_id.clone(), self.user_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exec_by_from_origin() {
        let origin = Origin::new("WEB", "tenant-1", "user-1");
        let exec_by = origin.exec_by();

        assert_eq!(exec_by.tenant_id, "tenant-1");
        assert_eq!(exec_by.user_id, "user-1");
    }

    #[test]
    fn test_origin_camel_case_serialization() {
        let origin = Origin::new("WEB", "t1", "u1");
        let json = serde_json::to_value(&origin).unwrap();

        assert_eq!(json["channel"], "WEB");
        assert_eq!(json["tenantId"], "t1");
        assert_eq!(json["userId"], "u1");
    }

    #[test]
    fn test_origin_missing_fields_default_to_empty() {
        let origin: Origin = serde_json::from_str(r#"{"channel":"CLI"}"#).unwrap();
        assert_eq!(origin.channel, "CLI");
        assert!(origin.tenant_id.is_empty());
        assert!(origin.user_id.is_empty());
    }
}
