use serde::{Deserialize, Serialize};

/// Lifecycle status of a capsule
///
/// SUBMITTED → ACTIVE on approval; SUBMITTED or ACTIVE → INACTIVE on disable.
/// Nothing transitions out of INACTIVE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    #[default]
    Submitted,
    Active,
    Inactive,
}

impl Status {
    /// The stored attribute value of this status
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Submitted => "SUBMITTED",
            Status::Active => "ACTIVE",
            Status::Inactive => "INACTIVE",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_as_stored_value() {
        for status in [Status::Submitted, Status::Active, Status::Inactive] {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, serde_json::Value::String(status.as_str().to_string()));
        }
    }

    #[test]
    fn test_status_round_trips_from_string() {
        let status: Status = serde_json::from_str("\"INACTIVE\"").unwrap();
        assert_eq!(status, Status::Inactive);
    }
}
