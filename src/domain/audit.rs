//! Audit log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded administrative or user action.
///
/// `created_at` is kept as the backend's string so exports reproduce it
/// byte for byte.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditLog {
    /// Backend identifier.
    #[serde(deserialize_with = "super::lenient")]
    pub id: String,
    /// Acting user, if known.
    #[serde(deserialize_with = "super::lenient")]
    pub user_id: Option<String>,
    /// Action name (e.g. `"login"`, `"wallet.freeze"`).
    #[serde(deserialize_with = "super::lenient")]
    pub action: String,
    /// Type of the affected resource.
    #[serde(deserialize_with = "super::lenient")]
    pub resource_type: Option<String>,
    /// Identifier of the affected resource.
    #[serde(deserialize_with = "super::lenient")]
    pub resource_id: Option<String>,
    /// Outcome (e.g. `"success"`, `"failure"`).
    #[serde(deserialize_with = "super::lenient")]
    pub result: String,
    /// Client IP address.
    #[serde(deserialize_with = "super::lenient")]
    pub ip_address: Option<String>,
    /// Client user agent.
    #[serde(deserialize_with = "super::lenient")]
    pub user_agent: Option<String>,
    /// Timestamp as sent by the backend.
    #[serde(deserialize_with = "super::lenient")]
    pub created_at: String,
}

impl AuditLog {
    /// Parses `created_at` as an RFC 3339 timestamp.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}
