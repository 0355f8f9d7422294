//! Generated reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A report produced by the backend's report generator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Report {
    /// Backend identifier.
    #[serde(deserialize_with = "super::lenient")]
    pub id: String,
    /// Report kind (e.g. `"transactions"`, `"balances"`, `"compliance"`).
    #[serde(deserialize_with = "super::lenient")]
    pub report_type: String,
    /// Generation status (e.g. `"queued"`, `"running"`, `"completed"`).
    #[serde(deserialize_with = "super::lenient")]
    pub status: String,
    /// Output format (e.g. `"csv"`, `"pdf"`).
    #[serde(deserialize_with = "super::lenient")]
    pub format: String,
    /// User who requested the report.
    #[serde(deserialize_with = "super::lenient")]
    pub requested_by: String,
    /// Request timestamp.
    #[serde(deserialize_with = "super::lenient")]
    pub created_at: Option<DateTime<Utc>>,
    /// Completion timestamp.
    #[serde(deserialize_with = "super::lenient")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Download link once completed.
    #[serde(deserialize_with = "super::lenient")]
    pub download_url: Option<String>,
}
