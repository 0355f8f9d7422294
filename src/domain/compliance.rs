//! Regulatory workflow records: KYC, SAR, CTR, GDPR, and cases.
//!
//! Each record carries a status and, where the regulation imposes one, a
//! deadline. Overdue flags are derived at read time in [`crate::metrics`]
//! and never sent back to the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::WireEnum;

/// KYC verification status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    /// Submitted, awaiting review.
    Pending,
    /// Verified.
    Approved,
    /// Verification refused.
    Rejected,
    /// Verification lapsed.
    Expired,
    /// Any value the gateway does not recognise.
    #[default]
    #[serde(other)]
    Unknown,
}

impl WireEnum for KycStatus {
    const VARIANTS: &'static [&'static str] = &["pending", "approved", "rejected", "expired"];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Expired => "expired",
            Self::Unknown => "unknown",
        }
    }
}

/// Suspicious activity report status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SarStatus {
    /// Being written.
    Draft,
    /// Under compliance review.
    Review,
    /// Approved and waiting to be filed.
    Approved,
    /// Filed with the regulator.
    Filed,
    /// Rejected during review.
    Rejected,
    /// Any value the gateway does not recognise.
    #[default]
    #[serde(other)]
    Unknown,
}

impl WireEnum for SarStatus {
    const VARIANTS: &'static [&'static str] = &["draft", "review", "approved", "filed", "rejected"];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Review => "review",
            Self::Approved => "approved",
            Self::Filed => "filed",
            Self::Rejected => "rejected",
            Self::Unknown => "unknown",
        }
    }
}

/// Currency transaction report status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CtrStatus {
    /// Waiting to be filed.
    Pending,
    /// Filed with the regulator.
    Filed,
    /// Rejected by the regulator.
    Rejected,
    /// Any value the gateway does not recognise.
    #[default]
    #[serde(other)]
    Unknown,
}

impl WireEnum for CtrStatus {
    const VARIANTS: &'static [&'static str] = &["pending", "filed", "rejected"];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Filed => "filed",
            Self::Rejected => "rejected",
            Self::Unknown => "unknown",
        }
    }
}

/// GDPR data request status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GdprStatus {
    /// Received, not started.
    Pending,
    /// Being processed.
    Processing,
    /// Fulfilled.
    Completed,
    /// Refused.
    Rejected,
    /// Any value the gateway does not recognise.
    #[default]
    #[serde(other)]
    Unknown,
}

impl WireEnum for GdprStatus {
    const VARIANTS: &'static [&'static str] = &["pending", "processing", "completed", "rejected"];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
            Self::Unknown => "unknown",
        }
    }
}

/// Compliance case status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// Newly opened.
    Open,
    /// Being investigated.
    Investigating,
    /// Escalated to senior compliance.
    Escalated,
    /// Resolved.
    Closed,
    /// Any value the gateway does not recognise.
    #[default]
    #[serde(other)]
    Unknown,
}

impl WireEnum for CaseStatus {
    const VARIANTS: &'static [&'static str] = &["open", "investigating", "escalated", "closed"];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Investigating => "investigating",
            Self::Escalated => "escalated",
            Self::Closed => "closed",
            Self::Unknown => "unknown",
        }
    }
}

/// KYC verification of a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KycVerification {
    /// Backend identifier.
    #[serde(deserialize_with = "super::lenient")]
    pub id: String,
    /// Verified user.
    #[serde(deserialize_with = "super::lenient")]
    pub user_id: String,
    /// Verification tier (e.g. `"basic"`, `"enhanced"`).
    #[serde(deserialize_with = "super::lenient")]
    pub level: String,
    /// Review status.
    #[serde(deserialize_with = "super::lenient")]
    pub status: KycStatus,
    /// Backend-computed risk classification.
    #[serde(deserialize_with = "super::lenient")]
    pub risk_level: Option<String>,
    /// Submission timestamp.
    #[serde(deserialize_with = "super::lenient")]
    pub submitted_at: Option<DateTime<Utc>>,
    /// Review timestamp.
    #[serde(deserialize_with = "super::lenient")]
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Expiry of an approved verification.
    #[serde(deserialize_with = "super::lenient")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Suspicious activity report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SarReport {
    /// Backend identifier.
    #[serde(deserialize_with = "super::lenient")]
    pub id: String,
    /// Subject user.
    #[serde(deserialize_with = "super::lenient")]
    pub user_id: String,
    /// Short description of the activity.
    #[serde(deserialize_with = "super::lenient")]
    pub summary: String,
    /// Workflow status.
    #[serde(deserialize_with = "super::lenient")]
    pub status: SarStatus,
    /// Statutory filing deadline.
    #[serde(deserialize_with = "super::lenient")]
    pub deadline_date: Option<DateTime<Utc>>,
    /// Filing timestamp.
    #[serde(deserialize_with = "super::lenient")]
    pub filed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    #[serde(deserialize_with = "super::lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Currency transaction report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CtrReport {
    /// Backend identifier.
    #[serde(deserialize_with = "super::lenient")]
    pub id: String,
    /// Subject user.
    #[serde(deserialize_with = "super::lenient")]
    pub user_id: String,
    /// Reported amount (decimal string).
    #[serde(deserialize_with = "super::lenient")]
    pub amount: String,
    /// Currency of the amount.
    #[serde(deserialize_with = "super::lenient")]
    pub currency: String,
    /// Workflow status.
    #[serde(deserialize_with = "super::lenient")]
    pub status: CtrStatus,
    /// Statutory filing deadline.
    #[serde(deserialize_with = "super::lenient")]
    pub deadline_date: Option<DateTime<Utc>>,
    /// Filing timestamp.
    #[serde(deserialize_with = "super::lenient")]
    pub filed_at: Option<DateTime<Utc>>,
}

/// GDPR data subject request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GdprDataRequest {
    /// Backend identifier.
    #[serde(deserialize_with = "super::lenient")]
    pub id: String,
    /// Requesting user.
    #[serde(deserialize_with = "super::lenient")]
    pub user_id: String,
    /// Request type (e.g. `"access"`, `"erasure"`, `"portability"`).
    #[serde(deserialize_with = "super::lenient")]
    pub request_type: String,
    /// Workflow status.
    #[serde(deserialize_with = "super::lenient")]
    pub status: GdprStatus,
    /// Statutory response deadline.
    #[serde(deserialize_with = "super::lenient")]
    pub deadline_date: Option<DateTime<Utc>>,
    /// Completion timestamp.
    #[serde(deserialize_with = "super::lenient")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    #[serde(deserialize_with = "super::lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Compliance investigation case.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceCase {
    /// Backend identifier.
    #[serde(deserialize_with = "super::lenient")]
    pub id: String,
    /// Case title.
    #[serde(deserialize_with = "super::lenient")]
    pub title: String,
    /// Subject user.
    #[serde(deserialize_with = "super::lenient")]
    pub user_id: Option<String>,
    /// Assigned investigator.
    #[serde(deserialize_with = "super::lenient")]
    pub assignee: Option<String>,
    /// Priority (e.g. `"low"`, `"high"`, `"critical"`).
    #[serde(deserialize_with = "super::lenient")]
    pub priority: String,
    /// Workflow status.
    #[serde(deserialize_with = "super::lenient")]
    pub status: CaseStatus,
    /// Internal due date.
    #[serde(deserialize_with = "super::lenient")]
    pub due_date: Option<DateTime<Utc>>,
    /// Creation timestamp.
    #[serde(deserialize_with = "super::lenient")]
    pub created_at: Option<DateTime<Utc>>,
}
