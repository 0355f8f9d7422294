//! Platform user records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::WireEnum;

/// Account status as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    /// Account is usable.
    Active,
    /// Account exists but is dormant.
    Inactive,
    /// Account was suspended by an administrator.
    Suspended,
    /// Account is locked (e.g. after repeated failed logins).
    Locked,
    /// Any value the gateway does not recognise.
    #[default]
    #[serde(other)]
    Unknown,
}

impl WireEnum for UserStatus {
    const VARIANTS: &'static [&'static str] = &["active", "inactive", "suspended", "locked"];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Suspended => "suspended",
            Self::Locked => "locked",
            Self::Unknown => "unknown",
        }
    }
}

/// Identity record. Created by the backend on registration; the console
/// only changes its status or soft-deletes it through admin actions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// Backend identifier.
    #[serde(deserialize_with = "super::lenient")]
    pub id: String,
    /// Login email.
    #[serde(deserialize_with = "super::lenient")]
    pub email: String,
    /// Organization the user belongs to, if any.
    #[serde(deserialize_with = "super::lenient")]
    pub organization: Option<String>,
    /// Role name (e.g. `"admin"`, `"operator"`, `"customer"`).
    #[serde(deserialize_with = "super::lenient")]
    pub role: String,
    /// Account status.
    #[serde(deserialize_with = "super::lenient")]
    pub status: UserStatus,
    /// Whether multi-factor authentication is enabled.
    #[serde(deserialize_with = "super::lenient")]
    pub mfa_enabled: bool,
    /// Registration timestamp.
    #[serde(deserialize_with = "super::lenient")]
    pub created_at: Option<DateTime<Utc>>,
    /// Most recent successful login.
    #[serde(deserialize_with = "super::lenient")]
    pub last_login_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn partial_record_uses_defaults() {
        let Ok(user) = serde_json::from_str::<User>(r#"{"id":"u-1","email":"a@b.io"}"#) else {
            panic!("partial user should deserialize");
        };
        assert_eq!(user.status, UserStatus::Unknown);
        assert!(!user.mfa_enabled);
        assert!(user.organization.is_none());
    }

    #[test]
    fn unrecognised_status_is_unknown() {
        let Ok(user) = serde_json::from_str::<User>(r#"{"id":"u-1","status":"banned"}"#) else {
            panic!("unknown status should deserialize");
        };
        assert_eq!(user.status, UserStatus::Unknown);
        assert_eq!(user.status.as_str(), "unknown");
    }

    #[test]
    fn known_status_parses() {
        let Ok(user) = serde_json::from_str::<User>(r#"{"status":"locked"}"#) else {
            panic!("status should deserialize");
        };
        assert_eq!(user.status, UserStatus::Locked);
    }

    #[test]
    fn explicit_nulls_fall_back_to_defaults() {
        let body = r#"{"id":"u-1","email":null,"role":null,"status":null,"mfa_enabled":null,"created_at":null}"#;
        let Ok(user) = serde_json::from_str::<User>(body) else {
            panic!("nulls should deserialize");
        };
        assert_eq!(user.id, "u-1");
        assert_eq!(user.email, "");
        assert_eq!(user.status, UserStatus::Unknown);
        assert!(!user.mfa_enabled);
        assert!(user.created_at.is_none());
    }

    #[test]
    fn wrong_typed_flag_is_false() {
        let Ok(user) = serde_json::from_str::<User>(r#"{"id":"u-2","mfa_enabled":"yes"}"#) else {
            panic!("bad flag should deserialize");
        };
        assert!(!user.mfa_enabled);
    }
}

