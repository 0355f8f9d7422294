//! Query-string parameters shared by backend list endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{CacheKey, Resource};

/// Parameters forwarded to a backend list endpoint.
///
/// Only present fields are serialized, so the backend sees exactly the
/// filters the console asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListParams {
    /// Number of records to skip.
    pub offset: u32,
    /// Maximum number of records to return.
    pub limit: u32,
    /// Status filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Chain filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,
    /// Currency filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Owning user filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Inclusive lower bound on the record timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<DateTime<Utc>>,
    /// Exclusive upper bound on the record timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<DateTime<Utc>>,
}

impl ListParams {
    /// Creates parameters for one page window.
    #[must_use]
    pub fn window(offset: u32, limit: u32) -> Self {
        Self {
            offset,
            limit,
            ..Self::default()
        }
    }

    /// Sets the status filter.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Builds the cache key identifying a read of `resource` with these
    /// parameters. Field order is fixed so equal parameters give equal keys.
    #[must_use]
    pub fn cache_key(&self, resource: Resource) -> CacheKey {
        CacheKey::new(resource)
            .with("offset", self.offset)
            .with("limit", self.limit)
            .with_opt("status", self.status.as_deref())
            .with_opt("chain", self.chain.as_deref())
            .with_opt("currency", self.currency.as_deref())
            .with_opt("user_id", self.user_id.as_deref())
            .with_opt("date_from", self.date_from.map(|d| d.to_rfc3339()))
            .with_opt("date_to", self.date_to.map(|d| d.to_rfc3339()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_filters_are_not_serialized() {
        let params = ListParams::window(0, 20);
        let json = serde_json::to_value(&params).unwrap_or_default();
        assert_eq!(json, serde_json::json!({"offset": 0, "limit": 20}));
    }

    #[test]
    fn cache_key_includes_filters() {
        let plain = ListParams::window(0, 20).cache_key(Resource::Deposits);
        let filtered = ListParams::window(0, 20)
            .with_status("confirming")
            .cache_key(Resource::Deposits);
        assert_ne!(plain, filtered);
        assert_eq!(
            filtered.to_string(),
            "deposits?offset=0&limit=20&status=confirming"
        );
    }
}
