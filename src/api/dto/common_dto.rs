//! Shared DTO types used across list endpoints.
//!
//! Query strings are validated against a fixed per-route schema. Values
//! that fail validation never reject the request: an unknown enum value is
//! dropped (no filter) and an unparsable page number falls back to its
//! default.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::client::ListParams;
use crate::filter::FilterSet;

/// Default page number.
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest accepted page size.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Raw list query string. Every field is kept as text so that bad values
/// fall back instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Free-text search over the resource's searchable fields.
    pub search: Option<String>,
    /// Status filter (validated per resource).
    pub status: Option<String>,
    /// Chain filter (validated against the supported chains).
    pub chain: Option<String>,
    /// Type filter (validated per resource).
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Role filter.
    pub role: Option<String>,
    /// Result filter.
    pub result: Option<String>,
    /// Currency filter.
    pub currency: Option<String>,
    /// Owning user filter.
    pub user_id: Option<String>,
    /// Lower date bound (`YYYY-MM-DD` or RFC 3339).
    pub date_from: Option<String>,
    /// Upper date bound (`YYYY-MM-DD` or RFC 3339).
    pub date_to: Option<String>,
    /// Page number, 1-based. Defaults to 1.
    pub page: Option<String>,
    /// Page size, at most 100. Defaults to 20.
    #[serde(rename = "pageSize", alias = "page_size")]
    pub page_size: Option<String>,
}

/// Which enumerated query fields a route accepts, with their allowed values.
///
/// An empty list means the field is not accepted by the route.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuerySchema {
    /// Allowed `status` values.
    pub status: &'static [&'static str],
    /// Allowed `type` values.
    pub kind: &'static [&'static str],
    /// Allowed `chain` values.
    pub chain: &'static [&'static str],
}

/// Resolved page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number, 1-based.
    pub page: u32,
    /// Page size.
    pub page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Zero-based offset of the first record.
    #[must_use]
    pub const fn offset(&self) -> u32 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

/// A validated list request.
#[derive(Debug, Clone)]
pub struct ListRequest {
    /// Parameters forwarded to the backend.
    pub params: ListParams,
    /// Predicates applied to the fetched page.
    pub filters: FilterSet,
    /// Page window.
    pub pagination: Pagination,
}

impl ListQuery {
    /// Validates the query against `schema`.
    #[must_use]
    pub fn resolve(&self, schema: &QuerySchema) -> ListRequest {
        let pagination = Pagination {
            page: parse_number("page", self.page.as_deref(), DEFAULT_PAGE, 1, u32::MAX),
            page_size: parse_number(
                "pageSize",
                self.page_size.as_deref(),
                DEFAULT_PAGE_SIZE,
                1,
                MAX_PAGE_SIZE,
            ),
        };

        let status = enum_value("status", self.status.as_deref(), schema.status);
        let chain = enum_value("chain", self.chain.as_deref(), schema.chain);
        let kind = enum_value("type", self.kind.as_deref(), schema.kind);
        let currency = non_blank(self.currency.as_deref());

        let mut filters = FilterSet::new();
        if let Some(search) = non_blank(self.search.as_deref()) {
            filters = filters.search(search);
        }
        for (field, value) in [
            ("status", status.clone()),
            ("chain", chain.clone()),
            ("type", kind),
            ("role", non_blank(self.role.as_deref())),
            ("result", non_blank(self.result.as_deref())),
            ("currency", currency.clone()),
        ] {
            if let Some(value) = value {
                filters = filters.with_enum(field, value);
            }
        }

        let params = ListParams {
            offset: pagination.offset(),
            limit: pagination.page_size,
            status,
            chain,
            currency,
            user_id: non_blank(self.user_id.as_deref()),
            date_from: parse_date("date_from", self.date_from.as_deref()),
            date_to: parse_date("date_to", self.date_to.as_deref()),
        };

        ListRequest {
            params,
            filters,
            pagination,
        }
    }
}

fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_number(field: &str, raw: Option<&str>, default: u32, min: u32, max: u32) -> u32 {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return default;
    };
    match raw.parse::<u32>() {
        Ok(n) if n >= min => n.min(max),
        _ => {
            debug!(field, value = raw, default, "invalid number in query, using default");
            default
        }
    }
}

fn enum_value(field: &str, raw: Option<&str>, allowed: &[&str]) -> Option<String> {
    let value = non_blank(raw)?.to_ascii_lowercase();
    if allowed.contains(&value.as_str()) {
        Some(value)
    } else {
        debug!(field, value = %value, "dropping unrecognised filter value");
        None
    }
}

fn parse_date(field: &str, raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = non_blank(raw)?;
    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Some(midnight) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Some(midnight.and_utc());
    }
    debug!(field, value = %raw, "dropping unparsable date filter");
    None
}

/// Pagination metadata included in list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PaginationMeta {
    /// Current page number.
    pub page: u32,
    /// Page size.
    pub page_size: u32,
    /// Total records reported by the backend.
    pub total: u64,
    /// Records on this page after client-side filtering.
    pub returned: usize,
}

/// List response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T> {
    /// Rows on this page, with derived fields.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// `{"data": ...}` wrapper for single-entity and mutation responses.
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T> {
    /// Response payload.
    pub data: T,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SUPPORTED_CHAINS, WireEnum, WithdrawalStatus};

    fn query(pairs: &[(&str, &str)]) -> ListQuery {
        let object: serde_json::Map<String, serde_json::Value> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), serde_json::Value::String((*v).to_string())))
            .collect();
        serde_json::from_value(serde_json::Value::Object(object)).unwrap_or_default()
    }

    const WITHDRAWALS: QuerySchema = QuerySchema {
        status: WithdrawalStatus::VARIANTS,
        kind: &[],
        chain: SUPPORTED_CHAINS,
    };

    #[test]
    fn defaults_when_absent() {
        let req = ListQuery::default().resolve(&WITHDRAWALS);
        assert_eq!(req.pagination, Pagination::default());
        assert_eq!(req.params.offset, 0);
        assert_eq!(req.params.limit, 20);
        assert!(req.filters.is_empty());
    }

    #[test]
    fn unparsable_numbers_fall_back() {
        let req = query(&[("page", "abc"), ("pageSize", "-5")]).resolve(&WITHDRAWALS);
        assert_eq!(req.pagination, Pagination::default());

        let req = query(&[("page", "0"), ("pageSize", "0")]).resolve(&WITHDRAWALS);
        assert_eq!(req.pagination, Pagination::default());
    }

    #[test]
    fn page_size_is_capped_and_offset_computed() {
        let req = query(&[("page", "3"), ("pageSize", "500")]).resolve(&WITHDRAWALS);
        assert_eq!(req.pagination.page_size, MAX_PAGE_SIZE);
        assert_eq!(req.params.offset, 200);
        assert_eq!(req.params.limit, 100);
    }

    #[test]
    fn unknown_enum_values_are_dropped() {
        let req = query(&[("status", "exploded"), ("chain", "dogecoin")]).resolve(&WITHDRAWALS);
        assert_eq!(req.params.status, None);
        assert_eq!(req.params.chain, None);
        assert!(req.filters.is_empty());
    }

    #[test]
    fn known_enum_values_are_forwarded_and_filtered() {
        let req = query(&[("status", "FAILED"), ("chain", "ethereum")]).resolve(&WITHDRAWALS);
        assert_eq!(req.params.status.as_deref(), Some("failed"));
        assert_eq!(req.params.chain.as_deref(), Some("ethereum"));
        assert_eq!(
            req.filters.enums,
            [("status", "failed".to_string()), ("chain", "ethereum".to_string())]
        );
    }

    #[test]
    fn type_is_ignored_where_not_accepted() {
        let req = query(&[("type", "hot")]).resolve(&WITHDRAWALS);
        assert!(req.filters.is_empty());
    }

    #[test]
    fn dates_accept_day_or_timestamp() {
        let req = query(&[("date_from", "2024-02-01"), ("date_to", "2024-02-03T12:00:00Z")])
            .resolve(&QuerySchema::default());
        assert_eq!(
            req.params.date_from.map(|d| d.to_rfc3339()),
            Some("2024-02-01T00:00:00+00:00".to_string())
        );
        assert!(req.params.date_to.is_some());

        let req = query(&[("date_from", "yesterday")]).resolve(&QuerySchema::default());
        assert!(req.params.date_from.is_none());
    }
}
