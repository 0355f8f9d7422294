//! `reports` endpoint accessors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::{BackendClient, ListParams, Page, normalize_one};
use crate::domain::Report;
use crate::error::ConsoleError;

/// Body of `POST reports`. Generation itself happens on the backend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateReportRequest {
    /// Report kind (e.g. `"transactions"`, `"balances"`).
    pub report_type: String,
    /// Output format; the backend default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Start of the reporting period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<DateTime<Utc>>,
    /// End of the reporting period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<DateTime<Utc>>,
}

/// Accessor for generated reports.
#[derive(Debug, Clone)]
pub struct ReportsApi {
    client: BackendClient,
}

impl ReportsApi {
    /// Creates the accessor.
    #[must_use]
    pub const fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// `GET reports`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn list(&self, params: &ListParams) -> Result<Page<Report>, ConsoleError> {
        self.client.get_page(&["reports"], params).await
    }

    /// `POST reports`: request a new report.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn generate(&self, request: &GenerateReportRequest) -> Result<Value, ConsoleError> {
        let value = self.client.post_value(&["reports"], request).await?;
        normalize_one(value)
    }
}
