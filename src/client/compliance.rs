//! `compliance/*` endpoint accessors.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::{BackendClient, ListParams, Page, normalize_one};
use crate::domain::{ComplianceCase, CtrReport, GdprDataRequest, KycVerification, SarReport};
use crate::error::ConsoleError;

/// Body of `PATCH compliance/cases/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CaseStatusUpdate {
    /// Target status (`open`, `investigating`, `escalated`, `closed`).
    pub status: String,
    /// Investigator note attached to the transition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Accessor for regulatory workflow records.
#[derive(Debug, Clone)]
pub struct ComplianceApi {
    client: BackendClient,
}

impl ComplianceApi {
    /// Creates the accessor.
    #[must_use]
    pub const fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// `GET compliance/kyc`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn list_kyc(
        &self,
        params: &ListParams,
    ) -> Result<Page<KycVerification>, ConsoleError> {
        self.client.get_page(&["compliance", "kyc"], params).await
    }

    /// `GET compliance/sar`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn list_sar(&self, params: &ListParams) -> Result<Page<SarReport>, ConsoleError> {
        self.client.get_page(&["compliance", "sar"], params).await
    }

    /// `POST compliance/sar/{id}/file`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn file_sar(&self, id: &str) -> Result<Value, ConsoleError> {
        let value = self
            .client
            .post_value(&["compliance", "sar", id, "file"], &serde_json::json!({}))
            .await?;
        normalize_one(value)
    }

    /// `GET compliance/ctr`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn list_ctr(&self, params: &ListParams) -> Result<Page<CtrReport>, ConsoleError> {
        self.client.get_page(&["compliance", "ctr"], params).await
    }

    /// `GET compliance/gdpr`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn list_gdpr(
        &self,
        params: &ListParams,
    ) -> Result<Page<GdprDataRequest>, ConsoleError> {
        self.client.get_page(&["compliance", "gdpr"], params).await
    }

    /// `POST compliance/gdpr/{id}/complete`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn complete_gdpr(&self, id: &str) -> Result<Value, ConsoleError> {
        let value = self
            .client
            .post_value(
                &["compliance", "gdpr", id, "complete"],
                &serde_json::json!({}),
            )
            .await?;
        normalize_one(value)
    }

    /// `GET compliance/cases`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn list_cases(
        &self,
        params: &ListParams,
    ) -> Result<Page<ComplianceCase>, ConsoleError> {
        self.client.get_page(&["compliance", "cases"], params).await
    }

    /// `PATCH compliance/cases/{id}`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn update_case_status(
        &self,
        id: &str,
        update: &CaseStatusUpdate,
    ) -> Result<Value, ConsoleError> {
        let value = self
            .client
            .patch_value(&["compliance", "cases", id], update)
            .await?;
        normalize_one(value)
    }
}
