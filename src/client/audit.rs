//! `audit-logs` endpoint accessor.

use super::{BackendClient, ListParams, Page};
use crate::domain::AuditLog;
use crate::error::ConsoleError;

/// Read-only accessor for the audit trail.
#[derive(Debug, Clone)]
pub struct AuditLogsApi {
    client: BackendClient,
}

impl AuditLogsApi {
    /// Creates the accessor.
    #[must_use]
    pub const fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// `GET audit-logs`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn list(&self, params: &ListParams) -> Result<Page<AuditLog>, ConsoleError> {
        self.client.get_page(&["audit-logs"], params).await
    }
}
