//! `blockchain/*` endpoint accessors.

use serde_json::Value;

use super::{BackendClient, ListParams, Page, normalize_one};
use crate::domain::{DepositDetection, NetworkStatus, WithdrawalBroadcast};
use crate::error::ConsoleError;

/// Accessor for deposit detections, withdrawal broadcasts, and node health.
#[derive(Debug, Clone)]
pub struct BlockchainApi {
    client: BackendClient,
}

impl BlockchainApi {
    /// Creates the accessor.
    #[must_use]
    pub const fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// `GET blockchain/deposits`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn list_deposits(
        &self,
        params: &ListParams,
    ) -> Result<Page<DepositDetection>, ConsoleError> {
        self.client.get_page(&["blockchain", "deposits"], params).await
    }

    /// `GET blockchain/withdrawals`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn list_withdrawals(
        &self,
        params: &ListParams,
    ) -> Result<Page<WithdrawalBroadcast>, ConsoleError> {
        self.client
            .get_page(&["blockchain", "withdrawals"], params)
            .await
    }

    /// `GET blockchain/withdrawals/{id}`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn get_withdrawal(&self, id: &str) -> Result<WithdrawalBroadcast, ConsoleError> {
        self.client.get_one(&["blockchain", "withdrawals", id]).await
    }

    /// `POST blockchain/withdrawals/{id}/retry`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn retry_withdrawal(&self, id: &str) -> Result<Value, ConsoleError> {
        let value = self
            .client
            .post_value(
                &["blockchain", "withdrawals", id, "retry"],
                &serde_json::json!({}),
            )
            .await?;
        normalize_one(value)
    }

    /// `GET blockchain/networks`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn list_networks(&self) -> Result<Page<NetworkStatus>, ConsoleError> {
        self.client
            .get_page(&["blockchain", "networks"], &ListParams::window(0, 100))
            .await
    }
}
