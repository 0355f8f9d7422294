//! `wallets` endpoint accessors.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::{BackendClient, ListParams, Page, normalize_one};
use crate::domain::Wallet;
use crate::error::ConsoleError;

/// Body of `POST wallets/{id}/freeze`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct WalletFreezeRequest {
    /// Why the wallet is being frozen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Accessor for custodial wallets.
#[derive(Debug, Clone)]
pub struct WalletsApi {
    client: BackendClient,
}

impl WalletsApi {
    /// Creates the accessor.
    #[must_use]
    pub const fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// `GET wallets`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn list(&self, params: &ListParams) -> Result<Page<Wallet>, ConsoleError> {
        self.client.get_page(&["wallets"], params).await
    }

    /// `GET wallets/{id}`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn get(&self, id: &str) -> Result<Wallet, ConsoleError> {
        self.client.get_one(&["wallets", id]).await
    }

    /// `POST wallets/{id}/freeze`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn freeze(
        &self,
        id: &str,
        request: &WalletFreezeRequest,
    ) -> Result<Value, ConsoleError> {
        let value = self.client.post_value(&["wallets", id, "freeze"], request).await?;
        normalize_one(value)
    }

    /// `POST wallets/{id}/unfreeze`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn unfreeze(&self, id: &str) -> Result<Value, ConsoleError> {
        let value = self
            .client
            .post_value(&["wallets", id, "unfreeze"], &serde_json::json!({}))
            .await?;
        normalize_one(value)
    }
}
