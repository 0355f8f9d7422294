//! `staking/*` endpoint accessors.

use serde_json::Value;

use super::{BackendClient, ListParams, Page, normalize_one};
use crate::domain::{StakingPool, StakingPosition, StakingReward};
use crate::error::ConsoleError;

/// Accessor for staking pools, positions, and rewards.
#[derive(Debug, Clone)]
pub struct StakingApi {
    client: BackendClient,
}

impl StakingApi {
    /// Creates the accessor.
    #[must_use]
    pub const fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// `GET staking/pools`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn list_pools(&self, params: &ListParams) -> Result<Page<StakingPool>, ConsoleError> {
        self.client.get_page(&["staking", "pools"], params).await
    }

    /// `POST staking/pools/{id}/distribute`: trigger a reward distribution.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn distribute_rewards(&self, pool_id: &str) -> Result<Value, ConsoleError> {
        let value = self
            .client
            .post_value(
                &["staking", "pools", pool_id, "distribute"],
                &serde_json::json!({}),
            )
            .await?;
        normalize_one(value)
    }

    /// `GET staking/positions`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn list_positions(
        &self,
        params: &ListParams,
    ) -> Result<Page<StakingPosition>, ConsoleError> {
        self.client.get_page(&["staking", "positions"], params).await
    }

    /// `POST staking/positions/{id}/unstake`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn unstake(&self, position_id: &str) -> Result<Value, ConsoleError> {
        let value = self
            .client
            .post_value(
                &["staking", "positions", position_id, "unstake"],
                &serde_json::json!({}),
            )
            .await?;
        normalize_one(value)
    }

    /// `GET staking/rewards`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn list_rewards(
        &self,
        params: &ListParams,
    ) -> Result<Page<StakingReward>, ConsoleError> {
        self.client.get_page(&["staking", "rewards"], params).await
    }
}
