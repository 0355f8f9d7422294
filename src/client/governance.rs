//! `governance/*` endpoint accessors.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::{BackendClient, ListParams, Page, normalize_one};
use crate::domain::{Delegation, GovernanceProposal, Vote};
use crate::error::ConsoleError;

/// Body of `POST governance/votes`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CastVoteRequest {
    /// Proposal voted on. Filled from the route path when omitted.
    #[serde(default)]
    pub proposal_id: String,
    /// `for`, `against`, or `abstain`.
    pub choice: String,
    /// Voting weight (decimal string); the backend derives it when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
}

/// Accessor for proposals, votes, and delegations.
#[derive(Debug, Clone)]
pub struct GovernanceApi {
    client: BackendClient,
}

impl GovernanceApi {
    /// Creates the accessor.
    #[must_use]
    pub const fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// `GET governance/proposals`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn list_proposals(
        &self,
        params: &ListParams,
    ) -> Result<Page<GovernanceProposal>, ConsoleError> {
        self.client
            .get_page(&["governance", "proposals"], params)
            .await
    }

    /// `GET governance/proposals/{id}`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn get_proposal(&self, id: &str) -> Result<GovernanceProposal, ConsoleError> {
        self.client.get_one(&["governance", "proposals", id]).await
    }

    /// `GET governance/proposals/{id}/votes`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn list_votes(
        &self,
        proposal_id: &str,
        params: &ListParams,
    ) -> Result<Page<Vote>, ConsoleError> {
        self.client
            .get_page(&["governance", "proposals", proposal_id, "votes"], params)
            .await
    }

    /// `POST governance/votes`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn cast_vote(&self, request: &CastVoteRequest) -> Result<Value, ConsoleError> {
        let value = self.client.post_value(&["governance", "votes"], request).await?;
        normalize_one(value)
    }

    /// `GET governance/delegations`.
    ///
    /// # Errors
    ///
    /// Propagates backend, transport, and decode failures.
    pub async fn list_delegations(
        &self,
        params: &ListParams,
    ) -> Result<Page<Delegation>, ConsoleError> {
        self.client
            .get_page(&["governance", "delegations"], params)
            .await
    }
}
