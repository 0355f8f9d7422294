//! Console service: cached reads and cache-invalidating mutations.

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::cache::{CachePolicies, QueryCache};
use crate::client::compliance::CaseStatusUpdate;
use crate::client::governance::CastVoteRequest;
use crate::client::reports::GenerateReportRequest;
use crate::client::users::UserStatusUpdate;
use crate::client::wallets::WalletFreezeRequest;
use crate::client::{
    AuditLogsApi, BackendClient, BlockchainApi, ComplianceApi, GovernanceApi, ListParams, Page,
    ReportsApi, StakingApi, UsersApi, WalletsApi,
};
use crate::domain::{
    AuditLog, CacheKey, ComplianceCase, CtrReport, Delegation, DepositDetection, EventBus,
    GdprDataRequest, GovernanceProposal, KycVerification, NetworkStatus, Report, Resource,
    SarReport, StakingPool, StakingPosition, StakingReward, User, Vote, Wallet, WireEnum,
    WithdrawalBroadcast, WithdrawalStatus,
};
use crate::error::ConsoleError;

/// Page window read by the dashboard and refreshed by the pollers.
pub const OVERVIEW_LIMIT: u32 = 100;

/// Parameters of the overview window.
#[must_use]
pub fn overview_params() -> ListParams {
    ListParams::window(0, OVERVIEW_LIMIT)
}

/// Orchestration layer between the HTTP surface and the backend.
///
/// Every read goes through the [`QueryCache`] under the resource's policy.
/// Every mutation is forwarded to the backend and, only when it succeeds,
/// invalidates the resources it affects. A failed mutation leaves the cache
/// untouched.
#[derive(Debug)]
pub struct ConsoleService {
    users: UsersApi,
    wallets: WalletsApi,
    blockchain: BlockchainApi,
    governance: GovernanceApi,
    staking: StakingApi,
    compliance: ComplianceApi,
    audit: AuditLogsApi,
    reports: ReportsApi,
    cache: Arc<QueryCache>,
    policies: CachePolicies,
    event_bus: EventBus,
}

impl ConsoleService {
    /// Creates a new `ConsoleService`.
    #[must_use]
    pub fn new(
        client: &BackendClient,
        cache: Arc<QueryCache>,
        policies: CachePolicies,
        event_bus: EventBus,
    ) -> Self {
        Self {
            users: UsersApi::new(client.clone()),
            wallets: WalletsApi::new(client.clone()),
            blockchain: BlockchainApi::new(client.clone()),
            governance: GovernanceApi::new(client.clone()),
            staking: StakingApi::new(client.clone()),
            compliance: ComplianceApi::new(client.clone()),
            audit: AuditLogsApi::new(client.clone()),
            reports: ReportsApi::new(client.clone()),
            cache,
            policies,
            event_bus,
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns a reference to the inner [`QueryCache`].
    #[must_use]
    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    /// Returns the policy table.
    #[must_use]
    pub fn policies(&self) -> &CachePolicies {
        &self.policies
    }

    pub(crate) async fn cached<T, F, Fut>(&self, key: CacheKey, fetch: F) -> Result<Arc<T>, ConsoleError>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ConsoleError>>,
    {
        let stale_after = self.policies.for_resource(key.resource()).stale_after;
        self.cache.get_or_fetch(&key, stale_after, fetch).await
    }

    async fn invalidate(&self, resources: &[Resource]) {
        for resource in resources {
            let _ = self.cache.invalidate(*resource).await;
        }
    }

    // -- users ---------------------------------------------------------------

    /// Lists users.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn list_users(&self, params: &ListParams) -> Result<Arc<Page<User>>, ConsoleError> {
        self.cached(params.cache_key(Resource::Users), || self.users.list(params))
            .await
    }

    /// Fetches one user.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn get_user(&self, id: &str) -> Result<Arc<User>, ConsoleError> {
        let key = CacheKey::new(Resource::Users).with("id", id);
        self.cached(key, || self.users.get(id)).await
    }

    /// Changes a user's account status.
    ///
    /// # Errors
    ///
    /// Propagates backend failures; the cache is only invalidated on success.
    pub async fn update_user_status(
        &self,
        id: &str,
        update: &UserStatusUpdate,
    ) -> Result<Value, ConsoleError> {
        let result = self.users.update_status(id, update).await?;
        self.invalidate(&[Resource::Users, Resource::Dashboard]).await;
        info!(user_id = id, status = %update.status, "user status updated");
        Ok(result)
    }

    /// Soft-deletes a user.
    ///
    /// # Errors
    ///
    /// Propagates backend failures; the cache is only invalidated on success.
    pub async fn delete_user(&self, id: &str) -> Result<(), ConsoleError> {
        self.users.soft_delete(id).await?;
        self.invalidate(&[Resource::Users, Resource::Dashboard]).await;
        info!(user_id = id, "user deleted");
        Ok(())
    }

    // -- wallets -------------------------------------------------------------

    /// Lists wallets.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn list_wallets(&self, params: &ListParams) -> Result<Arc<Page<Wallet>>, ConsoleError> {
        self.cached(params.cache_key(Resource::Wallets), || self.wallets.list(params))
            .await
    }

    /// Fetches one wallet.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn get_wallet(&self, id: &str) -> Result<Arc<Wallet>, ConsoleError> {
        let key = CacheKey::new(Resource::Wallets).with("id", id);
        self.cached(key, || self.wallets.get(id)).await
    }

    /// Freezes a wallet.
    ///
    /// # Errors
    ///
    /// Propagates backend failures; the cache is only invalidated on success.
    pub async fn freeze_wallet(
        &self,
        id: &str,
        request: &WalletFreezeRequest,
    ) -> Result<Value, ConsoleError> {
        let result = self.wallets.freeze(id, request).await?;
        self.invalidate(&[Resource::Wallets, Resource::Dashboard]).await;
        info!(wallet_id = id, "wallet frozen");
        Ok(result)
    }

    /// Unfreezes a wallet.
    ///
    /// # Errors
    ///
    /// Propagates backend failures; the cache is only invalidated on success.
    pub async fn unfreeze_wallet(&self, id: &str) -> Result<Value, ConsoleError> {
        let result = self.wallets.unfreeze(id).await?;
        self.invalidate(&[Resource::Wallets, Resource::Dashboard]).await;
        info!(wallet_id = id, "wallet unfrozen");
        Ok(result)
    }

    // -- blockchain ----------------------------------------------------------

    /// Lists deposit detections.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn list_deposits(
        &self,
        params: &ListParams,
    ) -> Result<Arc<Page<DepositDetection>>, ConsoleError> {
        self.cached(params.cache_key(Resource::Deposits), || {
            self.blockchain.list_deposits(params)
        })
        .await
    }

    /// Lists withdrawal broadcasts.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn list_withdrawals(
        &self,
        params: &ListParams,
    ) -> Result<Arc<Page<WithdrawalBroadcast>>, ConsoleError> {
        self.cached(params.cache_key(Resource::Withdrawals), || {
            self.blockchain.list_withdrawals(params)
        })
        .await
    }

    /// Lists node health for every chain.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn list_networks(&self) -> Result<Arc<Page<NetworkStatus>>, ConsoleError> {
        self.cached(CacheKey::new(Resource::Networks), || {
            self.blockchain.list_networks()
        })
        .await
    }

    /// Asks the backend to rebroadcast a failed withdrawal.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Conflict`] without calling the backend when a
    /// cached copy of the withdrawal shows a status other than `failed`.
    /// Otherwise propagates backend failures; the cache is only invalidated
    /// on success.
    pub async fn retry_withdrawal(&self, id: &str) -> Result<Value, ConsoleError> {
        if let Some(status) = self.known_withdrawal_status(id).await
            && status != WithdrawalStatus::Failed
        {
            return Err(ConsoleError::Conflict(format!(
                "withdrawal {id} is {}, only failed withdrawals can be retried",
                status.as_str()
            )));
        }

        let result = self.blockchain.retry_withdrawal(id).await?;
        self.invalidate(&[Resource::Withdrawals, Resource::Dashboard]).await;
        info!(withdrawal_id = id, "withdrawal retry requested");
        Ok(result)
    }

    /// Status of `id` in the most recently fetched live copy, whether that
    /// copy is a list page or the detail entry.
    async fn known_withdrawal_status(&self, id: &str) -> Option<WithdrawalStatus> {
        let from_pages = self
            .cache
            .find_newest::<Page<WithdrawalBroadcast>, _, _>(Resource::Withdrawals, |page| {
                page.items.iter().find(|w| w.id == id).map(|w| w.status)
            })
            .await;
        let from_detail = self
            .cache
            .find_newest::<WithdrawalBroadcast, _, _>(Resource::Withdrawals, |w| {
                (w.id == id).then_some(w.status)
            })
            .await;
        [from_pages, from_detail]
            .into_iter()
            .flatten()
            .max_by_key(|(fetched_at, _)| *fetched_at)
            .map(|(_, status)| status)
    }

    // -- governance ----------------------------------------------------------

    /// Lists governance proposals.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn list_proposals(
        &self,
        params: &ListParams,
    ) -> Result<Arc<Page<GovernanceProposal>>, ConsoleError> {
        self.cached(params.cache_key(Resource::Proposals), || {
            self.governance.list_proposals(params)
        })
        .await
    }

    /// Fetches one proposal.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn get_proposal(&self, id: &str) -> Result<Arc<GovernanceProposal>, ConsoleError> {
        let key = CacheKey::new(Resource::Proposals).with("id", id);
        self.cached(key, || self.governance.get_proposal(id)).await
    }

    /// Lists the votes cast on a proposal.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn list_votes(
        &self,
        proposal_id: &str,
        params: &ListParams,
    ) -> Result<Arc<Page<Vote>>, ConsoleError> {
        let key = params
            .cache_key(Resource::Votes)
            .with("proposal_id", proposal_id);
        self.cached(key, || self.governance.list_votes(proposal_id, params))
            .await
    }

    /// Casts a vote on a proposal.
    ///
    /// # Errors
    ///
    /// Propagates backend failures; the cache is only invalidated on success.
    pub async fn cast_vote(
        &self,
        proposal_id: &str,
        request: &CastVoteRequest,
    ) -> Result<Value, ConsoleError> {
        let request = CastVoteRequest {
            proposal_id: proposal_id.to_string(),
            ..request.clone()
        };
        let result = self.governance.cast_vote(&request).await?;
        self.invalidate(&[Resource::Proposals, Resource::Votes]).await;
        info!(proposal_id, choice = %request.choice, "vote cast");
        Ok(result)
    }

    /// Lists vote delegations.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn list_delegations(
        &self,
        params: &ListParams,
    ) -> Result<Arc<Page<Delegation>>, ConsoleError> {
        self.cached(params.cache_key(Resource::Delegations), || {
            self.governance.list_delegations(params)
        })
        .await
    }

    // -- staking -------------------------------------------------------------

    /// Lists staking pools.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn list_pools(&self, params: &ListParams) -> Result<Arc<Page<StakingPool>>, ConsoleError> {
        self.cached(params.cache_key(Resource::StakingPools), || {
            self.staking.list_pools(params)
        })
        .await
    }

    /// Triggers reward distribution for a pool.
    ///
    /// # Errors
    ///
    /// Propagates backend failures; the cache is only invalidated on success.
    pub async fn distribute_rewards(&self, pool_id: &str) -> Result<Value, ConsoleError> {
        let result = self.staking.distribute_rewards(pool_id).await?;
        self.invalidate(&[Resource::StakingPools, Resource::StakingPositions])
            .await;
        info!(pool_id, "staking rewards distributed");
        Ok(result)
    }

    /// Lists staking positions.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn list_positions(
        &self,
        params: &ListParams,
    ) -> Result<Arc<Page<StakingPosition>>, ConsoleError> {
        self.cached(params.cache_key(Resource::StakingPositions), || {
            self.staking.list_positions(params)
        })
        .await
    }

    /// Unstakes a position.
    ///
    /// # Errors
    ///
    /// Propagates backend failures; the cache is only invalidated on success.
    pub async fn unstake(&self, position_id: &str) -> Result<Value, ConsoleError> {
        let result = self.staking.unstake(position_id).await?;
        self.invalidate(&[Resource::StakingPools, Resource::StakingPositions])
            .await;
        info!(position_id, "position unstaked");
        Ok(result)
    }

    /// Lists distributed rewards.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn list_rewards(
        &self,
        params: &ListParams,
    ) -> Result<Arc<Page<StakingReward>>, ConsoleError> {
        self.cached(params.cache_key(Resource::StakingRewards), || {
            self.staking.list_rewards(params)
        })
        .await
    }

    // -- compliance ----------------------------------------------------------

    /// Lists KYC verifications.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn list_kyc(
        &self,
        params: &ListParams,
    ) -> Result<Arc<Page<KycVerification>>, ConsoleError> {
        self.cached(params.cache_key(Resource::Kyc), || self.compliance.list_kyc(params))
            .await
    }

    /// Lists suspicious activity reports.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn list_sar(&self, params: &ListParams) -> Result<Arc<Page<SarReport>>, ConsoleError> {
        self.cached(params.cache_key(Resource::Sar), || self.compliance.list_sar(params))
            .await
    }

    /// Files a SAR with the regulator.
    ///
    /// # Errors
    ///
    /// Propagates backend failures; the cache is only invalidated on success.
    pub async fn file_sar(&self, id: &str) -> Result<Value, ConsoleError> {
        let result = self.compliance.file_sar(id).await?;
        self.invalidate(&[Resource::Sar, Resource::Dashboard]).await;
        info!(sar_id = id, "sar filed");
        Ok(result)
    }

    /// Lists currency transaction reports.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn list_ctr(&self, params: &ListParams) -> Result<Arc<Page<CtrReport>>, ConsoleError> {
        self.cached(params.cache_key(Resource::Ctr), || self.compliance.list_ctr(params))
            .await
    }

    /// Lists GDPR data requests.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn list_gdpr(
        &self,
        params: &ListParams,
    ) -> Result<Arc<Page<GdprDataRequest>>, ConsoleError> {
        self.cached(params.cache_key(Resource::Gdpr), || self.compliance.list_gdpr(params))
            .await
    }

    /// Marks a GDPR request as completed.
    ///
    /// # Errors
    ///
    /// Propagates backend failures; the cache is only invalidated on success.
    pub async fn complete_gdpr(&self, id: &str) -> Result<Value, ConsoleError> {
        let result = self.compliance.complete_gdpr(id).await?;
        self.invalidate(&[Resource::Gdpr, Resource::Dashboard]).await;
        info!(gdpr_request_id = id, "gdpr request completed");
        Ok(result)
    }

    /// Lists compliance cases.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn list_cases(
        &self,
        params: &ListParams,
    ) -> Result<Arc<Page<ComplianceCase>>, ConsoleError> {
        self.cached(params.cache_key(Resource::Cases), || self.compliance.list_cases(params))
            .await
    }

    /// Moves a compliance case to a new status.
    ///
    /// # Errors
    ///
    /// Propagates backend failures; the cache is only invalidated on success.
    pub async fn update_case_status(
        &self,
        id: &str,
        update: &CaseStatusUpdate,
    ) -> Result<Value, ConsoleError> {
        let result = self.compliance.update_case_status(id, update).await?;
        self.invalidate(&[Resource::Cases, Resource::Dashboard]).await;
        info!(case_id = id, status = %update.status, "case status updated");
        Ok(result)
    }

    // -- audit & reports -----------------------------------------------------

    /// Lists audit log entries.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn list_audit_logs(
        &self,
        params: &ListParams,
    ) -> Result<Arc<Page<AuditLog>>, ConsoleError> {
        self.cached(params.cache_key(Resource::AuditLogs), || self.audit.list(params))
            .await
    }

    /// Lists generated reports.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn list_reports(&self, params: &ListParams) -> Result<Arc<Page<Report>>, ConsoleError> {
        self.cached(params.cache_key(Resource::Reports), || self.reports.list(params))
            .await
    }

    /// Requests a new report.
    ///
    /// # Errors
    ///
    /// Propagates backend failures; the cache is only invalidated on success.
    pub async fn generate_report(
        &self,
        request: &GenerateReportRequest,
    ) -> Result<Value, ConsoleError> {
        let result = self.reports.generate(request).await?;
        self.invalidate(&[Resource::Reports]).await;
        info!(report_type = %request.report_type, "report requested");
        Ok(result)
    }

    // -- polling -------------------------------------------------------------

    /// Refetches the overview window of a polled resource.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidRequest`] for a resource without a
    /// poller, otherwise propagates backend failures.
    pub async fn refresh(&self, resource: Resource) -> Result<(), ConsoleError> {
        let params = overview_params();
        let key = params.cache_key(resource);
        match resource {
            Resource::Deposits => {
                self.cache
                    .refresh(&key, || self.blockchain.list_deposits(&params))
                    .await?;
            }
            Resource::Withdrawals => {
                self.cache
                    .refresh(&key, || self.blockchain.list_withdrawals(&params))
                    .await?;
            }
            Resource::StakingPositions => {
                self.cache
                    .refresh(&key, || self.staking.list_positions(&params))
                    .await?;
            }
            Resource::Networks => {
                self.cache
                    .refresh(&CacheKey::new(Resource::Networks), || {
                        self.blockchain.list_networks()
                    })
                    .await?;
            }
            other => {
                return Err(ConsoleError::InvalidRequest(format!(
                    "{other} has no poller"
                )));
            }
        }
        Ok(())
    }
}
