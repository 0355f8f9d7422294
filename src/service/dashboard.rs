//! Multi-source dashboard aggregation.
//!
//! The dashboard reads the overview window of every source concurrently,
//! then folds the snapshots into one summary of counts and flags. The fold
//! is a pure function of the snapshots and `now`.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::console_service::{ConsoleService, overview_params};
use crate::domain::{
    CacheKey, CaseStatus, ComplianceCase, DepositDetection, GdprDataRequest, GovernanceProposal,
    KycStatus, KycVerification, NetworkStatus, Resource, SarReport, User, UserStatus, Wallet,
    WalletStatus, WithdrawalBroadcast,
};
use crate::error::ConsoleError;
use crate::metrics::{
    self, DepositPipelineSummary, NetworkHealthSummary, WithdrawalPipelineSummary,
};

/// User account counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserCounts {
    /// Users on the overview page.
    pub total: usize,
    /// Active accounts.
    pub active: usize,
    /// Suspended or locked accounts.
    pub restricted: usize,
    /// Accounts without MFA.
    pub without_mfa: usize,
}

/// Wallet counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct WalletCounts {
    /// Wallets on the overview page.
    pub total: usize,
    /// Frozen wallets.
    pub frozen: usize,
}

/// Compliance workload counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct ComplianceCounts {
    /// KYC verifications awaiting review.
    pub pending_kyc: usize,
    /// KYC verifications past their expiry.
    pub expired_kyc: usize,
    /// SARs past their filing deadline.
    pub overdue_sar: usize,
    /// GDPR requests past their response deadline.
    pub overdue_gdpr: usize,
    /// Cases not yet closed.
    pub open_cases: usize,
    /// Open cases past their due date.
    pub overdue_cases: usize,
}

/// Aggregated console overview.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardSummary {
    /// User account counts.
    pub users: UserCounts,
    /// Wallet counts.
    pub wallets: WalletCounts,
    /// Deposit pipeline counts.
    pub deposits: DepositPipelineSummary,
    /// Deposits detected in the last 24 h versus the 24 h before, in percent.
    pub deposit_trend_percent: f64,
    /// Withdrawal pipeline counts.
    pub withdrawals: WithdrawalPipelineSummary,
    /// Node health counts.
    pub networks: NetworkHealthSummary,
    /// Healthy chains as a percentage of all chains.
    pub network_health_percent: f64,
    /// Proposals currently open for voting.
    pub active_proposals: usize,
    /// Compliance workload.
    pub compliance: ComplianceCounts,
    /// `true` when any compliance item is overdue or a chain is down.
    pub needs_attention: bool,
    /// Instant the summary was computed.
    pub generated_at: DateTime<Utc>,
}

/// Snapshots the dashboard is computed from.
#[derive(Debug, Clone, Default)]
pub struct DashboardInputs<'a> {
    /// Users.
    pub users: &'a [User],
    /// Wallets.
    pub wallets: &'a [Wallet],
    /// Deposits.
    pub deposits: &'a [DepositDetection],
    /// Withdrawals.
    pub withdrawals: &'a [WithdrawalBroadcast],
    /// Node health.
    pub networks: &'a [NetworkStatus],
    /// Proposals.
    pub proposals: &'a [GovernanceProposal],
    /// KYC verifications.
    pub kyc: &'a [KycVerification],
    /// SARs.
    pub sar: &'a [SarReport],
    /// GDPR requests.
    pub gdpr: &'a [GdprDataRequest],
    /// Compliance cases.
    pub cases: &'a [ComplianceCase],
}

impl DashboardSummary {
    /// Folds the snapshots into a summary as of `now`.
    #[must_use]
    pub fn compute(inputs: &DashboardInputs<'_>, now: DateTime<Utc>) -> Self {
        let users = UserCounts {
            total: inputs.users.len(),
            active: metrics::count_where(inputs.users, |u| u.status == UserStatus::Active),
            restricted: metrics::count_where(inputs.users, |u| {
                matches!(u.status, UserStatus::Suspended | UserStatus::Locked)
            }),
            without_mfa: metrics::count_where(inputs.users, |u| !u.mfa_enabled),
        };
        let wallets = WalletCounts {
            total: inputs.wallets.len(),
            frozen: metrics::count_where(inputs.wallets, |w| w.status == WalletStatus::Frozen),
        };
        let compliance = ComplianceCounts {
            pending_kyc: metrics::count_where(inputs.kyc, |k| k.status == KycStatus::Pending),
            expired_kyc: metrics::count_where(inputs.kyc, |k| metrics::kyc_expired(k, now)),
            overdue_sar: metrics::count_where(inputs.sar, |s| metrics::sar_overdue(s, now)),
            overdue_gdpr: metrics::count_where(inputs.gdpr, |g| metrics::gdpr_overdue(g, now)),
            open_cases: metrics::count_where(inputs.cases, |c| c.status != CaseStatus::Closed),
            overdue_cases: metrics::count_where(inputs.cases, |c| metrics::case_overdue(c, now)),
        };
        let networks = NetworkHealthSummary::from_networks(inputs.networks);
        let needs_attention = networks.down > 0
            || compliance.overdue_sar > 0
            || compliance.overdue_gdpr > 0
            || compliance.overdue_cases > 0;

        Self {
            users,
            wallets,
            deposits: DepositPipelineSummary::from_deposits(inputs.deposits),
            deposit_trend_percent: metrics::deposit_trend(inputs.deposits, now, Duration::hours(24)),
            withdrawals: WithdrawalPipelineSummary::from_withdrawals(inputs.withdrawals),
            network_health_percent: networks.healthy_percent(),
            networks,
            active_proposals: metrics::count_where(inputs.proposals, |p| {
                p.status.eq_ignore_ascii_case("active")
            }),
            compliance,
            needs_attention,
            generated_at: now,
        }
    }
}

impl ConsoleService {
    /// Returns the dashboard summary, recomputed when the cached one is stale.
    ///
    /// # Errors
    ///
    /// Propagates the first source read that fails.
    pub async fn dashboard(&self) -> Result<Arc<DashboardSummary>, ConsoleError> {
        self.cached(CacheKey::new(Resource::Dashboard), || self.build_dashboard())
            .await
    }

    async fn build_dashboard(&self) -> Result<DashboardSummary, ConsoleError> {
        let params = overview_params();
        let (users, wallets, deposits, withdrawals, networks, proposals, kyc, sar, gdpr, cases) = tokio::join!(
            self.list_users(&params),
            self.list_wallets(&params),
            self.list_deposits(&params),
            self.list_withdrawals(&params),
            self.list_networks(),
            self.list_proposals(&params),
            self.list_kyc(&params),
            self.list_sar(&params),
            self.list_gdpr(&params),
            self.list_cases(&params),
        );
        let (users, wallets, deposits, withdrawals, networks) =
            (users?, wallets?, deposits?, withdrawals?, networks?);
        let (proposals, kyc, sar, gdpr, cases) = (proposals?, kyc?, sar?, gdpr?, cases?);

        let inputs = DashboardInputs {
            users: &users.items,
            wallets: &wallets.items,
            deposits: &deposits.items,
            withdrawals: &withdrawals.items,
            networks: &networks.items,
            proposals: &proposals.items,
            kyc: &kyc.items,
            sar: &sar.items,
            gdpr: &gdpr.items,
            cases: &cases.items,
        };
        Ok(DashboardSummary::compute(&inputs, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::domain::{NetworkHealth, SarStatus};

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
            .single()
            .unwrap_or_default()
    }

    #[test]
    fn empty_inputs_give_zero_summary() {
        let summary = DashboardSummary::compute(&DashboardInputs::default(), noon());
        assert_eq!(summary.users, UserCounts::default());
        assert_eq!(summary.networks.total, 0);
        assert!(summary.network_health_percent.abs() < f64::EPSILON);
        assert!(!summary.needs_attention);
        assert_eq!(summary.generated_at, noon());
    }

    #[test]
    fn overdue_sar_and_down_chain_need_attention() {
        let sar = vec![SarReport {
            status: SarStatus::Approved,
            deadline_date: Some(noon() - Duration::days(1)),
            ..SarReport::default()
        }];
        let networks = vec![
            NetworkStatus {
                status: NetworkHealth::Down,
                ..NetworkStatus::default()
            },
            NetworkStatus {
                status: NetworkHealth::Healthy,
                ..NetworkStatus::default()
            },
        ];
        let inputs = DashboardInputs {
            sar: &sar,
            networks: &networks,
            ..DashboardInputs::default()
        };
        let summary = DashboardSummary::compute(&inputs, noon());
        assert_eq!(summary.compliance.overdue_sar, 1);
        assert_eq!(summary.networks.down, 1);
        assert!((summary.network_health_percent - 50.0).abs() < 1e-9);
        assert!(summary.needs_attention);
    }

    #[test]
    fn user_and_wallet_counts() {
        let users = vec![
            User {
                status: UserStatus::Active,
                mfa_enabled: true,
                ..User::default()
            },
            User {
                status: UserStatus::Locked,
                ..User::default()
            },
        ];
        let wallets = vec![Wallet {
            status: WalletStatus::Frozen,
            ..Wallet::default()
        }];
        let proposals = vec![GovernanceProposal {
            status: "Active".to_string(),
            ..GovernanceProposal::default()
        }];
        let inputs = DashboardInputs {
            users: &users,
            wallets: &wallets,
            proposals: &proposals,
            ..DashboardInputs::default()
        };
        let summary = DashboardSummary::compute(&inputs, noon());
        assert_eq!(
            summary.users,
            UserCounts {
                total: 2,
                active: 1,
                restricted: 1,
                without_mfa: 1,
            }
        );
        assert_eq!(summary.wallets.frozen, 1);
        assert_eq!(summary.active_proposals, 1);
    }
}
