//! Derived display metrics over fetched snapshots.
//!
//! Everything here is a pure function of its inputs. Nothing is persisted
//! and nothing is sent back to the backend: recomputing a metric for the
//! same snapshot and the same `now` always gives the same answer. The clock
//! is a parameter so handlers pass the gateway's `Utc::now()` and tests pass
//! a fixed instant.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    CaseStatus, ComplianceCase, CtrReport, CtrStatus, DepositDetection, DepositStatus,
    GdprDataRequest, GdprStatus, GovernanceProposal, KycVerification, NetworkHealth, NetworkStatus,
    SarReport, SarStatus, StakingPool, Wallet, WithdrawalBroadcast, WithdrawalStatus,
};

/// Parses a backend decimal string, treating anything unparsable as zero.
#[must_use]
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// `value / total * 100`, or `0` when `total` is zero or not finite.
#[must_use]
pub fn percentage_of_total(value: f64, total: f64) -> f64 {
    if total == 0.0 || !total.is_finite() || !value.is_finite() {
        return 0.0;
    }
    value / total * 100.0
}

/// Confirmation progress as a percentage in `[0, 100]`.
///
/// A zero requirement counts as complete.
#[must_use]
pub fn confirmation_progress(confirmations: u32, required: u32) -> f64 {
    if required == 0 {
        return 100.0;
    }
    (f64::from(confirmations) / f64::from(required)).min(1.0) * 100.0
}

/// Returns `true` once `confirmations` meets `required`.
#[must_use]
pub const fn is_confirmation_complete(confirmations: u32, required: u32) -> bool {
    confirmations >= required
}

/// A deadline is overdue when it lies strictly before `now` and the
/// terminal action has not been taken.
#[must_use]
pub fn is_overdue(deadline: DateTime<Utc>, now: DateTime<Utc>, terminal_action_taken: bool) -> bool {
    deadline < now && !terminal_action_taken
}

fn overdue_opt(deadline: Option<DateTime<Utc>>, now: DateTime<Utc>, done: bool) -> bool {
    deadline.is_some_and(|d| is_overdue(d, now, done))
}

/// A SAR is overdue only while it is under review or approved but unfiled.
#[must_use]
pub fn sar_overdue(report: &SarReport, now: DateTime<Utc>) -> bool {
    let awaiting_filing = matches!(report.status, SarStatus::Review | SarStatus::Approved);
    overdue_opt(report.deadline_date, now, !awaiting_filing)
}

/// A CTR is overdue while still pending.
#[must_use]
pub fn ctr_overdue(report: &CtrReport, now: DateTime<Utc>) -> bool {
    overdue_opt(report.deadline_date, now, report.status != CtrStatus::Pending)
}

/// A GDPR request is overdue while pending or processing.
#[must_use]
pub fn gdpr_overdue(request: &GdprDataRequest, now: DateTime<Utc>) -> bool {
    let open = matches!(request.status, GdprStatus::Pending | GdprStatus::Processing);
    overdue_opt(request.deadline_date, now, !open)
}

/// A compliance case is overdue while not closed.
#[must_use]
pub fn case_overdue(case: &ComplianceCase, now: DateTime<Utc>) -> bool {
    overdue_opt(case.due_date, now, case.status == CaseStatus::Closed)
}

/// A KYC verification has expired once `expires_at` lies before `now`.
#[must_use]
pub fn kyc_expired(kyc: &KycVerification, now: DateTime<Utc>) -> bool {
    overdue_opt(kyc.expires_at, now, false)
}

/// Only a failed withdrawal may be retried.
#[must_use]
pub fn can_retry(withdrawal: &WithdrawalBroadcast) -> bool {
    withdrawal.status == WithdrawalStatus::Failed
}

/// Counts the items matching `predicate`.
#[must_use]
pub fn count_where<T, P>(items: &[T], predicate: P) -> usize
where
    P: Fn(&T) -> bool,
{
    items.iter().filter(|item| predicate(item)).count()
}

/// Node health counts across chains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct NetworkHealthSummary {
    /// Chains reporting healthy.
    pub healthy: usize,
    /// Chains reporting degraded.
    pub degraded: usize,
    /// Chains reporting down.
    pub down: usize,
    /// All chains, including unrecognised statuses.
    pub total: usize,
}

impl NetworkHealthSummary {
    /// Summarises a set of network statuses.
    #[must_use]
    pub fn from_networks(networks: &[NetworkStatus]) -> Self {
        Self {
            healthy: count_where(networks, |n| n.status == NetworkHealth::Healthy),
            degraded: count_where(networks, |n| n.status == NetworkHealth::Degraded),
            down: count_where(networks, |n| n.status == NetworkHealth::Down),
            total: networks.len(),
        }
    }

    /// Healthy chains as a percentage of all chains.
    #[must_use]
    pub fn healthy_percent(&self) -> f64 {
        percentage_of_total(self.healthy as f64, self.total as f64)
    }
}

/// Deposit counts along the detection pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct DepositPipelineSummary {
    /// Seen but not yet confirming.
    pub detected: usize,
    /// Accumulating confirmations.
    pub confirming: usize,
    /// Confirmed, awaiting credit.
    pub confirmed: usize,
    /// Credited to the wallet.
    pub credited: usize,
    /// Detected, confirming, or confirmed.
    pub pending: usize,
    /// All deposits on the page.
    pub total: usize,
}

impl DepositPipelineSummary {
    /// Summarises a page of deposits.
    #[must_use]
    pub fn from_deposits(deposits: &[DepositDetection]) -> Self {
        Self {
            detected: count_where(deposits, |d| d.status == DepositStatus::Detected),
            confirming: count_where(deposits, |d| d.status == DepositStatus::Confirming),
            confirmed: count_where(deposits, |d| d.status == DepositStatus::Confirmed),
            credited: count_where(deposits, |d| d.status == DepositStatus::Credited),
            pending: count_where(deposits, |d| d.status.is_pending()),
            total: deposits.len(),
        }
    }
}

/// Withdrawal counts along the broadcast pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct WithdrawalPipelineSummary {
    /// Waiting for signing.
    pub pending: usize,
    /// Being submitted.
    pub broadcasting: usize,
    /// Accepted by the network.
    pub broadcasted: usize,
    /// Failed and retryable.
    pub failed: usize,
    /// All withdrawals on the page.
    pub total: usize,
}

impl WithdrawalPipelineSummary {
    /// Summarises a page of withdrawals.
    #[must_use]
    pub fn from_withdrawals(withdrawals: &[WithdrawalBroadcast]) -> Self {
        Self {
            pending: count_where(withdrawals, |w| w.status == WithdrawalStatus::Pending),
            broadcasting: count_where(withdrawals, |w| w.status == WithdrawalStatus::Broadcasting),
            broadcasted: count_where(withdrawals, |w| w.status == WithdrawalStatus::Broadcasted),
            failed: count_where(withdrawals, can_retry),
            total: withdrawals.len(),
        }
    }
}

/// Display percentages of a proposal's three vote totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct VoteShares {
    /// Share of `for` votes.
    pub for_percentage: f64,
    /// Share of `against` votes.
    pub against_percentage: f64,
    /// Share of `abstain` votes.
    pub abstain_percentage: f64,
    /// Sum of the three totals.
    pub total_votes: f64,
    /// Total votes relative to the quorum requirement, capped at 100.
    pub quorum_progress: f64,
}

impl VoteShares {
    /// Computes the shares for `proposal`.
    #[must_use]
    pub fn from_proposal(proposal: &GovernanceProposal) -> Self {
        let for_votes = parse_amount(&proposal.votes_for);
        let against = parse_amount(&proposal.votes_against);
        let abstain = parse_amount(&proposal.votes_abstain);
        let total = for_votes + against + abstain;
        let quorum = parse_amount(&proposal.quorum_required);
        Self {
            for_percentage: percentage_of_total(for_votes, total),
            against_percentage: percentage_of_total(against, total),
            abstain_percentage: percentage_of_total(abstain, total),
            total_votes: total,
            quorum_progress: percentage_of_total(total, quorum).min(100.0),
        }
    }
}

/// One pool's APY normalised against the best APY in the set.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ApyPoint {
    /// Pool identifier.
    pub pool_id: String,
    /// Pool display name.
    pub name: String,
    /// Raw APY.
    pub apy: f64,
    /// `apy / max_apy * 100`.
    pub normalized: f64,
}

/// Normalises every pool's APY against the largest one (`0` when the
/// largest is not positive).
#[must_use]
pub fn apy_radar(pools: &[StakingPool]) -> Vec<ApyPoint> {
    let max = pools.iter().map(|p| p.apy).fold(0.0_f64, f64::max);
    pools
        .iter()
        .map(|p| ApyPoint {
            pool_id: p.id.clone(),
            name: p.name.clone(),
            apy: p.apy,
            normalized: if max > 0.0 {
                percentage_of_total(p.apy, max)
            } else {
                0.0
            },
        })
        .collect()
}

/// Percent change from `previous` to `current`.
///
/// A zero baseline gives `100` when `current` is positive and `0` otherwise.
#[must_use]
pub fn trend_percent(previous: f64, current: f64) -> f64 {
    if previous == 0.0 || !previous.is_finite() {
        return if current > 0.0 { 100.0 } else { 0.0 };
    }
    (current - previous) / previous.abs() * 100.0
}

/// Locked balance as a percentage of the wallet balance.
#[must_use]
pub fn wallet_utilisation(wallet: &Wallet) -> f64 {
    percentage_of_total(
        parse_amount(&wallet.locked_balance),
        parse_amount(&wallet.balance),
    )
}

/// Deposits detected in the last `window` compared to the window before it.
#[must_use]
pub fn deposit_trend(deposits: &[DepositDetection], now: DateTime<Utc>, window: Duration) -> f64 {
    let current_start = now - window;
    let previous_start = current_start - window;
    let current = count_where(deposits, |d| {
        d.detected_at.is_some_and(|t| t >= current_start && t <= now)
    });
    let previous = count_where(deposits, |d| {
        d.detected_at
            .is_some_and(|t| t >= previous_start && t < current_start)
    });
    trend_percent(previous as f64, current as f64)
}
