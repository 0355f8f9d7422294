//! Deposit, withdrawal, and network rows.

use serde::Serialize;

use crate::domain::{DepositDetection, NetworkStatus, WithdrawalBroadcast};
use crate::metrics::{self, NetworkHealthSummary};

/// Deposit with confirmation progress.
#[derive(Debug, Clone, Serialize)]
pub struct DepositRow {
    /// Backend record.
    #[serde(flatten)]
    pub deposit: DepositDetection,
    /// Confirmations as a percentage of the requirement, in `[0, 100]`.
    pub confirmation_progress: f64,
    /// Requirement met.
    pub confirmation_complete: bool,
}

impl From<&DepositDetection> for DepositRow {
    fn from(deposit: &DepositDetection) -> Self {
        Self {
            confirmation_progress: metrics::confirmation_progress(
                deposit.confirmations,
                deposit.required_confirmations,
            ),
            confirmation_complete: metrics::is_confirmation_complete(
                deposit.confirmations,
                deposit.required_confirmations,
            ),
            deposit: deposit.clone(),
        }
    }
}

/// Withdrawal with confirmation progress and retry availability.
#[derive(Debug, Clone, Serialize)]
pub struct WithdrawalRow {
    /// Backend record.
    #[serde(flatten)]
    pub withdrawal: WithdrawalBroadcast,
    /// Confirmations as a percentage of the finality threshold.
    pub confirmation_progress: f64,
    /// `true` only for failed withdrawals.
    pub can_retry: bool,
}

impl From<&WithdrawalBroadcast> for WithdrawalRow {
    fn from(withdrawal: &WithdrawalBroadcast) -> Self {
        Self {
            confirmation_progress: metrics::confirmation_progress(
                withdrawal.confirmations,
                withdrawal.required_confirmations,
            ),
            can_retry: metrics::can_retry(withdrawal),
            withdrawal: withdrawal.clone(),
        }
    }
}

/// Node health for every chain plus the aggregate counts.
#[derive(Debug, Clone, Serialize)]
pub struct NetworksResponse {
    /// Per-chain status.
    pub data: Vec<NetworkStatus>,
    /// Healthy / degraded / down counts.
    pub summary: NetworkHealthSummary,
    /// Healthy chains as a percentage of all chains.
    pub healthy_percent: f64,
}

impl NetworksResponse {
    /// Builds the response from a (filtered) set of statuses.
    #[must_use]
    pub fn new(data: Vec<NetworkStatus>) -> Self {
        let summary = NetworkHealthSummary::from_networks(&data);
        Self {
            healthy_percent: summary.healthy_percent(),
            summary,
            data,
        }
    }
}
