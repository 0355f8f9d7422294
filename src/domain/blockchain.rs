//! Blockchain observations: deposits, withdrawals, and network health.
//!
//! Confirmation counts and status progression are computed by the backend.
//! The gateway renders the last fetched value and may ask the backend to
//! retry a failed withdrawal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::WireEnum;

/// Deposit pipeline: detected → confirming → confirmed → credited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositStatus {
    /// Transaction seen in the mempool or a block.
    Detected,
    /// Accumulating confirmations.
    Confirming,
    /// Required confirmations reached.
    Confirmed,
    /// Funds credited to the user's wallet.
    Credited,
    /// Any value the gateway does not recognise.
    #[default]
    #[serde(other)]
    Unknown,
}

impl WireEnum for DepositStatus {
    const VARIANTS: &'static [&'static str] = &["detected", "confirming", "confirmed", "credited"];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Detected => "detected",
            Self::Confirming => "confirming",
            Self::Confirmed => "confirmed",
            Self::Credited => "credited",
            Self::Unknown => "unknown",
        }
    }
}

impl DepositStatus {
    /// Returns `true` while the deposit has not been credited yet.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Detected | Self::Confirming | Self::Confirmed)
    }
}

/// Withdrawal pipeline: pending → broadcasting → broadcasted | failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WithdrawalStatus {
    /// Waiting for signing.
    Pending,
    /// Being submitted to the network.
    Broadcasting,
    /// Accepted by the network.
    Broadcasted,
    /// Broadcast failed; may be retried.
    Failed,
    /// Any value the gateway does not recognise.
    #[default]
    #[serde(other)]
    Unknown,
}

impl WireEnum for WithdrawalStatus {
    const VARIANTS: &'static [&'static str] = &["pending", "broadcasting", "broadcasted", "failed"];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Broadcasting => "broadcasting",
            Self::Broadcasted => "broadcasted",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        }
    }
}

/// Health of a chain's node connectivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkHealth {
    /// Node in sync.
    Healthy,
    /// Node lagging or partially reachable.
    Degraded,
    /// Node unreachable.
    Down,
    /// Any value the gateway does not recognise.
    #[default]
    #[serde(other)]
    Unknown,
}

impl WireEnum for NetworkHealth {
    const VARIANTS: &'static [&'static str] = &["healthy", "degraded", "down"];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Degraded => "degraded",
            Self::Down => "down",
            Self::Unknown => "unknown",
        }
    }
}

/// A deposit transaction observed on chain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DepositDetection {
    /// Backend identifier.
    #[serde(deserialize_with = "super::lenient")]
    pub id: String,
    /// Chain name.
    #[serde(deserialize_with = "super::lenient")]
    pub chain: String,
    /// Asset symbol.
    #[serde(deserialize_with = "super::lenient")]
    pub currency: String,
    /// Transaction hash.
    #[serde(deserialize_with = "super::lenient")]
    pub tx_hash: String,
    /// Receiving address.
    #[serde(deserialize_with = "super::lenient")]
    pub address: String,
    /// Amount (decimal string).
    #[serde(deserialize_with = "super::lenient")]
    pub amount: String,
    /// Confirmations counted by the backend.
    #[serde(deserialize_with = "super::lenient")]
    pub confirmations: u32,
    /// Confirmations needed before crediting.
    #[serde(deserialize_with = "super::lenient")]
    pub required_confirmations: u32,
    /// Pipeline status.
    #[serde(deserialize_with = "super::lenient")]
    pub status: DepositStatus,
    /// Wallet credited by this deposit.
    #[serde(deserialize_with = "super::lenient")]
    pub wallet_id: Option<String>,
    /// Detection timestamp.
    #[serde(deserialize_with = "super::lenient")]
    pub detected_at: Option<DateTime<Utc>>,
}

/// A withdrawal transaction submitted by the platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WithdrawalBroadcast {
    /// Backend identifier.
    #[serde(deserialize_with = "super::lenient")]
    pub id: String,
    /// Chain name.
    #[serde(deserialize_with = "super::lenient")]
    pub chain: String,
    /// Asset symbol.
    #[serde(deserialize_with = "super::lenient")]
    pub currency: String,
    /// Transaction hash once broadcast.
    #[serde(deserialize_with = "super::lenient")]
    pub tx_hash: Option<String>,
    /// Destination address.
    #[serde(deserialize_with = "super::lenient")]
    pub to_address: String,
    /// Amount (decimal string).
    #[serde(deserialize_with = "super::lenient")]
    pub amount: String,
    /// Confirmations counted by the backend.
    #[serde(deserialize_with = "super::lenient")]
    pub confirmations: u32,
    /// Confirmations considered final.
    #[serde(deserialize_with = "super::lenient")]
    pub required_confirmations: u32,
    /// Pipeline status.
    #[serde(deserialize_with = "super::lenient")]
    pub status: WithdrawalStatus,
    /// Last broadcast error, if any.
    #[serde(deserialize_with = "super::lenient")]
    pub error_message: Option<String>,
    /// Number of broadcast attempts so far.
    #[serde(deserialize_with = "super::lenient")]
    pub retry_count: u32,
    /// Creation timestamp.
    #[serde(deserialize_with = "super::lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Node status for one chain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkStatus {
    /// Chain name.
    #[serde(deserialize_with = "super::lenient")]
    pub chain: String,
    /// Health classification.
    #[serde(deserialize_with = "super::lenient")]
    pub status: NetworkHealth,
    /// Latest block height seen.
    #[serde(deserialize_with = "super::lenient")]
    pub block_height: u64,
    /// Timestamp of the latest block.
    #[serde(deserialize_with = "super::lenient")]
    pub last_block_at: Option<DateTime<Utc>>,
    /// Peer count reported by the node.
    #[serde(deserialize_with = "super::lenient")]
    pub peer_count: u32,
}
