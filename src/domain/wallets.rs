//! Custodial wallet records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::WireEnum;

/// Storage tier of a custodial wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletType {
    /// Online signing wallet.
    Hot,
    /// Semi-online wallet.
    Warm,
    /// Offline storage.
    Cold,
    /// Any value the gateway does not recognise.
    #[default]
    #[serde(other)]
    Unknown,
}

impl WireEnum for WalletType {
    const VARIANTS: &'static [&'static str] = &["hot", "warm", "cold"];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::Warm => "warm",
            Self::Cold => "cold",
            Self::Unknown => "unknown",
        }
    }
}

/// Operational status of a wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletStatus {
    /// Wallet accepts movements.
    Active,
    /// Wallet is frozen by an administrator.
    Frozen,
    /// Wallet is not in use.
    Inactive,
    /// Funds are being moved to another wallet.
    Migrating,
    /// Any value the gateway does not recognise.
    #[default]
    #[serde(other)]
    Unknown,
}

impl WireEnum for WalletStatus {
    const VARIANTS: &'static [&'static str] = &["active", "frozen", "inactive", "migrating"];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Frozen => "frozen",
            Self::Inactive => "inactive",
            Self::Migrating => "migrating",
            Self::Unknown => "unknown",
        }
    }
}

/// Custodial balance record.
///
/// `balance` and `locked_balance` are decimal strings. The backend enforces
/// `locked_balance <= balance`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Wallet {
    /// Backend identifier.
    #[serde(deserialize_with = "super::lenient")]
    pub id: String,
    /// Owning user.
    #[serde(deserialize_with = "super::lenient")]
    pub user_id: String,
    /// Asset symbol (e.g. `"BTC"`).
    #[serde(deserialize_with = "super::lenient")]
    pub currency: String,
    /// Chain the wallet lives on.
    #[serde(deserialize_with = "super::lenient")]
    pub chain: String,
    /// Deposit address.
    #[serde(deserialize_with = "super::lenient")]
    pub address: Option<String>,
    /// Storage tier.
    #[serde(rename = "type", alias = "wallet_type", deserialize_with = "super::lenient")]
    pub wallet_type: WalletType,
    /// Operational status.
    #[serde(deserialize_with = "super::lenient")]
    pub status: WalletStatus,
    /// Total balance (decimal string).
    #[serde(deserialize_with = "super::lenient")]
    pub balance: String,
    /// Portion of the balance reserved by pending operations.
    #[serde(deserialize_with = "super::lenient")]
    pub locked_balance: String,
    /// Parent wallet when this wallet belongs to a pool.
    #[serde(deserialize_with = "super::lenient")]
    pub parent_wallet_id: Option<String>,
    /// Whether this wallet is a pool parent.
    #[serde(deserialize_with = "super::lenient")]
    pub is_pool: bool,
    /// Creation timestamp.
    #[serde(deserialize_with = "super::lenient")]
    pub created_at: Option<DateTime<Utc>>,
}
