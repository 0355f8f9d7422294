//! Domain layer: backend entity snapshots, cache identity, and event system.
//!
//! Every entity here is owned by the platform backend. The gateway only
//! holds transient copies deserialized from API responses; missing, null or
//! malformed fields fall back to defaults instead of failing the request.

pub mod audit;
pub mod blockchain;
pub mod cache_event;
pub mod cache_key;
pub mod compliance;
pub mod event_bus;
pub mod governance;
pub mod reports;
pub mod resource;
pub mod staking;
pub mod users;
pub mod wallets;

pub use audit::AuditLog;
pub use blockchain::{
    DepositDetection, DepositStatus, NetworkHealth, NetworkStatus, WithdrawalBroadcast,
    WithdrawalStatus,
};
pub use cache_event::CacheEvent;
pub use cache_key::CacheKey;
pub use compliance::{
    CaseStatus, ComplianceCase, CtrReport, CtrStatus, GdprDataRequest, GdprStatus, KycStatus,
    KycVerification, SarReport, SarStatus,
};
pub use event_bus::EventBus;
pub use governance::{Delegation, GovernanceProposal, Vote, VoteChoice};
pub use reports::Report;
pub use resource::Resource;
pub use staking::{StakingPool, StakingPosition, StakingReward};
pub use users::{User, UserStatus};
pub use wallets::{Wallet, WalletStatus, WalletType};

/// A string-valued enum exchanged with the backend.
///
/// Every status type carries an `Unknown` catch-all for values the gateway
/// does not recognise; `VARIANTS` lists only the recognised wire values and
/// doubles as the allow-list for query-string validation.
pub trait WireEnum {
    /// Recognised wire values, lowercase.
    const VARIANTS: &'static [&'static str];

    /// Returns the wire value for this variant.
    fn as_str(&self) -> &'static str;
}

/// Chains accepted by the blockchain route filters.
pub const SUPPORTED_CHAINS: &[&str] = &[
    "bitcoin",
    "ethereum",
    "polygon",
    "solana",
    "tron",
    "bsc",
    "avalanche",
    "arbitrum",
];

/// Deserializes a field, falling back to `T::default()` when the value is
/// `null` or has the wrong shape.
///
/// `#[serde(default)]` only covers absent fields; the backend also sends
/// explicit nulls for counters and amounts it has not computed yet, and a
/// single bad field must not fail a whole page.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::de::DeserializeOwned,
{
    use serde::Deserialize;
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Deserializes a number that may arrive as a JSON number, a numeric
/// string, or `null`. Anything unparsable becomes `0.0`.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    let value = serde_json::Value::deserialize(deserializer)?;
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(if parsed.is_finite() { parsed } else { 0.0 })
}
