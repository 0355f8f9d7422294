//! Staking pools, positions, and distributed rewards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A staking pool with its advertised yield.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StakingPool {
    /// Backend identifier.
    #[serde(deserialize_with = "super::lenient")]
    pub id: String,
    /// Display name.
    #[serde(deserialize_with = "super::lenient")]
    pub name: String,
    /// Staked asset symbol.
    #[serde(deserialize_with = "super::lenient")]
    pub currency: String,
    /// Annual percentage yield, e.g. `5.25` for 5.25 %.
    #[serde(deserialize_with = "super::lenient_f64")]
    pub apy: f64,
    /// Total value locked (decimal string).
    #[serde(deserialize_with = "super::lenient")]
    pub tvl: String,
    /// Pool status (e.g. `"active"`, `"paused"`).
    #[serde(deserialize_with = "super::lenient")]
    pub status: String,
    /// Minimum stake (decimal string).
    #[serde(deserialize_with = "super::lenient")]
    pub min_stake: String,
    /// Lock period applied to new positions.
    #[serde(deserialize_with = "super::lenient")]
    pub lock_period_days: u32,
}

/// A user's stake in a pool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StakingPosition {
    /// Backend identifier.
    #[serde(deserialize_with = "super::lenient")]
    pub id: String,
    /// Pool staked into.
    #[serde(deserialize_with = "super::lenient")]
    pub pool_id: String,
    /// Staking user.
    #[serde(deserialize_with = "super::lenient")]
    pub user_id: String,
    /// Staked amount (decimal string).
    #[serde(deserialize_with = "super::lenient")]
    pub staked_amount: String,
    /// Rewards accrued over the lifetime of the position.
    #[serde(deserialize_with = "super::lenient")]
    pub accrued_rewards: String,
    /// Rewards not yet claimed.
    #[serde(deserialize_with = "super::lenient")]
    pub unclaimed_rewards: String,
    /// End of the lock period.
    #[serde(deserialize_with = "super::lenient")]
    pub lock_expires_at: Option<DateTime<Utc>>,
    /// Position status (e.g. `"active"`, `"unstaking"`).
    #[serde(deserialize_with = "super::lenient")]
    pub status: String,
}

/// One reward distribution to a position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StakingReward {
    /// Backend identifier.
    #[serde(deserialize_with = "super::lenient")]
    pub id: String,
    /// Position credited.
    #[serde(deserialize_with = "super::lenient")]
    pub position_id: String,
    /// Pool the reward came from.
    #[serde(deserialize_with = "super::lenient")]
    pub pool_id: String,
    /// Reward amount (decimal string).
    #[serde(deserialize_with = "super::lenient")]
    pub amount: String,
    /// Distribution timestamp.
    #[serde(deserialize_with = "super::lenient")]
    pub distributed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn apy_accepts_number_string_or_null() {
        for (json, expected) in [
            (r#"{"apy": 4.5}"#, 4.5),
            (r#"{"apy": "7.25"}"#, 7.25),
            (r#"{"apy": null}"#, 0.0),
            (r#"{"apy": "n/a"}"#, 0.0),
        ] {
            let Ok(pool) = serde_json::from_str::<StakingPool>(json) else {
                panic!("pool should deserialize: {json}");
            };
            assert!((pool.apy - expected).abs() < f64::EPSILON);
        }
    }
}
