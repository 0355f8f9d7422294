//! Staking pool rows.

use serde::Serialize;

use crate::domain::StakingPool;
use crate::metrics::ApyPoint;

/// Pool statuses accepted by the `status` query filter.
pub const POOL_STATUSES: &[&str] = &["active", "paused", "closed"];

/// Position statuses accepted by the `status` query filter.
pub const POSITION_STATUSES: &[&str] = &["active", "unbonding", "withdrawn"];

/// Pool with its APY normalised against the best pool on the page.
#[derive(Debug, Clone, Serialize)]
pub struct PoolRow {
    /// Backend record.
    #[serde(flatten)]
    pub pool: StakingPool,
    /// `apy / max_apy * 100` across the returned pools.
    pub apy_normalized: f64,
}

impl PoolRow {
    /// Pairs each pool with its radar point.
    #[must_use]
    pub fn rows(pools: &[StakingPool], radar: &[ApyPoint]) -> Vec<Self> {
        pools
            .iter()
            .zip(radar)
            .map(|(pool, point)| Self {
                pool: pool.clone(),
                apy_normalized: point.normalized,
            })
            .collect()
    }
}
