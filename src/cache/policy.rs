//! Per-resource staleness and polling policies.

use std::time::Duration;

use crate::domain::Resource;

/// How long a cached read stays fresh, and whether it is polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Age after which a cached value is refetched on the next read.
    pub stale_after: Duration,
    /// Fixed refetch interval for background polling, if any.
    pub refetch_interval: Option<Duration>,
}

impl CachePolicy {
    /// A policy with a staleness window and no polling.
    #[must_use]
    pub const fn stale_after_secs(secs: u64) -> Self {
        Self {
            stale_after: Duration::from_secs(secs),
            refetch_interval: None,
        }
    }

    /// Adds a fixed polling interval.
    #[must_use]
    pub const fn polled_every_secs(mut self, secs: u64) -> Self {
        self.refetch_interval = Some(Duration::from_secs(secs));
        self
    }
}

/// Policy table for every [`Resource`].
#[derive(Debug, Clone)]
pub struct CachePolicies {
    fallback: CachePolicy,
}

impl Default for CachePolicies {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl CachePolicies {
    /// Creates the table; `fallback` applies to resources with no explicit
    /// entry (delegations, staking rewards).
    #[must_use]
    pub const fn new(fallback: Duration) -> Self {
        Self {
            fallback: CachePolicy {
                stale_after: fallback,
                refetch_interval: None,
            },
        }
    }

    /// Returns the policy for `resource`.
    #[must_use]
    pub const fn for_resource(&self, resource: Resource) -> CachePolicy {
        match resource {
            Resource::Users
            | Resource::Wallets
            | Resource::Proposals
            | Resource::Votes
            | Resource::Kyc
            | Resource::Sar
            | Resource::Ctr
            | Resource::Gdpr
            | Resource::Cases
            | Resource::AuditLogs => CachePolicy::stale_after_secs(30),
            Resource::Deposits | Resource::Withdrawals => {
                CachePolicy::stale_after_secs(15).polled_every_secs(15)
            }
            Resource::Networks => CachePolicy::stale_after_secs(10).polled_every_secs(30),
            Resource::StakingPositions => CachePolicy::stale_after_secs(30).polled_every_secs(30),
            Resource::StakingPools | Resource::Reports => CachePolicy::stale_after_secs(60),
            Resource::Dashboard => CachePolicy::stale_after_secs(15),
            Resource::Delegations | Resource::StakingRewards => self.fallback,
        }
    }

    /// Resources with a polling interval, paired with that interval.
    #[must_use]
    pub fn polled(&self) -> Vec<(Resource, Duration)> {
        Resource::ALL
            .iter()
            .filter_map(|r| self.for_resource(*r).refetch_interval.map(|i| (*r, i)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_windows() {
        let policies = CachePolicies::default();
        assert_eq!(
            policies.for_resource(Resource::Users).stale_after,
            Duration::from_secs(30)
        );
        assert_eq!(
            policies.for_resource(Resource::StakingPools).stale_after,
            Duration::from_secs(60)
        );
        assert_eq!(
            policies.for_resource(Resource::Networks),
            CachePolicy {
                stale_after: Duration::from_secs(10),
                refetch_interval: Some(Duration::from_secs(30)),
            }
        );
        assert_eq!(
            policies.for_resource(Resource::Dashboard).refetch_interval,
            None
        );
    }

    #[test]
    fn polled_resources() {
        let polled = CachePolicies::default().polled();
        let resources: Vec<Resource> = polled.iter().map(|(r, _)| *r).collect();
        assert_eq!(
            resources,
            [
                Resource::Deposits,
                Resource::Withdrawals,
                Resource::Networks,
                Resource::StakingPositions,
            ]
        );
    }

    #[test]
    fn fallback_covers_unlisted_resources() {
        let policies = CachePolicies::new(Duration::from_secs(5));
        assert_eq!(
            policies.for_resource(Resource::Delegations).stale_after,
            Duration::from_secs(5)
        );
    }
}
