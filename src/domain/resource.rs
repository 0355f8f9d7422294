//! Backend resource identifiers.
//!
//! [`Resource`] names one cached collection. It is the first component of
//! every [`super::CacheKey`], the unit of cache invalidation, and the
//! WebSocket subscription target.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A cached backend collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    /// Platform users.
    Users,
    /// Custodial wallets.
    Wallets,
    /// Blockchain deposit detections.
    Deposits,
    /// Blockchain withdrawal broadcasts.
    Withdrawals,
    /// Per-chain node health.
    Networks,
    /// Governance proposals.
    Proposals,
    /// Governance votes.
    Votes,
    /// Governance vote delegations.
    Delegations,
    /// Staking pools.
    StakingPools,
    /// Staking positions.
    StakingPositions,
    /// Distributed staking rewards.
    StakingRewards,
    /// KYC verifications.
    Kyc,
    /// Suspicious activity reports.
    Sar,
    /// Currency transaction reports.
    Ctr,
    /// GDPR data requests.
    Gdpr,
    /// Compliance cases.
    Cases,
    /// Audit log entries.
    AuditLogs,
    /// Generated reports.
    Reports,
    /// Aggregated dashboard summary.
    Dashboard,
}

impl Resource {
    /// Every resource, in declaration order.
    pub const ALL: [Self; 19] = [
        Self::Users,
        Self::Wallets,
        Self::Deposits,
        Self::Withdrawals,
        Self::Networks,
        Self::Proposals,
        Self::Votes,
        Self::Delegations,
        Self::StakingPools,
        Self::StakingPositions,
        Self::StakingRewards,
        Self::Kyc,
        Self::Sar,
        Self::Ctr,
        Self::Gdpr,
        Self::Cases,
        Self::AuditLogs,
        Self::Reports,
        Self::Dashboard,
    ];

    /// Returns the resource name as a static string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Wallets => "wallets",
            Self::Deposits => "deposits",
            Self::Withdrawals => "withdrawals",
            Self::Networks => "networks",
            Self::Proposals => "proposals",
            Self::Votes => "votes",
            Self::Delegations => "delegations",
            Self::StakingPools => "staking_pools",
            Self::StakingPositions => "staking_positions",
            Self::StakingRewards => "staking_rewards",
            Self::Kyc => "kyc",
            Self::Sar => "sar",
            Self::Ctr => "ctr",
            Self::Gdpr => "gdpr",
            Self::Cases => "cases",
            Self::AuditLogs => "audit_logs",
            Self::Reports => "reports",
            Self::Dashboard => "dashboard",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| format!("unknown resource: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_resource() {
        for resource in Resource::ALL {
            assert_eq!(resource.as_str().parse::<Resource>(), Ok(resource));
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!("pools".parse::<Resource>().is_err());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Resource::AuditLogs).unwrap_or_default();
        assert_eq!(json, "\"audit_logs\"");
    }
}
