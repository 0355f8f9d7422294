//! Proposal rows.

use serde::Serialize;

use crate::domain::GovernanceProposal;
use crate::metrics::VoteShares;

/// Proposal statuses accepted by the `status` query filter.
pub const PROPOSAL_STATUSES: &[&str] = &[
    "draft",
    "active",
    "passed",
    "rejected",
    "executed",
    "cancelled",
];

/// Proposal with display vote percentages.
#[derive(Debug, Clone, Serialize)]
pub struct ProposalRow {
    /// Backend record.
    #[serde(flatten)]
    pub proposal: GovernanceProposal,
    /// Vote shares and quorum progress.
    pub vote_shares: VoteShares,
}

impl From<&GovernanceProposal> for ProposalRow {
    fn from(proposal: &GovernanceProposal) -> Self {
        Self {
            vote_shares: VoteShares::from_proposal(proposal),
            proposal: proposal.clone(),
        }
    }
}
