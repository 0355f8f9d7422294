//! Governance proposals, votes, and delegations.
//!
//! Tallies and quorum decisions are made by the backend. The vote totals are
//! decimal strings; the console only turns them into display percentages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::WireEnum;

/// Choice recorded by a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteChoice {
    /// In favour.
    For,
    /// Opposed.
    Against,
    /// Abstained.
    Abstain,
    /// Any value the gateway does not recognise.
    #[default]
    #[serde(other)]
    Unknown,
}

impl WireEnum for VoteChoice {
    const VARIANTS: &'static [&'static str] = &["for", "against", "abstain"];

    fn as_str(&self) -> &'static str {
        match self {
            Self::For => "for",
            Self::Against => "against",
            Self::Abstain => "abstain",
            Self::Unknown => "unknown",
        }
    }
}

/// A proposal with its time-bounded voting window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GovernanceProposal {
    /// Backend identifier.
    #[serde(deserialize_with = "super::lenient")]
    pub id: String,
    /// Short title.
    #[serde(deserialize_with = "super::lenient")]
    pub title: String,
    /// Long description.
    #[serde(deserialize_with = "super::lenient")]
    pub description: Option<String>,
    /// Lifecycle status (e.g. `"draft"`, `"active"`, `"passed"`).
    #[serde(deserialize_with = "super::lenient")]
    pub status: String,
    /// Proposer address or user id.
    #[serde(deserialize_with = "super::lenient")]
    pub proposer: String,
    /// Total weight voted for (decimal string).
    #[serde(deserialize_with = "super::lenient")]
    pub votes_for: String,
    /// Total weight voted against (decimal string).
    #[serde(deserialize_with = "super::lenient")]
    pub votes_against: String,
    /// Total weight abstaining (decimal string).
    #[serde(deserialize_with = "super::lenient")]
    pub votes_abstain: String,
    /// Participation threshold (decimal string).
    #[serde(deserialize_with = "super::lenient")]
    pub quorum_required: String,
    /// Voting window start.
    #[serde(deserialize_with = "super::lenient")]
    pub voting_starts_at: Option<DateTime<Utc>>,
    /// Voting window end.
    #[serde(deserialize_with = "super::lenient")]
    pub voting_ends_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    #[serde(deserialize_with = "super::lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A single vote on a proposal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Vote {
    /// Backend identifier.
    #[serde(deserialize_with = "super::lenient")]
    pub id: String,
    /// Proposal voted on.
    #[serde(deserialize_with = "super::lenient")]
    pub proposal_id: String,
    /// Voter address or user id.
    #[serde(deserialize_with = "super::lenient")]
    pub voter: String,
    /// Recorded choice.
    #[serde(deserialize_with = "super::lenient")]
    pub choice: VoteChoice,
    /// Voting weight (decimal string).
    #[serde(deserialize_with = "super::lenient")]
    pub weight: String,
    /// Cast timestamp.
    #[serde(deserialize_with = "super::lenient")]
    pub cast_at: Option<DateTime<Utc>>,
}

/// Delegation of voting weight from one holder to another.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Delegation {
    /// Backend identifier.
    #[serde(deserialize_with = "super::lenient")]
    pub id: String,
    /// Holder delegating weight.
    #[serde(deserialize_with = "super::lenient")]
    pub delegator: String,
    /// Recipient of the weight.
    #[serde(deserialize_with = "super::lenient")]
    pub delegate: String,
    /// Delegated weight (decimal string).
    #[serde(deserialize_with = "super::lenient")]
    pub weight: String,
    /// Delegation timestamp.
    #[serde(deserialize_with = "super::lenient")]
    pub created_at: Option<DateTime<Utc>>,
}
