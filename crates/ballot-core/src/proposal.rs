//! Proposals on the ballot.

use ballot_types::ProposalName;
use serde::{Deserialize, Serialize};

/// A single proposal and its accumulated vote count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Fixed-length name
    pub name: ProposalName,
    /// Accumulated weight of votes cast for this proposal
    pub vote_count: u64,
}

impl Proposal {
    /// Create a proposal with no votes.
    pub fn new(name: ProposalName) -> Self {
        Self {
            name,
            vote_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_proposal_has_no_votes() {
        let proposal = Proposal::new(ProposalName::new("Proposal 1").unwrap());
        assert_eq!(proposal.vote_count, 0);
        assert_eq!(proposal.name.as_str(), "Proposal 1");
    }

    #[test]
    fn test_proposal_json() {
        let proposal = Proposal {
            name: ProposalName::new("Keep").unwrap(),
            vote_count: 3,
        };
        let json = serde_json::to_value(proposal).unwrap();
        assert_eq!(json["name"], "Keep");
        assert_eq!(json["vote_count"], 3);
    }
}
