//! Voter records.

use ballot_types::Address;
use serde::{Deserialize, Serialize};

/// Where a voter is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoterStatus {
    /// No voting right (weight 0, not voted)
    Unregistered,
    /// Holds weight and may vote or delegate
    Registered,
    /// Voted or delegated; terminal
    Voted,
}

/// Voter record.
///
/// Never-seen accounts read as `Voter::default()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Voter {
    /// Accumulated weight (1 once granted, more through delegation)
    pub weight: u64,
    /// Whether this voter has voted or delegated
    pub voted: bool,
    /// Index of the chosen proposal, when voted directly
    pub vote: Option<u32>,
    /// Resolved delegate, when delegated
    pub delegate: Option<Address>,
}

impl Voter {
    /// Voter holding exactly the given weight.
    pub fn with_weight(weight: u64) -> Self {
        Self {
            weight,
            ..Self::default()
        }
    }

    pub fn status(&self) -> VoterStatus {
        if self.voted {
            VoterStatus::Voted
        } else if self.weight == 0 {
            VoterStatus::Unregistered
        } else {
            VoterStatus::Registered
        }
    }

    /// Has this voter handed its weight to someone else?
    pub fn has_delegated(&self) -> bool {
        self.voted && self.delegate.is_some()
    }

    /// Vote index as reported in external encodings (0 when none).
    pub fn vote_or_zero(&self) -> u32 {
        self.vote.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unregistered() {
        let voter = Voter::default();
        assert_eq!(voter.status(), VoterStatus::Unregistered);
        assert_eq!(voter.vote_or_zero(), 0);
    }

    #[test]
    fn test_status_transitions() {
        let mut voter = Voter::with_weight(1);
        assert_eq!(voter.status(), VoterStatus::Registered);

        voter.voted = true;
        voter.vote = Some(2);
        assert_eq!(voter.status(), VoterStatus::Voted);
        assert!(!voter.has_delegated());
    }

    #[test]
    fn test_has_delegated() {
        let voter = Voter {
            weight: 1,
            voted: true,
            vote: None,
            delegate: Some(Address::from_seed(b"bob")),
        };
        assert!(voter.has_delegated());
    }
}
