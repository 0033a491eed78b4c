//! The ballot ledger state machine.
//!
//! Holds the proposal list, the voter registry and the chairperson, and
//! applies `grant_right`, `delegate` and `vote`. Each operation checks all
//! of its preconditions before touching state, so a rejected call leaves
//! the ledger exactly as it was. Every committed call appends one entry to
//! the event journal.

use ballot_types::{Address, ProposalName};
use serde::{Deserialize, Serialize};

use crate::delegation::{self, Registry};
use crate::error::BallotError;
use crate::events::{LedgerEvent, LogEntry};
use crate::proposal::Proposal;
use crate::tally;
use crate::voter::Voter;

/// Weight of a freshly granted voting right.
pub const GRANTED_WEIGHT: u64 = 1;

/// Delegated-voting ballot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    /// Fixed at construction
    chairperson: Address,
    /// Ordered, fixed-size proposal list
    proposals: Vec<Proposal>,
    /// account -> voter record
    voters: Registry,
    /// Sum of all weights ever granted
    total_granted: u64,
    /// Append-only event journal
    journal: Vec<LogEntry>,
}

impl Ballot {
    /// Create a ballot. The deployer becomes chairperson with weight 1.
    ///
    /// # Errors
    /// - `NoProposals` if `names` is empty
    /// - `TooManyProposals` if the count does not fit in `u32`
    pub fn new(chairperson: Address, names: Vec<ProposalName>) -> Result<Self, BallotError> {
        if names.is_empty() {
            return Err(BallotError::NoProposals);
        }
        if u32::try_from(names.len()).is_err() {
            return Err(BallotError::TooManyProposals(names.len()));
        }

        let proposals: Vec<Proposal> = names.into_iter().map(Proposal::new).collect();
        let mut voters = Registry::new();
        voters.insert(chairperson, Voter::with_weight(GRANTED_WEIGHT));

        tracing::info!(%chairperson, proposals = proposals.len(), "Created ballot");

        Ok(Self {
            chairperson,
            proposals,
            voters,
            total_granted: GRANTED_WEIGHT,
            journal: Vec::new(),
        })
    }

    /// Create a ballot from plain-text names.
    pub fn from_names<I, S>(chairperson: Address, names: I) -> Result<Self, BallotError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|name| ProposalName::new(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(chairperson, names)
    }

    // ---------------------------------------------------------------
    // State transitions
    // ---------------------------------------------------------------

    /// Give `voter` the right to vote. Chairperson only.
    pub fn grant_right(&mut self, caller: Address, voter: Address) -> Result<LogEntry, BallotError> {
        if caller != self.chairperson {
            return Err(BallotError::Unauthorized);
        }

        let record = self.voter(&voter);
        if record.voted {
            return Err(BallotError::AlreadyVotedOrRegistered);
        }
        if record.weight != 0 {
            return Err(BallotError::AlreadyHasRight);
        }
        let total_granted = self
            .total_granted
            .checked_add(GRANTED_WEIGHT)
            .ok_or(BallotError::WeightOverflow)?;

        self.voters.entry(voter).or_default().weight = GRANTED_WEIGHT;
        self.total_granted = total_granted;

        tracing::debug!(%voter, "Granted right to vote");
        Ok(self.emit(LedgerEvent::NewVoter { voter }))
    }

    /// Delegate the caller's weight to `to`, following `to`'s own
    /// delegations to the end of the chain.
    pub fn delegate(&mut self, caller: Address, to: Address) -> Result<LogEntry, BallotError> {
        let sender = self.voter(&caller);
        if sender.weight == 0 {
            return Err(BallotError::NoRightToVote);
        }
        if sender.voted {
            return Err(BallotError::AlreadyVoted);
        }
        if to == caller {
            return Err(BallotError::SelfDelegation);
        }

        let resolution = delegation::resolve_terminal(&self.voters, caller, to)?;
        let terminal = resolution.terminal;
        let target = self.voter(&terminal);

        // Work out the effect on the terminal before mutating anything.
        let credit = if target.voted {
            let index = target.vote_or_zero();
            let count = self.proposal_at(index)?.vote_count;
            let new_count = count
                .checked_add(sender.weight)
                .ok_or(BallotError::WeightOverflow)?;
            Credit::Proposal { index, new_count }
        } else {
            let new_weight = target
                .weight
                .checked_add(sender.weight)
                .ok_or(BallotError::WeightOverflow)?;
            Credit::Weight { new_weight }
        };

        let delegator = self.voters.entry(caller).or_default();
        delegator.voted = true;
        delegator.delegate = Some(terminal);

        let event = match credit {
            Credit::Proposal { index, new_count } => {
                self.proposals[index as usize].vote_count = new_count;
                LedgerEvent::Delegated {
                    from: caller,
                    to,
                    weight: target.weight,
                    voted: true,
                    vote: index,
                    vote_count: new_count,
                }
            }
            Credit::Weight { new_weight } => {
                self.voters.entry(terminal).or_default().weight = new_weight;
                LedgerEvent::Delegated {
                    from: caller,
                    to,
                    weight: new_weight,
                    voted: false,
                    vote: target.vote_or_zero(),
                    vote_count: 0,
                }
            }
        };

        tracing::debug!(
            %caller,
            %to,
            %terminal,
            hops = resolution.hops(),
            weight = sender.weight,
            "Delegated vote"
        );
        Ok(self.emit(event))
    }

    /// Cast the caller's full weight for `proposal`.
    pub fn vote(&mut self, caller: Address, proposal: u32) -> Result<LogEntry, BallotError> {
        let sender = self.voter(&caller);
        if sender.weight == 0 {
            return Err(BallotError::NoRightToVote);
        }
        if sender.voted {
            return Err(BallotError::AlreadyVoted);
        }
        let vote_count = self
            .proposal_at(proposal)?
            .vote_count
            .checked_add(sender.weight)
            .ok_or(BallotError::WeightOverflow)?;

        let voter = self.voters.entry(caller).or_default();
        voter.voted = true;
        voter.vote = Some(proposal);
        self.proposals[proposal as usize].vote_count = vote_count;

        tracing::debug!(%caller, proposal, vote_count, "Vote cast");
        Ok(self.emit(LedgerEvent::Voted {
            voter: caller,
            proposal,
            vote_count,
        }))
    }

    fn emit(&mut self, event: LedgerEvent) -> LogEntry {
        let entry = LogEntry {
            seq: self.journal.len() as u64 + 1,
            event,
        };
        self.journal.push(entry.clone());
        entry
    }

    fn proposal_at(&self, index: u32) -> Result<&Proposal, BallotError> {
        self.proposals
            .get(index as usize)
            .ok_or(BallotError::InvalidProposal {
                index,
                count: self.proposal_count(),
            })
    }

    // ---------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------

    pub fn chairperson(&self) -> Address {
        self.chairperson
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn proposal(&self, index: u32) -> Option<&Proposal> {
        self.proposals.get(index as usize)
    }

    pub fn proposal_count(&self) -> u32 {
        self.proposals.len() as u32
    }

    /// Voter record; never-seen accounts read as the zero record.
    pub fn voter(&self, address: &Address) -> Voter {
        self.voters.get(address).copied().unwrap_or_default()
    }

    /// Materialized voter records in address order.
    pub fn registered_voters(&self) -> impl Iterator<Item = (&Address, &Voter)> {
        self.voters.iter()
    }

    /// Accounts whose weight flowed into `address`, directly or indirectly.
    pub fn delegators(&self, address: &Address) -> Vec<Address> {
        delegation::all_delegators_of(&self.voters, address)
    }

    /// Index of the leading proposal (lowest index on ties, 0 with no votes).
    pub fn winning_proposal(&self) -> u32 {
        tally::winning_proposal(&self.proposals) as u32
    }

    /// Name of the leading proposal.
    pub fn winner_name(&self) -> ProposalName {
        self.proposal(self.winning_proposal())
            .map(|p| p.name)
            .unwrap_or_default()
    }

    pub fn total_votes(&self) -> u64 {
        tally::total_votes(&self.proposals)
    }

    pub fn standings(&self) -> Vec<(usize, Proposal)> {
        tally::standings(&self.proposals)
    }

    pub fn total_weight_granted(&self) -> u64 {
        self.total_granted
    }

    /// Verify that every granted unit of weight is either counted on a
    /// proposal or held by a voter that has not voted yet.
    pub fn check_conservation(&self) -> Result<(), BallotError> {
        let held: u64 = self
            .voters
            .values()
            .filter(|v| !v.voted)
            .fold(0u64, |acc, v| acc.saturating_add(v.weight));
        let accounted = self.total_votes().saturating_add(held);
        if accounted != self.total_granted {
            return Err(BallotError::ConservationViolated {
                granted: self.total_granted,
                accounted,
            });
        }
        Ok(())
    }

    /// Full event journal.
    pub fn events(&self) -> &[LogEntry] {
        &self.journal
    }

    /// Journal entries with `seq` greater than `seq`.
    pub fn events_since(&self, seq: u64) -> &[LogEntry] {
        let start = usize::try_from(seq).unwrap_or(usize::MAX).min(self.journal.len());
        &self.journal[start..]
    }

    /// Sequence number of the latest entry (0 when empty).
    pub fn last_seq(&self) -> u64 {
        self.journal.len() as u64
    }
}

enum Credit {
    Proposal { index: u32, new_count: u64 },
    Weight { new_weight: u64 },
}
