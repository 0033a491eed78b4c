//! Read-only tally over the proposal list.

use crate::proposal::Proposal;

/// Index of the proposal with the strictly greatest vote count.
///
/// Ties resolve to the lowest index; with no votes at all the result is 0.
pub fn winning_proposal(proposals: &[Proposal]) -> usize {
    let mut winning = 0;
    let mut winning_count = 0u64;
    for (index, proposal) in proposals.iter().enumerate() {
        if proposal.vote_count > winning_count {
            winning_count = proposal.vote_count;
            winning = index;
        }
    }
    winning
}

/// Sum of all vote counts.
pub fn total_votes(proposals: &[Proposal]) -> u64 {
    proposals.iter().map(|p| p.vote_count).sum()
}

/// Proposals paired with their index, ordered by count (desc) then index.
pub fn standings(proposals: &[Proposal]) -> Vec<(usize, Proposal)> {
    let mut ranked: Vec<(usize, Proposal)> = proposals.iter().copied().enumerate().collect();
    ranked.sort_by(|(ia, a), (ib, b)| b.vote_count.cmp(&a.vote_count).then(ia.cmp(ib)));
    ranked
}
