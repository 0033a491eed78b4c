//! Delegation chain resolution.
//!
//! Delegate pointers form a forest over the voter registry. Resolving a
//! delegation follows pointers from the chosen target until it reaches a
//! voter that has not handed its weight on. The walk never mutates the
//! registry and is bounded by the registry size.

use std::collections::{BTreeMap, HashSet};
use ballot_types::Address;
use crate::error::BallotError;
use crate::voter::Voter;

/// Voter registry: account -> record.
pub type Registry = BTreeMap<Address, Voter>;

/// Outcome of a successful chain walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// End of the chain (may be the target itself)
    pub terminal: Address,
    /// Accounts visited after the target, in order
    pub path: Vec<Address>,
}

impl Resolution {
    pub fn hops(&self) -> usize {
        self.path.len()
    }
}

/// Follow the delegation chain that starts at `target` on behalf of `caller`.
///
/// # Errors
/// - `DelegationLoop` if the walk reaches `caller`, revisits a node, or
///   exceeds `registry.len() + 1` hops.
pub fn resolve_terminal(
    registry: &Registry,
    caller: Address,
    target: Address,
) -> Result<Resolution, BallotError> {
    let max_hops = registry.len() + 1;
    let mut visited = HashSet::new();
    visited.insert(target);

    let mut current = target;
    let mut path = Vec::new();

    while let Some(next) = next_hop(registry, &current) {
        if next == caller || !visited.insert(next) || path.len() >= max_hops {
            return Err(BallotError::DelegationLoop);
        }
        path.push(next);
        current = next;
    }

    tracing::debug!(%caller, %target, terminal = %current, hops = path.len(), "Resolved delegation chain");

    Ok(Resolution {
        terminal: current,
        path,
    })
}

fn next_hop(registry: &Registry, address: &Address) -> Option<Address> {
    registry
        .get(address)
        .filter(|voter| voter.has_delegated())
        .and_then(|voter| voter.delegate)
}

/// Accounts whose recorded delegate is `delegate` (direct only).
pub fn delegators_of(registry: &Registry, delegate: &Address) -> Vec<Address> {
    registry
        .iter()
        .filter(|(_, voter)| voter.has_delegated() && voter.delegate.as_ref() == Some(delegate))
        .map(|(address, _)| *address)
        .collect()
}

/// All accounts whose weight flowed into `delegate`, including indirect ones.
pub fn all_delegators_of(registry: &Registry, delegate: &Address) -> Vec<Address> {
    let mut result = Vec::new();
    let mut to_process = vec![*delegate];
    let mut visited = HashSet::new();
    visited.insert(*delegate);

    while let Some(current) = to_process.pop() {
        for delegator in delegators_of(registry, &current) {
            if visited.insert(delegator) {
                result.push(delegator);
                to_process.push(delegator);
            }
        }
    }

    result
}
