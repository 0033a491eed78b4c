//! End-to-end ballot scenarios.

use ballot_core::{Ballot, BallotError, LedgerEvent, VoterStatus};
use ballot_types::Address;

fn account(n: u8) -> Address {
    Address::from_seed(&[b'a', n])
}

fn deploy() -> (Ballot, Address) {
    let chair = account(0);
    let ballot = Ballot::from_names(chair, ["Proposal 1", "Proposal 2", "Proposal 3"]).unwrap();
    (ballot, chair)
}

#[test]
fn five_votes_pick_proposal_three() {
    let (mut ballot, chair) = deploy();
    for i in 1..5 {
        ballot.grant_right(chair, account(i)).unwrap();
    }

    ballot.vote(chair, 2).unwrap();
    ballot.vote(account(1), 1).unwrap();
    ballot.vote(account(2), 2).unwrap();
    ballot.vote(account(3), 0).unwrap();
    ballot.vote(account(4), 2).unwrap();

    assert_eq!(ballot.winning_proposal(), 2);
    assert_eq!(ballot.winner_name().as_str(), "Proposal 3");
    assert_eq!(ballot.total_votes(), 5);
    ballot.check_conservation().unwrap();
}

#[test]
fn delegation_follows_later_redelegation_of_target() {
    let (mut ballot, chair) = deploy();
    let (a, b, c) = (account(1), account(2), account(3));
    for v in [a, b, c] {
        ballot.grant_right(chair, v).unwrap();
    }

    // B delegates to C before A delegates to B
    ballot.delegate(b, c).unwrap();
    ballot.delegate(a, b).unwrap();

    assert_eq!(ballot.voter(&a).delegate, Some(c));
    assert_ne!(ballot.voter(&a).delegate, Some(b));

    ballot.vote(c, 1).unwrap();
    assert_eq!(ballot.proposal(1).unwrap().vote_count, 3);
}

#[test]
fn two_cycle_is_rejected_and_first_delegation_survives() {
    let (mut ballot, chair) = deploy();
    let (a, b) = (account(1), account(2));
    ballot.grant_right(chair, a).unwrap();
    ballot.grant_right(chair, b).unwrap();

    ballot.delegate(a, b).unwrap();
    assert_eq!(ballot.delegate(b, a), Err(BallotError::DelegationLoop));

    assert_eq!(ballot.voter(&a).delegate, Some(b));
    assert_eq!(ballot.voter(&b).weight, 2);
    assert_eq!(ballot.voter(&b).status(), VoterStatus::Registered);
    assert_eq!(ballot.events().len(), 3);
}

#[test]
fn three_cycle_through_caller_is_rejected() {
    let (mut ballot, chair) = deploy();
    let (a, b, c) = (account(1), account(2), account(3));
    for v in [a, b, c] {
        ballot.grant_right(chair, v).unwrap();
    }

    ballot.delegate(a, b).unwrap();
    ballot.delegate(b, c).unwrap();
    assert_eq!(ballot.delegate(c, a), Err(BallotError::DelegationLoop));
}

#[test]
fn self_delegation_fails_regardless_of_weight() {
    let (mut ballot, chair) = deploy();
    let (a, b) = (account(1), account(2));
    ballot.grant_right(chair, a).unwrap();
    ballot.grant_right(chair, b).unwrap();
    ballot.delegate(a, b).unwrap();

    // b now holds weight 2
    assert_eq!(ballot.delegate(b, b), Err(BallotError::SelfDelegation));
    assert_eq!(ballot.delegate(chair, chair), Err(BallotError::SelfDelegation));
}

#[test]
fn delegating_to_voter_credits_immediately() {
    let (mut ballot, chair) = deploy();
    let (a, b, c) = (account(1), account(2), account(3));
    for v in [a, b, c] {
        ballot.grant_right(chair, v).unwrap();
    }

    // A -> B, then B votes with weight 2, then C delegates to A's terminal
    ballot.delegate(a, b).unwrap();
    ballot.vote(b, 0).unwrap();
    assert_eq!(ballot.proposal(0).unwrap().vote_count, 2);

    let entry = ballot.delegate(c, a).unwrap();
    assert_eq!(ballot.proposal(0).unwrap().vote_count, 3);
    assert_eq!(ballot.voter(&c).delegate, Some(b));
    match entry.event {
        LedgerEvent::Delegated { to, voted, vote, vote_count, .. } => {
            assert_eq!(to, a);
            assert!(voted);
            assert_eq!(vote, 0);
            assert_eq!(vote_count, 3);
        }
        other => panic!("unexpected event {other:?}"),
    }
    ballot.check_conservation().unwrap();
}

#[test]
fn population_scenario() {
    // 1 votes 0, 2 delegates to 3, 3 votes 0, 4 delegates to 2
    let (mut ballot, chair) = deploy();
    for i in 1..=4 {
        ballot.grant_right(chair, account(i)).unwrap();
    }
    ballot.vote(account(1), 0).unwrap();
    ballot.delegate(account(2), account(3)).unwrap();
    ballot.vote(account(3), 0).unwrap();
    ballot.delegate(account(4), account(2)).unwrap();

    assert_eq!(ballot.proposal(0).unwrap().vote_count, 4);
    assert_eq!(ballot.voter(&account(4)).delegate, Some(account(3)));
    assert_eq!(ballot.winning_proposal(), 0);
    assert_eq!(ballot.events().len(), 8);
    ballot.check_conservation().unwrap();
}

#[test]
fn journal_hashes_are_unique() {
    let (mut ballot, chair) = deploy();
    for i in 1..=3 {
        ballot.grant_right(chair, account(i)).unwrap();
    }
    let hashes: std::collections::HashSet<_> = ballot.events().iter().map(|e| e.hash()).collect();
    assert_eq!(hashes.len(), 3);
}
