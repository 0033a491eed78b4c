//! Ballot Core - Delegated-voting ledger.
//!
//! This crate provides:
//! - The ballot state machine (rights, delegation, voting)
//! - Bounded delegation chain resolution with loop detection
//! - Deterministic tally of the leading proposal
//! - The event journal appended by every committed transition

pub mod ledger;
pub mod proposal;
pub mod voter;
pub mod delegation;
pub mod tally;
pub mod events;
pub mod error;

pub use ledger::{Ballot, GRANTED_WEIGHT};
pub use proposal::Proposal;
pub use voter::{Voter, VoterStatus};
pub use delegation::{resolve_terminal, Registry, Resolution};
pub use events::{EventKind, LedgerEvent, LogEntry};
pub use error::BallotError;
