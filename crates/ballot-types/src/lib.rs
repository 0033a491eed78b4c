//! Ballot Types - Core type definitions for the ballot ledger.
//!
//! This crate provides the fundamental types shared by the ledger, its
//! storage and the command line:
//! - Addresses (20-byte account identifiers, `0x` hex encoded)
//! - Proposal names (32-byte fixed-length strings)

pub mod address;
pub mod proposal_name;
pub mod error;

#[cfg(feature = "serde")]
mod serialization;

pub use address::Address;
pub use proposal_name::ProposalName;
pub use error::TypesError;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Address, ProposalName, TypesError};
}
