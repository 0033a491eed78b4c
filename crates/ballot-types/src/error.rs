use thiserror::Error;

/// Errors that can occur in type operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TypesError {
    #[error("Invalid address format: {0}")]
    InvalidAddressFormat(String),

    #[error("Invalid address length: expected 20, got {0}")]
    InvalidAddressLength(usize),

    #[error("Proposal name too long: max {max} bytes, got {actual}")]
    ProposalNameTooLong { max: usize, actual: usize },

    #[error("Proposal name contains a NUL byte at offset {0}")]
    ProposalNameContainsNul(usize),

    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}

impl From<hex::FromHexError> for TypesError {
    fn from(e: hex::FromHexError) -> Self {
        TypesError::InvalidHex(e.to_string())
    }
}
