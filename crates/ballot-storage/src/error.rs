use ballot_core::BallotError;
use thiserror::Error;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("No ballot deployed at {0}")]
    NotDeployed(String),

    #[error("A ballot is already deployed at {0}")]
    AlreadyDeployed(String),

    #[error("Corrupt snapshot: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Ledger(#[from] BallotError),
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialization(e.to_string())
    }
}

impl StorageError {
    /// Ledger rejection wrapped by this error, if any.
    pub fn as_ledger(&self) -> Option<&BallotError> {
        match self {
            StorageError::Ledger(e) => Some(e),
            _ => None,
        }
    }
}
