//! Storage backends for ballot snapshots.

use ballot_core::Ballot;
use parking_lot::RwLock;

use crate::error::StorageError;

/// Persists and retrieves the full ballot state (proposals, voters,
/// chairperson and journal) as one snapshot.
pub trait LedgerStore: Send + Sync {
    /// Held for the duration of a read-modify-write cycle.
    type Guard;

    /// Take exclusive write access, waiting for other writers of the same
    /// store to finish.
    fn lock(&self) -> Result<Self::Guard, StorageError>;

    /// Load the stored ballot, or `None` if nothing was deployed yet.
    fn load(&self) -> Result<Option<Ballot>, StorageError>;

    /// Replace the stored ballot.
    fn save(&self, ballot: &Ballot) -> Result<(), StorageError>;

    /// Whether a ballot has been stored.
    fn exists(&self) -> bool;

    /// Human-readable location, for messages.
    fn location(&self) -> String;
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: RwLock<Option<Ballot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for MemoryStore {
    // A memory store has a single owner, which already serializes writes.
    type Guard = ();

    fn lock(&self) -> Result<(), StorageError> {
        Ok(())
    }

    fn load(&self) -> Result<Option<Ballot>, StorageError> {
        Ok(self.snapshot.read().clone())
    }

    fn save(&self, ballot: &Ballot) -> Result<(), StorageError> {
        *self.snapshot.write() = Some(ballot.clone());
        Ok(())
    }

    fn exists(&self) -> bool {
        self.snapshot.read().is_some()
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
