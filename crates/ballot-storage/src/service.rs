//! Serialized, persisted access to a ballot.
//!
//! `LedgerService` fronts a store. Every transition holds the in-process
//! write lock and the store lock, re-reads the stored ballot, applies the
//! operation to it and persists the result before it becomes the live
//! state. Services in other threads or processes sharing the store see
//! each other's commits. A rejected call or a failed save leaves the
//! stored ballot untouched.

use ballot_core::{Ballot, BallotError, LogEntry};
use ballot_types::{Address, ProposalName};
use parking_lot::RwLock;

use crate::error::StorageError;
use crate::store::LedgerStore;

pub struct LedgerService<S: LedgerStore> {
    store: S,
    ballot: RwLock<Ballot>,
}

impl<S: LedgerStore> LedgerService<S> {
    /// Create and persist a new ballot.
    ///
    /// Fails with `AlreadyDeployed` if the store holds a ballot and
    /// `overwrite` is false.
    pub fn deploy(
        store: S,
        chairperson: Address,
        names: Vec<ProposalName>,
        overwrite: bool,
    ) -> Result<Self, StorageError> {
        let guard = store.lock()?;
        if store.exists() && !overwrite {
            return Err(StorageError::AlreadyDeployed(store.location()));
        }

        let ballot = Ballot::new(chairperson, names)?;
        store.save(&ballot)?;
        drop(guard);
        tracing::info!(%chairperson, location = %store.location(), "Deployed ballot");

        Ok(Self {
            store,
            ballot: RwLock::new(ballot),
        })
    }

    /// Attach to an existing ballot.
    pub fn open(store: S) -> Result<Self, StorageError> {
        let ballot = store
            .load()?
            .ok_or_else(|| StorageError::NotDeployed(store.location()))?;
        Ok(Self {
            store,
            ballot: RwLock::new(ballot),
        })
    }

    /// Apply one transition atomically against the latest stored ballot.
    pub fn transact<T, F>(&self, op: F) -> Result<T, StorageError>
    where
        F: FnOnce(&mut Ballot) -> Result<T, BallotError>,
    {
        let mut live = self.ballot.write();
        let _guard = self.store.lock()?;
        let current = self
            .store
            .load()?
            .ok_or_else(|| StorageError::NotDeployed(self.store.location()))?;
        let mut working = current.clone();

        let output = match op(&mut working) {
            Ok(output) => output,
            Err(e) => {
                *live = current;
                tracing::warn!("Transaction rejected: {}", e);
                return Err(e.into());
            }
        };

        self.store.save(&working)?;
        *live = working;
        Ok(output)
    }

    /// Run a query against the current state.
    pub fn read<T>(&self, f: impl FnOnce(&Ballot) -> T) -> T {
        f(&self.ballot.read())
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> Ballot {
        self.ballot.read().clone()
    }

    /// Re-read the store, picking up changes written by other processes.
    /// Returns true if the state changed.
    pub fn reload(&self) -> Result<bool, StorageError> {
        let loaded = self
            .store
            .load()?
            .ok_or_else(|| StorageError::NotDeployed(self.store.location()))?;
        let mut live = self.ballot.write();
        if *live == loaded {
            return Ok(false);
        }
        *live = loaded;
        Ok(true)
    }

    pub fn grant_right(&self, caller: Address, voter: Address) -> Result<LogEntry, StorageError> {
        self.transact(|ballot| ballot.grant_right(caller, voter))
    }

    pub fn delegate(&self, caller: Address, to: Address) -> Result<LogEntry, StorageError> {
        self.transact(|ballot| ballot.delegate(caller, to))
    }

    pub fn vote(&self, caller: Address, proposal: u32) -> Result<LogEntry, StorageError> {
        self.transact(|ballot| ballot.vote(caller, proposal))
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
