//! Ballot Storage - Persistent ballot snapshots and serialized transactions.
//!
//! - `LedgerStore`: load/save the full ballot state
//! - `FileStore`: JSON snapshot on disk, with a lock file for writers
//! - `MemoryStore`: in-process store for tests and embedding
//! - `LedgerService`: single-writer front end that applies each transition
//!   atomically and persists it before it becomes visible

pub mod error;
pub mod store;
pub mod file_store;
pub mod service;

pub use error::StorageError;
pub use store::{LedgerStore, MemoryStore};
pub use file_store::{DirLock, FileStore, LOCK_FILE, SNAPSHOT_FILE};
pub use service::LedgerService;
