//! File store - ballot snapshot as a JSON file.

use ballot_core::Ballot;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::store::LedgerStore;

/// Snapshot file name inside the data directory.
pub const SNAPSHOT_FILE: &str = "ledger.json";

/// Lock file taken by writers of the data directory.
pub const LOCK_FILE: &str = "ledger.lock";

/// Exclusive lock on a data directory. Released when dropped.
#[derive(Debug)]
pub struct DirLock {
    _file: fs::File,
}

/// Stores the ballot as `<dir>/ledger.json`.
///
/// Saves go through a temporary file and a rename, so readers only ever
/// see a complete snapshot.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `path`, creating the directory if needed.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(path)?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.path.join(SNAPSHOT_FILE)
    }

    pub fn lock_path(&self) -> PathBuf {
        self.path.join(LOCK_FILE)
    }

    pub fn dir(&self) -> &Path {
        &self.path
    }
}

#[cfg(unix)]
fn lock_exclusive(file: &fs::File) -> std::io::Result<()> {
    use std::os::fd::AsRawFd;

    // SAFETY: the descriptor is owned by `file`, which outlives the call.
    let result = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX) };
    if result == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn lock_exclusive(_file: &fs::File) -> std::io::Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "file locking is not supported on this platform",
    ))
}

impl LedgerStore for FileStore {
    type Guard = DirLock;

    fn lock(&self) -> Result<DirLock, StorageError> {
        let file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())?;
        lock_exclusive(&file)?;
        tracing::trace!("Locked {:?}", self.lock_path());
        Ok(DirLock { _file: file })
    }

    fn load(&self) -> Result<Option<Ballot>, StorageError> {
        let file = self.snapshot_path();
        if !file.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&file)?;
        let ballot: Ballot = serde_json::from_str(&content)
            .map_err(|e| StorageError::Corrupt(format!("{}: {}", file.display(), e)))?;
        ballot
            .check_conservation()
            .map_err(|e| StorageError::Corrupt(format!("{}: {}", file.display(), e)))?;

        tracing::info!(
            "Loaded ballot from {:?}: {} proposals, {} events",
            file,
            ballot.proposal_count(),
            ballot.last_seq()
        );
        Ok(Some(ballot))
    }

    fn save(&self, ballot: &Ballot) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(ballot)?;
        let file = self.snapshot_path();
        let tmp = file.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &file)?;

        tracing::debug!("Ballot persisted to {:?} (seq {})", file, ballot.last_seq());
        Ok(())
    }

    fn exists(&self) -> bool {
        self.snapshot_path().exists()
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
