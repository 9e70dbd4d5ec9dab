// BalanceStore - Persistent balance records
//
// Each party's balance is a single signed integer stored as decimal text in
// its own record file. Empty or missing content means zero. Records are
// shared with the counterparty process, so nothing here caches values.

use crate::config::TrustlineConfig;
use crate::party::Party;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors from storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Corrupt balance record {}: {content:?} is not an integer", .path.display())]
    CorruptRecord { path: PathBuf, content: String },

    #[error("I/O failure on balance record {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether this error is a corrupt (unparseable) record
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::CorruptRecord { .. })
    }
}

/// A cell of integer balances, one per party
///
/// Readable and writable by several independent actors. Writes fully
/// replace the previous value; there is no locking and no transaction.
pub trait BalanceStore: Send + Sync {
    /// Create the party's record (as zero) if it does not exist yet
    fn ensure(&self, party: &Party) -> Result<(), StoreError>;

    /// Read the party's current balance
    fn read(&self, party: &Party) -> Result<i64, StoreError>;

    /// Overwrite the party's balance
    fn write(&self, party: &Party, balance: i64) -> Result<(), StoreError>;

    /// Whether `changed` refers to the party's record
    fn is_record_of(&self, party: &Party, changed: &Path) -> bool;
}

/// File-backed balance store rooted at a directory
#[derive(Clone, Debug)]
pub struct FileBalanceStore {
    directory: PathBuf,
    extension: String,
}

impl FileBalanceStore {
    /// Open a store in the configured directory, creating it if needed
    pub fn open(config: &TrustlineConfig) -> Result<Self, StoreError> {
        fs::create_dir_all(&config.directory)
            .map_err(|e| StoreError::io(&config.directory, e))?;

        Ok(Self {
            directory: config.directory.clone(),
            extension: config.extension.clone(),
        })
    }

    /// Directory holding the records
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the party's record file
    pub fn record_path(&self, party: &Party) -> PathBuf {
        self.directory.join(party.record_file_name(&self.extension))
    }

    /// Sibling file a new value is staged in before replacing the record
    fn staging_path(record: &Path) -> PathBuf {
        let mut staged = record.as_os_str().to_owned();
        staged.push(".tmp");
        PathBuf::from(staged)
    }

    fn parse(path: &Path, bytes: Vec<u8>) -> Result<i64, StoreError> {
        let text = String::from_utf8(bytes).map_err(|e| StoreError::CorruptRecord {
            path: path.to_path_buf(),
            content: String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })?;

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(0);
        }

        trimmed.parse::<i64>().map_err(|_| StoreError::CorruptRecord {
            path: path.to_path_buf(),
            content: text.clone(),
        })
    }
}

impl BalanceStore for FileBalanceStore {
    fn ensure(&self, party: &Party) -> Result<(), StoreError> {
        let path = self.record_path(party);
        // append mode never truncates an existing record
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| StoreError::io(&path, e))?;
        Ok(())
    }

    fn read(&self, party: &Party) -> Result<i64, StoreError> {
        self.ensure(party)?;

        let path = self.record_path(party);
        let bytes = fs::read(&path).map_err(|e| StoreError::io(&path, e))?;
        Self::parse(&path, bytes)
    }

    fn write(&self, party: &Party, balance: i64) -> Result<(), StoreError> {
        let path = self.record_path(party);
        let tmp_path = Self::staging_path(&path);

        // readers only ever see the old or the new value, never an empty file
        fs::write(&tmp_path, balance.to_string()).map_err(|e| StoreError::io(&tmp_path, e))?;
        fs::rename(&tmp_path, &path).map_err(|e| StoreError::io(&path, e))?;

        debug!(party = %party, balance, "wrote balance record");
        Ok(())
    }

    fn is_record_of(&self, party: &Party, changed: &Path) -> bool {
        let record = self.record_path(party);

        if changed.file_name() != record.file_name() {
            return false;
        }

        let changed = if changed.is_relative() {
            self.directory.join(changed)
        } else {
            changed.to_path_buf()
        };

        match (fs::canonicalize(&changed), fs::canonicalize(&record)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}
