// Trustline configuration
//
// The binary always runs with the defaults (records in the current
// directory). Embedders and tests root the store elsewhere.

use std::path::{Path, PathBuf};

/// Extension of balance record files
pub const DEFAULT_EXTENSION: &str = "trustline";

/// Configuration for a trustline ledger and its watcher
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrustlineConfig {
    /// Directory holding both balance records
    pub directory: PathBuf,
    /// Record file extension, without the leading dot
    pub extension: String,
}

impl Default for TrustlineConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl TrustlineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the record directory
    pub fn with_directory<P: AsRef<Path>>(mut self, directory: P) -> Self {
        self.directory = directory.as_ref().to_path_buf();
        self
    }

    /// Set the record file extension
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }
}
