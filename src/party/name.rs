// Party - One side of a trustline
//
// A party is identified by its name. The name doubles as the stem of the
// balance record file, so anything that could escape the record directory
// is rejected up front.

use std::fmt;
use thiserror::Error;

/// Errors from constructing a party
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PartyError {
    #[error("Invalid party name: {0:?}")]
    InvalidName(String),
}

/// A named participant in a trustline
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Party(String);

impl Party {
    /// Create a party from a name
    ///
    /// Empty names, `.`/`..`, and names containing a path separator are
    /// rejected.
    pub fn new(name: impl Into<String>) -> Result<Self, PartyError> {
        let name = name.into();

        let invalid = name.trim().is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
            || name.contains('\0');

        if invalid {
            return Err(PartyError::InvalidName(name));
        }

        Ok(Self(name))
    }

    /// Get the party name
    pub fn name(&self) -> &str {
        &self.0
    }

    /// File name of this party's balance record, e.g. `alice.trustline`
    pub fn record_file_name(&self, extension: &str) -> String {
        format!("{}.{}", self.0, extension)
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Party {
    type Err = PartyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Party::new(s)
    }
}
