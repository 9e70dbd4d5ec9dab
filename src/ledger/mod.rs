// Ledger module - THE LINE ITSELF
// Pays the counterparty and detects incoming payments from balance changes

mod trustline;

pub use trustline::{Ledger, LedgerError};
