// Trustline - a bilateral credit line between two local parties
//
// Each party's balance lives in its own record file. Paying rewrites both
// records; the counterparty's watcher notices its own balance go up and
// reports the difference as an incoming payment.

pub mod command;
pub mod config;
pub mod ledger;
pub mod party;
pub mod storage;
pub mod watch;

pub use config::TrustlineConfig;
pub use ledger::{Ledger, LedgerError};
pub use party::{Party, PartyError};
pub use storage::{BalanceStore, FileBalanceStore, StoreError};
pub use watch::{Payment, PaymentWatcher, WatchError};
