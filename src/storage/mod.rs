// Storage module - PERSISTENCE
// Balance records: one decimal integer per party, one file per record

mod store;

pub use store::{BalanceStore, FileBalanceStore, StoreError};
