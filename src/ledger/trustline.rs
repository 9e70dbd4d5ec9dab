// Ledger - A trustline seen from one party
//
// Both balance records are shared mutable state: the counterparty process
// rewrites ours when it pays us. The ledger keeps a private snapshot of the
// last self balance it observed and reports positive deltas as payments.

use crate::party::Party;
use crate::storage::{BalanceStore, StoreError};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, info};

/// Errors from ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid payment amount: {0} (must be positive)")]
    InvalidAmount(i64),

    #[error("Balance overflow")]
    Overflow,
}

/// One party's view of a trustline
pub struct Ledger {
    store: Arc<dyn BalanceStore>,
    self_party: Party,
    counterparty: Party,
    /// Last self balance observed by this process
    snapshot: Mutex<i64>,
}

impl Ledger {
    /// Bind a ledger to a (self, counterparty) pair
    ///
    /// Creates both records if absent and takes the initial snapshot from
    /// the self record.
    pub fn initialize(
        store: Arc<dyn BalanceStore>,
        self_party: Party,
        counterparty: Party,
    ) -> Result<Self, LedgerError> {
        store.ensure(&self_party)?;
        store.ensure(&counterparty)?;

        let snapshot = store.read(&self_party)?;
        info!(party = %self_party, counterparty = %counterparty, balance = snapshot, "trustline opened");

        Ok(Self {
            store,
            self_party,
            counterparty,
            snapshot: Mutex::new(snapshot),
        })
    }

    /// The party this ledger acts for
    pub fn self_party(&self) -> &Party {
        &self.self_party
    }

    /// The other side of the line
    pub fn counterparty(&self) -> &Party {
        &self.counterparty
    }

    /// Last observed self balance
    pub fn snapshot(&self) -> i64 {
        *self.lock_snapshot()
    }

    /// Live self balance, re-read from the store on every call
    pub fn balance(&self) -> Result<i64, LedgerError> {
        Ok(self.store.read(&self.self_party)?)
    }

    /// Pay the counterparty
    ///
    /// Both records are read before either is written, so a corrupt record
    /// aborts the payment untouched. The two writes are not atomic: if the
    /// second fails, self stays debited and the counterparty uncredited.
    pub fn pay(&self, amount: i64) -> Result<(), LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }

        let self_balance = self.store.read(&self.self_party)?;
        let counterparty_balance = self.store.read(&self.counterparty)?;

        let self_balance = self_balance
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow)?;
        let counterparty_balance = counterparty_balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.store.write(&self.self_party, self_balance)?;
        self.store.write(&self.counterparty, counterparty_balance)?;

        info!(to = %self.counterparty, amount, balance = self_balance, "payment sent");
        Ok(())
    }

    /// Check a changed file for an incoming payment
    ///
    /// Returns the positive delta of the self balance since the last
    /// observation, or 0. Changes to any other file are ignored and leave
    /// the snapshot alone. Any non-zero delta moves the snapshot, so the
    /// same change is never reported twice and decreases are absorbed.
    pub fn match_payment<P: AsRef<Path>>(&self, changed: P) -> Result<i64, LedgerError> {
        if !self.store.is_record_of(&self.self_party, changed.as_ref()) {
            return Ok(0);
        }

        let mut snapshot = self.lock_snapshot();
        let current = self.store.read(&self.self_party)?;
        let delta = current
            .checked_sub(*snapshot)
            .ok_or(LedgerError::Overflow)?;

        if delta != 0 {
            debug!(previous = *snapshot, current, delta, "self balance changed");
            *snapshot = current;
        }

        Ok(delta.max(0))
    }

    fn lock_snapshot(&self) -> MutexGuard<'_, i64> {
        // a panicked holder cannot leave the i64 half-written
        self.snapshot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("self_party", &self.self_party)
            .field("counterparty", &self.counterparty)
            .field("snapshot", &self.snapshot())
            .finish()
    }
}
