// Payment - An incoming transfer inferred from a balance increase

use chrono::{DateTime, Utc};
use std::fmt;

/// A payment received from the counterparty
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payment {
    amount: i64,
    received_at: DateTime<Utc>,
}

impl Payment {
    /// A payment of `amount`, detected now
    pub fn new(amount: i64) -> Self {
        Self {
            amount,
            received_at: Utc::now(),
        }
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// When the watcher detected the payment
    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }
}

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "You were paid {}!", self.amount)
    }
}
