// Payment Watcher - Filesystem events in, payments out
//
// A notify watcher on the record directory feeds raw events into a channel.
// The watch loop blocks until at least one event is queued, drains whatever
// else has piled up into a batch, asks the ledger about every path in order,
// and sends positive matches to the payment channel. It never prints.

use crate::ledger::Ledger;
use crate::watch::Payment;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Watcher-related errors
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Filesystem watcher failed: {0}")]
    Notify(#[from] notify::Error),
}

/// Watches a record directory and reports incoming payments
///
/// Dropping the watcher stops both the notify backend and the watch loop.
pub struct PaymentWatcher {
    _watcher: RecommendedWatcher,
    task: JoinHandle<()>,
}

impl PaymentWatcher {
    /// Start watching `directory` for changes to the ledger's self record
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        ledger: Arc<Ledger>,
        directory: &Path,
    ) -> Result<(Self, mpsc::UnboundedReceiver<Payment>), WatchError> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            // receiver gone means the loop has stopped
            let _ = event_tx.send(res);
        })?;
        watcher.watch(directory, RecursiveMode::NonRecursive)?;
        debug!(directory = %directory.display(), "watching for payments");

        let (payment_tx, payment_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run_watch_loop(ledger, event_rx, payment_tx));

        Ok((
            Self {
                _watcher: watcher,
                task,
            },
            payment_rx,
        ))
    }

    /// Whether the watch loop has stopped
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PaymentWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Drive the watch loop until the event source closes or nobody listens
///
/// Events already queued when the loop wakes up are processed as one batch,
/// each through `Ledger::match_payment` in arrival order.
pub async fn run_watch_loop(
    ledger: Arc<Ledger>,
    mut events: mpsc::UnboundedReceiver<notify::Result<Event>>,
    payments: mpsc::UnboundedSender<Payment>,
) {
    while let Some(first) = events.recv().await {
        let mut batch = vec![first];
        while let Ok(next) = events.try_recv() {
            batch.push(next);
        }
        debug!(events = batch.len(), "watcher woke up");

        for event in batch {
            if !process_event(&ledger, event, &payments) {
                debug!("payment receiver closed, stopping watcher");
                return;
            }
        }
    }
}

/// Returns false once the payment receiver is gone
fn process_event(
    ledger: &Ledger,
    event: notify::Result<Event>,
    payments: &mpsc::UnboundedSender<Payment>,
) -> bool {
    let event = match event {
        Ok(event) => event,
        Err(e) => {
            warn!(error = %e, "filesystem watcher error");
            return true;
        }
    };

    if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
        return true;
    }

    for path in &event.paths {
        match ledger.match_payment(path) {
            Ok(0) => {}
            Ok(amount) => {
                let payment = Payment::new(amount);
                info!(
                    from = %ledger.counterparty(),
                    amount,
                    received_at = %payment.received_at(),
                    "payment received"
                );
                if payments.send(payment).is_err() {
                    return false;
                }
            }
            Err(e) => warn!(path = %path.display(), error = %e, "could not check balance record"),
        }
    }

    true
}
