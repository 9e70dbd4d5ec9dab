// Watch module - HOW PAYMENTS ARRIVE
// Filesystem watcher that turns balance record changes into payment notifications

mod payment;
mod watcher;

pub use payment::Payment;
pub use watcher::{run_watch_loop, PaymentWatcher, WatchError};
