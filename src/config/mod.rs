// Config module - WHERE THE RECORDS LIVE

mod settings;

pub use settings::{TrustlineConfig, DEFAULT_EXTENSION};
