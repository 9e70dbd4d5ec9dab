// Party module - WHO HOLDS THE LINE
// Validated party names and their balance record file names

mod name;

pub use name::{Party, PartyError};
