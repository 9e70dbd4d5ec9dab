// Command module - THE PROMPT
// Parses interactive commands and runs the prompt session against a ledger

mod parser;
mod session;

pub use parser::{Command, CommandError};
pub use session::{run_session, SessionError, PROMPT};
