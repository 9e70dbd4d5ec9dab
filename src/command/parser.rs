// Command parser
//
// pay <amount> | balance | exit. Anything else is an unknown command and
// is ignored by the session.

use thiserror::Error;

/// Errors from parsing a command line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Malformed command: {0}")]
    MalformedCommand(String),
}

/// A command entered at the prompt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Pay the counterparty; non-positive amounts are ignored by the session
    Pay(i64),
    /// Show the live self balance
    Balance,
    /// Leave the session
    Exit,
    /// Unrecognized command word
    Unknown(String),
}

impl Command {
    /// Parse one input line; blank lines yield `None`
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let mut words = line.split_whitespace();

        let Some(word) = words.next() else {
            return Ok(None);
        };

        let command = match word {
            "pay" => {
                let amount = words.next().ok_or_else(|| {
                    CommandError::MalformedCommand("pay requires an amount".to_string())
                })?;
                let amount = amount.parse::<i64>().map_err(|_| {
                    CommandError::MalformedCommand(format!("{amount:?} is not an integer amount"))
                })?;
                Command::Pay(amount)
            }
            "balance" => Command::Balance,
            "exit" => Command::Exit,
            other => Command::Unknown(other.to_string()),
        };

        Ok(Some(command))
    }
}
