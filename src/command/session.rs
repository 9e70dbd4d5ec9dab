// Prompt session
//
// Reads commands line by line and, concurrently, prints payment
// notifications as the watcher delivers them. Ledger failures end the
// session; malformed input is reported and the prompt continues.

use crate::command::{Command, CommandError};
use crate::ledger::{Ledger, LedgerError};
use crate::watch::Payment;
use std::io;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::debug;

/// Prompt shown before every command
pub const PROMPT: &str = "> ";

/// Errors that end a session
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Run the prompt until `exit` or end of input
pub async fn run_session<R, W>(
    ledger: &Ledger,
    input: R,
    mut output: W,
    mut payments: mpsc::UnboundedReceiver<Payment>,
) -> Result<(), SessionError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output.write_all(b"Welcome to your Trustline!\n").await?;

    let mut lines = input.lines();
    let mut payments_open = true;

    write_prompt(&mut output).await?;
    loop {
        tokio::select! {
            payment = payments.recv(), if payments_open => {
                match payment {
                    Some(payment) => {
                        output.write_all(format!("\n{payment}\n").as_bytes()).await?;
                        write_prompt(&mut output).await?;
                    }
                    None => payments_open = false,
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("input closed");
                    output.write_all(b"Goodbye.\n").await?;
                    output.flush().await?;
                    return Ok(());
                };

                match Command::parse(&line) {
                    Ok(Some(Command::Exit)) => {
                        output.write_all(b"Goodbye.\n").await?;
                        output.flush().await?;
                        return Ok(());
                    }
                    Ok(Some(command)) => execute(ledger, command, &mut output).await?,
                    Ok(None) => {}
                    Err(CommandError::MalformedCommand(reason)) => {
                        output.write_all(format!("{reason}\n").as_bytes()).await?;
                    }
                }
                write_prompt(&mut output).await?;
            }
        }
    }
}

async fn execute<W: AsyncWrite + Unpin>(
    ledger: &Ledger,
    command: Command,
    output: &mut W,
) -> Result<(), SessionError> {
    match command {
        Command::Pay(amount) if amount > 0 => {
            ledger.pay(amount)?;
            output.write_all(format!("Sent {amount}\n").as_bytes()).await?;
        }
        Command::Balance => {
            let balance = ledger.balance()?;
            output.write_all(format!("{balance}\n").as_bytes()).await?;
        }
        Command::Pay(_) | Command::Unknown(_) | Command::Exit => {}
    }
    Ok(())
}

async fn write_prompt<W: AsyncWrite + Unpin>(output: &mut W) -> io::Result<()> {
    output.write_all(PROMPT.as_bytes()).await?;
    output.flush().await
}
