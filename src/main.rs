// trustline - interactive prompt for one side of a trustline

use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;
use trustline::command::run_session;
use trustline::{FileBalanceStore, Ledger, Party, PaymentWatcher, TrustlineConfig};

#[derive(Parser, Debug)]
#[command(name = "trustline", version, about = "Pay and get paid over a shared trustline")]
struct Cli {
    /// Your party name (your record is <user>.trustline)
    user: Party,

    /// Your partner's party name
    partner: Party,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = TrustlineConfig::default();
    let store = Arc::new(FileBalanceStore::open(&config)?);
    let directory = store.directory().to_path_buf();
    let ledger = Arc::new(Ledger::initialize(store, cli.user, cli.partner)?);

    let (_watcher, payments) = PaymentWatcher::spawn(Arc::clone(&ledger), &directory)?;

    let stdin = BufReader::new(tokio::io::stdin());
    run_session(&ledger, stdin, tokio::io::stdout(), payments).await?;

    Ok(())
}
