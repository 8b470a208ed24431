use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use poker_ledger::{LedgerConfig, PokerLedger};
use serde_json::Value;
use std::io::{stdout, Write};

#[derive(Debug, Parser)]
#[command(name = "poker_ledger", version)]
#[command(about = "Keeps the running statistics of a poker group from its session ledgers")]
struct Cli {
    #[command(flatten)]
    config: LedgerConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the results of one session
    Results { session_id: String },
    /// Print the id of every session in the ledger folder
    Sessions,
    /// Print every nickname found in the ledger folder
    Nicknames,
    /// Add one session to the player statistics
    Add { session_id: String },
    /// Add every session in the ledger folder
    AddAll,
    /// Zero the statistics of every player
    Reset,
    /// Sort the games played by every player
    SortHistory,
    /// Add a field to every player record
    AddField {
        name: String,
        /// JSON value of the field; text that is not JSON is stored as a string
        #[arg(default_value = "0")]
        value: String,
    },
}

fn parse_field_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let ledger = PokerLedger::new(cli.config).context("Failed to open the poker ledger")?;
    let mut out = stdout().lock();

    match cli.command {
        Command::Results { session_id } => {
            let path = ledger.session_path(&session_id);
            ledger.print_session_results(&path, &mut out)?;
        }
        Command::Sessions => ledger.print_all_sessions(&mut out)?,
        Command::Nicknames => ledger.print_unique_nicknames(&mut out)?,
        Command::Add { session_id } => {
            let path = ledger.session_path(&session_id);
            ledger
                .add_session(&path, &mut out)
                .with_context(|| format!("Failed to add session {session_id}"))?;
        }
        Command::AddAll => {
            ledger
                .add_all_sessions(&mut out)
                .context("Failed to add all sessions")?;
        }
        Command::Reset => ledger.reset_statistics()?,
        Command::SortHistory => ledger.sort_games_played()?,
        Command::AddField { name, value } => {
            ledger.add_field(&name, parse_field_value(&value))?;
        }
    }

    out.flush()?;
    Ok(())
}
