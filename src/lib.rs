pub mod config;
pub mod ledger;
pub mod poker_ledger;
pub mod reporting;
pub mod session_processing;

pub use config::LedgerConfig;
pub use ledger::ledger_error::LedgerError;
pub use poker_ledger::{IngestSummary, PokerLedger, SessionStatus};
