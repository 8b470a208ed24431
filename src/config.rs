use clap::Args;
use std::collections::HashSet;
use std::path::PathBuf;

pub const DEFAULT_SCAN_THREADS: usize = 4;

/// Where the ledger lives and how it is processed. Every option can also come from the environment.
#[derive(Args, Debug, Clone)]
pub struct LedgerConfig {
    /// Folder holding the `ledger<ID>.csv` session files
    #[arg(long, env = "POKER_LEDGER_DIR", default_value = "ledgers")]
    pub ledger_dir: PathBuf,

    /// JSON store with one record per player
    #[arg(long = "store", env = "POKER_STORE", default_value = "data.json")]
    pub store_path: PathBuf,

    /// Threads used to scan session files for nicknames
    #[arg(long, env = "POKER_SCAN_THREADS", default_value_t = DEFAULT_SCAN_THREADS)]
    pub scan_threads: usize,

    /// Nickname to leave out when adding sessions (repeatable)
    #[arg(long = "exclude", value_name = "NAME")]
    pub excluded: Vec<String>,
}

impl LedgerConfig {
    pub fn new(ledger_dir: impl Into<PathBuf>, store_path: impl Into<PathBuf>) -> Self {
        Self {
            ledger_dir: ledger_dir.into(),
            store_path: store_path.into(),
            scan_threads: DEFAULT_SCAN_THREADS,
            excluded: Vec::new(),
        }
    }

    /// Returns a fresh exclusion set for one call.
    pub fn excluded_set(&self) -> HashSet<String> {
        self.excluded.iter().cloned().collect()
    }
}
