use crate::ledger::ledger_error::LedgerError;
use crate::session_processing::session_source::{collect_session_files, read_rows};

use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use rayon::ThreadPoolBuilder;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Collects every nickname appearing in the session ledgers of a folder.
///
/// Files are read in parallel on a dedicated thread pool. Nothing is written.
///
/// # Arguments
///
/// * `ledger_dir` - The folder containing the session ledgers.
/// * `num_threads` - The number of threads used to read the files.
///
/// # Returns
///
/// The sorted set of nicknames, or the first error met while reading.
pub fn scan_unique_nicknames(
    ledger_dir: &Path,
    num_threads: usize,
) -> Result<BTreeSet<String>, LedgerError> {
    let thread_pool = ThreadPoolBuilder::new().num_threads(num_threads).build()?;
    let paths = collect_session_files(ledger_dir)?;

    thread_pool.install(|| {
        paths
            .par_iter()
            .map(scan_file)
            .try_reduce(BTreeSet::new, merge_nicknames)
    })
}

fn scan_file(path: &PathBuf) -> Result<BTreeSet<String>, LedgerError> {
    log::debug!("Scanning nicknames in {}", path.display());
    let reader = csv::Reader::from_path(path)?;
    Ok(read_rows(reader)?
        .into_iter()
        .map(|row| row.player_nickname)
        .collect())
}

fn merge_nicknames(
    mut all_nicknames: BTreeSet<String>,
    file_nicknames: BTreeSet<String>,
) -> Result<BTreeSet<String>, LedgerError> {
    all_nicknames.extend(file_nicknames);
    Ok(all_nicknames)
}
