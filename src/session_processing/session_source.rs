use crate::ledger::ledger_error::LedgerError;
use crate::session_processing::session_row::{SessionData, SessionRow};

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::read_dir;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Session ledger files are named `ledger<session id>.csv`.
static SESSION_FILE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"ledger(.*?)\.csv").expect("session file pattern is valid"));

const SESSION_FILE_PREFIX: &str = "ledger";
const SESSION_FILE_EXTENSION: &str = "csv";

/// Returns the path of the ledger file of a session inside the ledger folder.
pub fn session_path(ledger_dir: &Path, session_id: &str) -> PathBuf {
    ledger_dir.join(format!(
        "{SESSION_FILE_PREFIX}{session_id}.{SESSION_FILE_EXTENSION}"
    ))
}

/// Loads a session ledger file.
///
/// The file must exist, carry the `.csv` extension and be named `ledger<id>.csv`,
/// checked in that order.
///
/// # Returns
///
/// The parsed rows and the session id, or the first failed check as a `LedgerError`.
pub fn load_session(path: &Path) -> Result<SessionData, LedgerError> {
    if !path.exists() {
        return Err(LedgerError::SessionFileNotFound(path.to_path_buf()));
    }
    if !is_csv(path) {
        return Err(LedgerError::NotCsv(path.to_path_buf()));
    }
    let session_id = extract_session_id(path)?;

    let reader = csv::Reader::from_path(path)?;
    let rows = read_rows(reader)?;
    log::debug!("Read {} rows from {}", rows.len(), path.display());

    Ok(SessionData { session_id, rows })
}

/// Extracts the session id from the file name of a session ledger.
///
/// # Returns
///
/// The text between the `ledger` prefix and the `.csv` extension, or
/// `LedgerError::MissingSessionId` if the name does not follow that shape.
pub fn extract_session_id(path: &Path) -> Result<String, LedgerError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| LedgerError::MissingSessionId(path.to_path_buf()))?;

    SESSION_FILE_NAME
        .captures(file_name)
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str())
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| LedgerError::MissingSessionId(path.to_path_buf()))
}

/// Deserializes every row of a session ledger, failing on the first malformed one.
pub fn read_rows<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<SessionRow>, LedgerError> {
    reader
        .deserialize::<SessionRow>()
        .map(|row| row.map_err(LedgerError::from))
        .collect()
}

/// Collects all CSV files of the ledger folder, sorted by file name.
pub fn collect_session_files(ledger_dir: &Path) -> Result<Vec<PathBuf>, LedgerError> {
    let mut paths: Vec<PathBuf> = read_dir(ledger_dir)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_csv(path))
        .collect();
    paths.sort_by(|p1, p2| p1.file_name().cmp(&p2.file_name()));
    Ok(paths)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext == SESSION_FILE_EXTENSION)
}
