use crate::ledger::ledger_error::LedgerError;
use crate::ledger::player_record::PlayerStatsRecord;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::{rename, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const STORE_INDENT: &[u8] = b"    ";

/// Reads every player record from the JSON store.
///
/// # Returns
///
/// The records in store order, `LedgerError::StoreNotFound` if the file is missing,
/// or the underlying read or parse error.
pub fn load_records(path: &Path) -> Result<Vec<PlayerStatsRecord>, LedgerError> {
    if !path.exists() {
        return Err(LedgerError::StoreNotFound(path.to_path_buf()));
    }
    let file = File::open(path)?;
    let records: Vec<PlayerStatsRecord> = serde_json::from_reader(BufReader::new(file))?;
    log::debug!("Loaded {} player records from {}", records.len(), path.display());
    Ok(records)
}

/// Serializes the records as a JSON array indented with four spaces.
fn generate_json(records: &[PlayerStatsRecord]) -> Result<Vec<u8>, LedgerError> {
    let mut json_output = Vec::new();
    let formatter = PrettyFormatter::with_indent(STORE_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut json_output, formatter);
    records.serialize(&mut serializer)?;
    Ok(json_output)
}

/// Replaces the JSON store with the given records.
///
/// The JSON is written to a sibling temporary file first and then renamed over
/// the store, so the store holds either the old or the new content.
pub fn save_records(path: &Path, records: &[PlayerStatsRecord]) -> Result<(), LedgerError> {
    let json_output = generate_json(records)?;

    let staging_path = staging_path(path);
    let file = File::create(&staging_path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&json_output)?;
    writer.flush()?;
    drop(writer);

    rename(&staging_path, path)?;
    log::debug!("Saved {} player records to {}", records.len(), path.display());
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut file_name = path.file_name().unwrap_or_default().to_os_string();
    file_name.push(".tmp");
    path.with_file_name(file_name)
}
