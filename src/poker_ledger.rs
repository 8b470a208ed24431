use crate::config::LedgerConfig;
use crate::ledger::ledger_error::LedgerError;
use crate::ledger::ledger_store::{load_records, save_records};
use crate::ledger::player_record::{PlayerStatsRecord, RECORD_FIELDS};
use crate::ledger::stats_merger::{merge_session, MergeOutcome};
use crate::reporting::session_report::{
    write_lines, write_session_added, write_session_results, write_unknown_players,
};
use crate::session_processing::extreme_finder::find_extremes;
use crate::session_processing::nickname_scan::scan_unique_nicknames;
use crate::session_processing::session_aggregator::calculate_net_winnings;
use crate::session_processing::session_source::{
    collect_session_files, extract_session_id, load_session, session_path,
};

use serde_json::Value;
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

/// What happened to a session handed to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Added,
    Rejected,
}

/// Counts of a bulk ingestion run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    pub added: usize,
    pub rejected: usize,
}

/// The statistics ledger of a poker group: a folder of session ledgers and a JSON store of players.
///
/// Every command reads the store in full and, when it changes anything, writes it
/// back in full once all the work is done. Report lines go to the given writer.
#[derive(Debug)]
pub struct PokerLedger {
    config: LedgerConfig,
}

impl PokerLedger {
    /// Creates a ledger after checking that the store and the ledger folder exist.
    pub fn new(config: LedgerConfig) -> Result<Self, LedgerError> {
        if !config.store_path.exists() {
            return Err(LedgerError::StoreNotFound(config.store_path));
        }
        if !config.ledger_dir.exists() {
            return Err(LedgerError::LedgerDirNotFound(config.ledger_dir));
        }
        Ok(Self { config })
    }

    /// Returns the path of the ledger file of a session in the ledger folder.
    pub fn session_path(&self, session_id: &str) -> PathBuf {
        session_path(&self.config.ledger_dir, session_id)
    }

    /// Adds one session to the store.
    ///
    /// The session is merged only if every participant is a known player. Otherwise
    /// the store is left untouched and the unknown nicknames are reported.
    pub fn add_session<W: Write>(
        &self,
        session_file: &Path,
        out: &mut W,
    ) -> Result<SessionStatus, LedgerError> {
        let mut records = load_records(&self.config.store_path)?;
        self.ingest_session(&mut records, session_file, &self.config.excluded_set(), out)
    }

    /// Adds every session of the ledger folder in file name order.
    ///
    /// Each session is its own transaction: a rejected session does not stop the
    /// following ones, while a fatal error stops the run and keeps the sessions
    /// already added.
    pub fn add_all_sessions<W: Write>(&self, out: &mut W) -> Result<IngestSummary, LedgerError> {
        let mut records = load_records(&self.config.store_path)?;
        let mut summary = IngestSummary::default();

        for session_file in collect_session_files(&self.config.ledger_dir)? {
            let excluded = self.config.excluded_set();
            match self.ingest_session(&mut records, &session_file, &excluded, out)? {
                SessionStatus::Added => summary.added += 1,
                SessionStatus::Rejected => summary.rejected += 1,
            }
        }

        log::info!(
            "Bulk ingestion finished: {} added, {} rejected",
            summary.added,
            summary.rejected
        );
        Ok(summary)
    }

    fn ingest_session<W: Write>(
        &self,
        records: &mut Vec<PlayerStatsRecord>,
        session_file: &Path,
        excluded: &HashSet<String>,
        out: &mut W,
    ) -> Result<SessionStatus, LedgerError> {
        let session = load_session(session_file)?;
        let session_net = calculate_net_winnings(&session.rows, excluded)?;
        let extremes =
            find_extremes(session_net.iter().map(|(nickname, net)| (nickname.as_str(), *net)));

        match merge_session(records.as_slice(), &session_net, &session.session_id, &extremes)? {
            MergeOutcome::Committed { records: staged } => {
                save_records(&self.config.store_path, &staged)?;
                *records = staged;
                log::info!(
                    "Session {} added with {} players",
                    session.session_id,
                    session_net.len()
                );
                write_session_added(out, &session_net, &session.session_id)?;
                Ok(SessionStatus::Added)
            }
            MergeOutcome::Rejected { unknown } => {
                log::warn!(
                    "Session {} skipped, unknown players: {}",
                    session.session_id,
                    unknown.join(", ")
                );
                write_unknown_players(out, &unknown)?;
                Ok(SessionStatus::Rejected)
            }
        }
    }

    /// Prints the net of every player of a session, biggest winner first. Nobody is excluded.
    pub fn print_session_results<W: Write>(
        &self,
        session_file: &Path,
        out: &mut W,
    ) -> Result<(), LedgerError> {
        let session = load_session(session_file)?;
        let session_net = calculate_net_winnings(&session.rows, &HashSet::new())?;
        write_session_results(out, &session_net)?;
        Ok(())
    }

    /// Prints the id of every session in the ledger folder.
    pub fn print_all_sessions<W: Write>(&self, out: &mut W) -> Result<(), LedgerError> {
        let session_ids = collect_session_files(&self.config.ledger_dir)?
            .iter()
            .map(|path| extract_session_id(path))
            .collect::<Result<Vec<_>, _>>()?;
        write_lines(out, session_ids)?;
        Ok(())
    }

    /// Prints every nickname found in the ledger folder, sorted.
    pub fn print_unique_nicknames<W: Write>(&self, out: &mut W) -> Result<(), LedgerError> {
        let nicknames =
            scan_unique_nicknames(&self.config.ledger_dir, self.config.scan_threads)?;
        write_lines(out, nicknames)?;
        Ok(())
    }

    /// Zeroes the statistics of every player, keeping their nicknames.
    pub fn reset_statistics(&self) -> Result<(), LedgerError> {
        self.update_records(PlayerStatsRecord::reset_statistics)?;
        log::info!("Statistics reset");
        Ok(())
    }

    /// Sorts the games played by every player.
    pub fn sort_games_played(&self) -> Result<(), LedgerError> {
        self.update_records(PlayerStatsRecord::sort_games_played)
    }

    /// Sets an extra field to `value` on every player record.
    ///
    /// # Returns
    ///
    /// `LedgerError::ReservedField` if the field is one of the statistics fields.
    pub fn add_field(&self, field: &str, value: Value) -> Result<(), LedgerError> {
        if RECORD_FIELDS.contains(&field) {
            return Err(LedgerError::ReservedField(field.to_owned()));
        }
        self.update_records(|record| {
            record.extra_fields.insert(field.to_owned(), value.clone());
        })?;
        log::info!("Field {field} added to every player");
        Ok(())
    }

    fn update_records<F>(&self, update: F) -> Result<(), LedgerError>
    where
        F: FnMut(&mut PlayerStatsRecord),
    {
        let mut records = load_records(&self.config.store_path)?;
        records.iter_mut().for_each(update);
        save_records(&self.config.store_path, &records)
    }
}
