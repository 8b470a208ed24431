use crate::ledger::ledger_error::LedgerError;
use crate::ledger::nickname_index::NicknameIndex;
use crate::ledger::player_record::PlayerStatsRecord;
use crate::session_processing::extreme_finder::SessionExtremes;
use crate::session_processing::session_aggregator::SessionNet;

use std::collections::BTreeMap;

/// Result of merging one session into the player records.
#[derive(Debug)]
pub enum MergeOutcome {
    /// Every participant was known. `records` is the updated store, ready to be saved.
    Committed { records: Vec<PlayerStatsRecord> },
    /// At least one participant was unknown. The store must stay as it was.
    Rejected { unknown: Vec<String> },
}

/// Merges the net winnings of one session into the player records.
///
/// The records are never modified in place: updates go to a staged copy that is
/// handed back only when every nickname of the session belongs to a known player.
/// Otherwise no copy is made and the unknown nicknames are returned.
///
/// A player who shows up under several aliases in the same session is merged once,
/// with the nets of those aliases summed.
///
/// # Arguments
///
/// * `records` - The current player records.
/// * `session_net` - Net winnings of the session by nickname.
/// * `session_id` - Id of the session.
/// * `extremes` - Biggest winners and losers of the same session.
///
/// # Returns
///
/// The `MergeOutcome`, or `LedgerError::DuplicateNickname` if the records share a nickname.
pub fn merge_session(
    records: &[PlayerStatsRecord],
    session_net: &SessionNet,
    session_id: &str,
    extremes: &SessionExtremes,
) -> Result<MergeOutcome, LedgerError> {
    let index = NicknameIndex::build(records)?;
    let mut results_by_record: BTreeMap<usize, RecordSessionResult> = BTreeMap::new();
    let mut unknown = Vec::new();

    for (nickname, net) in session_net {
        match index.position_of(nickname) {
            Some(position) => {
                let result = results_by_record.entry(position).or_default();
                result.net += *net;
                result.up_most |= extremes.is_up_most(nickname);
                result.down_most |= extremes.is_down_most(nickname);
            }
            None => unknown.push(nickname.clone()),
        }
    }

    if !unknown.is_empty() {
        return Ok(MergeOutcome::Rejected { unknown });
    }

    let mut staged = records.to_vec();
    for (position, result) in results_by_record {
        staged[position].apply_session(session_id, result.net, result.up_most, result.down_most);
    }
    Ok(MergeOutcome::Committed { records: staged })
}

/// One player's share of a session, summed over every alias they played under.
#[derive(Debug, Default)]
struct RecordSessionResult {
    net: f64,
    up_most: bool,
    down_most: bool,
}
