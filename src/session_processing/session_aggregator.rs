use crate::ledger::ledger_error::LedgerError;
use crate::session_processing::session_row::SessionRow;

use std::collections::{BTreeMap, HashSet};

/// Net winnings of one session, in dollars, keyed by nickname in sorted order.
pub type SessionNet = BTreeMap<String, f64>;

const CENTS_PER_DOLLAR: f64 = 100.0;

/// Calculates the net winnings of each player in a session.
///
/// Rows sharing a nickname are summed in cents before being scaled to dollars, so
/// the result does not depend on the row order. Nicknames are compared exactly.
///
/// # Arguments
///
/// * `rows` - The rows of one session ledger.
/// * `excluded` - Nicknames to leave out of the result.
///
/// # Returns
///
/// A `SessionNet` mapping each remaining nickname to its net winnings, or
/// `LedgerError::NetOverflow` if a player's cents do not fit in an `i64`.
pub fn calculate_net_winnings(
    rows: &[SessionRow],
    excluded: &HashSet<String>,
) -> Result<SessionNet, LedgerError> {
    Ok(sum_cents_by_player(rows)?
        .into_iter()
        .filter(|(nickname, _)| !excluded.contains(nickname))
        .map(|(nickname, cents)| (nickname, cents as f64 / CENTS_PER_DOLLAR))
        .collect())
}

/// Groups the rows by nickname, summing their nets in cents.
fn sum_cents_by_player(rows: &[SessionRow]) -> Result<BTreeMap<String, i64>, LedgerError> {
    let mut cents_by_player: BTreeMap<String, i64> = BTreeMap::new();
    for row in rows {
        let cents = cents_by_player
            .entry(row.player_nickname.clone())
            .or_insert(0);
        *cents = cents
            .checked_add(row.net)
            .ok_or_else(|| LedgerError::NetOverflow(row.player_nickname.clone()))?;
    }
    Ok(cents_by_player)
}
