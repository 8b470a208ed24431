use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Period key written into `net_dictionary` when the statistics are reset.
pub const RESET_PERIOD_KEY: &str = "01_01";

/// Number of leading characters of a session id used as its `net_dictionary` key.
const PERIOD_KEY_LEN: usize = 5;

/// Keys owned by `PlayerStatsRecord`. Anything else in a stored record lands in `extra_fields`.
pub const RECORD_FIELDS: [&str; 13] = [
    "player_nicknames",
    "net",
    "games_played",
    "biggest_win",
    "biggest_loss",
    "highest_net",
    "lowest_net",
    "net_dictionary",
    "games_up_most",
    "games_down_most",
    "games_up",
    "games_down",
    "average_net",
];

/// Cumulative statistics of one player of the game group.
///
/// # Fields
///
/// * `nicknames` - Every alias the player has used in a session ledger.
/// * `net` - Cumulative winnings, in dollars.
/// * `games_played` - Ids of the sessions merged into this record, in merge order.
/// * `biggest_win`, `biggest_loss` - Best and worst single session net. Both start at 0.
/// * `highest_net`, `lowest_net` - Running extremes of the cumulative `net`.
/// * `net_dictionary` - Cumulative `net` after the last session of each period key.
/// * `games_up_most`, `games_down_most` - Sessions where the player was (tied) biggest winner or loser.
/// * `games_up`, `games_down` - Sessions with a positive or negative net.
/// * `average_net` - `net` divided by the number of games played.
/// * `extra_fields` - Keys this crate does not interpret, kept verbatim on round-trip.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PlayerStatsRecord {
    #[serde(rename = "player_nicknames")]
    pub nicknames: Vec<String>,
    pub net: f64,
    pub games_played: Vec<String>,
    pub biggest_win: f64,
    pub biggest_loss: f64,
    pub highest_net: f64,
    pub lowest_net: f64,
    pub net_dictionary: BTreeMap<String, f64>,
    pub games_up_most: u32,
    pub games_down_most: u32,
    pub games_up: u32,
    pub games_down: u32,
    pub average_net: f64,
    #[serde(flatten)]
    pub extra_fields: Map<String, Value>,
}

impl PlayerStatsRecord {
    /// Creates a zeroed record for a player known by the given nicknames.
    pub fn new<I, S>(nicknames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut record = Self {
            nicknames: nicknames.into_iter().map(Into::into).collect(),
            ..Self::default()
        };
        record.reset_statistics();
        record
    }

    /// Folds the result of one session into the record.
    ///
    /// # Arguments
    ///
    /// * `session_id` - Id of the session being merged.
    /// * `session_net` - The player's net for that session, in dollars.
    /// * `up_most` - Whether the player is among the session's biggest winners.
    /// * `down_most` - Whether the player is among the session's biggest losers.
    pub fn apply_session(
        &mut self,
        session_id: &str,
        session_net: f64,
        up_most: bool,
        down_most: bool,
    ) {
        self.net += session_net;
        self.games_played.push(session_id.to_owned());

        self.biggest_win = self.biggest_win.max(session_net);
        self.biggest_loss = self.biggest_loss.min(session_net);
        self.highest_net = self.highest_net.max(self.net);
        self.lowest_net = self.lowest_net.min(self.net);

        self.net_dictionary
            .insert(period_key(session_id).to_owned(), self.net);
        self.average_net = self.net / self.games_played.len() as f64;

        if up_most {
            self.games_up_most += 1;
        }
        if down_most {
            self.games_down_most += 1;
        }
        if session_net > 0.0 {
            self.games_up += 1;
        }
        if session_net < 0.0 {
            self.games_down += 1;
        }
    }

    /// Zeroes every statistic, keeping nicknames and extra fields.
    pub fn reset_statistics(&mut self) {
        self.net = 0.0;
        self.games_played.clear();
        self.biggest_win = 0.0;
        self.biggest_loss = 0.0;
        self.highest_net = 0.0;
        self.lowest_net = 0.0;
        self.net_dictionary = BTreeMap::from([(RESET_PERIOD_KEY.to_owned(), 0.0)]);
        self.games_up_most = 0;
        self.games_down_most = 0;
        self.games_up = 0;
        self.games_down = 0;
        self.average_net = 0.0;
    }

    /// Sorts the played sessions lexicographically.
    ///
    /// Ids are compared as strings, so the order is only chronological when
    /// every id uses the same zero-padded layout.
    pub fn sort_games_played(&mut self) {
        self.games_played.sort();
    }
}

/// Returns the first characters of a session id, used to bucket `net_dictionary`.
fn period_key(session_id: &str) -> &str {
    match session_id.char_indices().nth(PERIOD_KEY_LEN) {
        Some((end, _)) => &session_id[..end],
        None => session_id,
    }
}
