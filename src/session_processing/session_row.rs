use serde::Deserialize;

/// One row of a session ledger CSV. Columns other than these two are ignored.
///
/// # Fields
///
/// * `player_nickname` - Nickname the player used at the table.
/// * `net` - Net result of the row, in cents.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SessionRow {
    pub player_nickname: String,
    pub net: i64,
}

impl SessionRow {
    pub fn new(player_nickname: &str, net: i64) -> Self {
        Self {
            player_nickname: player_nickname.to_owned(),
            net,
        }
    }
}

/// The rows of one session ledger together with the session id taken from its file name.
#[derive(Debug, Clone)]
pub struct SessionData {
    pub session_id: String,
    pub rows: Vec<SessionRow>,
}
