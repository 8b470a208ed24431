use crate::ledger::ledger_error::LedgerError;
use crate::ledger::player_record::PlayerStatsRecord;

use std::collections::HashMap;

/// Lookup from every nickname in the store to the position of the record that owns it.
#[derive(Debug)]
pub struct NicknameIndex {
    positions: HashMap<String, usize>,
}

impl NicknameIndex {
    /// Builds the index over the records in store order.
    ///
    /// # Returns
    ///
    /// The index, or `LedgerError::DuplicateNickname` if two records share a nickname.
    pub fn build(records: &[PlayerStatsRecord]) -> Result<Self, LedgerError> {
        let mut positions = HashMap::new();
        for (position, record) in records.iter().enumerate() {
            for nickname in &record.nicknames {
                if let Some(owner) = positions.insert(nickname.clone(), position) {
                    if owner != position {
                        return Err(LedgerError::DuplicateNickname(nickname.clone()));
                    }
                }
            }
        }
        Ok(Self { positions })
    }

    pub fn position_of(&self, nickname: &str) -> Option<usize> {
        self.positions.get(nickname).copied()
    }
}
