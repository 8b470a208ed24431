pub mod ledger_error;
pub mod ledger_store;
pub mod nickname_index;
pub mod player_record;
pub mod stats_merger;
