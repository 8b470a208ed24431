use std::path::PathBuf;
use thiserror::Error;

/// Errors that may occur while reading sessions or reading and writing the ledger store.
///
/// # Variants
///
/// * `StoreNotFound`, `LedgerDirNotFound`, `SessionFileNotFound` - A referenced resource does not exist.
/// * `NotCsv`, `MissingSessionId` - A session file reference has the wrong shape.
/// * `DuplicateNickname` - Two records claim the same nickname.
/// * `NetOverflow` - A player's summed cents do not fit in an `i64`.
/// * `ReservedField` - A field name that the record type already owns.
/// * `Csv`, `Json`, `Io` - Failures bubbled up from the underlying readers and writers.
/// * `ThreadPool` - The nickname scan could not start its thread pool.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("the specified store path does not exist: {}", .0.display())]
    StoreNotFound(PathBuf),
    #[error("the specified ledger folder does not exist: {}", .0.display())]
    LedgerDirNotFound(PathBuf),
    #[error("the specified ledger path does not exist: {}", .0.display())]
    SessionFileNotFound(PathBuf),
    #[error("game ledger file must be a CSV file: {}", .0.display())]
    NotCsv(PathBuf),
    #[error("unable to extract session id from ledger file name: {}", .0.display())]
    MissingSessionId(PathBuf),
    #[error("nickname `{0}` belongs to more than one player")]
    DuplicateNickname(String),
    #[error("net of `{0}` overflows the session total")]
    NetOverflow(String),
    #[error("field `{0}` is already part of every player record")]
    ReservedField(String),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("error creating thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
