pub mod extreme_finder;
pub mod nickname_scan;
pub mod session_aggregator;
pub mod session_row;
pub mod session_source;
