pub mod session_report;
