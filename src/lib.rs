//! Schedule extraction engine for air-traffic-control duty rosters.
//!
//! This crate ingests duty-roster spreadsheets and PDFs and extracts
//! structured night-shift and extra-shift records per worker, date, and
//! operational position. Four document layouts are supported: a whole-year
//! spreadsheet, two monthly spreadsheet layouts, and a linearized-text PDF
//! layout.

#![warn(missing_docs)]

pub mod codes;
pub mod dates;
pub mod error;
pub mod extraction;
pub mod models;

/// Returns the parser version tag stored alongside persisted schedules.
///
/// Callers persist this next to extracted payloads so stored data can be
/// re-parsed when the extraction rules change.
///
/// # Example
///
/// ```
/// assert_eq!(roster_engine::parser_version(), "1.0.0");
/// ```
pub fn parser_version() -> &'static str {
    "1.0.0"
}
