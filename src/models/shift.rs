//! Night-shift and extra-shift output records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Position;

/// A night duty on one position and date, with everyone who worked it.
///
/// There is at most one `NightShift` per (position, date) pair; all workers
/// observed with a night code on that position and date are merged into its
/// worker list with no duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightShift {
    /// Deterministic identity, `"{position}-{date}"`.
    pub id: String,
    /// The calendar date of the shift.
    pub date: NaiveDate,
    /// The position the shift was worked on.
    pub position: Position,
    /// Workers on the shift. Order is not significant; names are unique.
    pub workers: Vec<String>,
    /// Identifier of the document the shift was extracted from.
    pub source: String,
}

impl NightShift {
    /// Builds a night shift with its derived `position-date` identity.
    pub fn new(position: Position, date: NaiveDate, workers: Vec<String>, source: &str) -> Self {
        NightShift {
            id: format!("{position}-{date}"),
            date,
            position,
            workers,
            source: source.to_string(),
        }
    }
}

/// A single observation of a non-night special duty.
///
/// Not deduplicated: one record per (worker, date, code) observation.
/// Repeats across a run are legitimate, e.g. multi-day codes split into
/// daily entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraShift {
    /// The worker's name as it appears in the roster.
    pub name: String,
    /// The calendar date of the duty.
    pub date: NaiveDate,
    /// The classified duty code.
    pub code: String,
    /// The position the document belongs to.
    pub position: Position,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_night_shift_id_combines_position_and_date() {
        let shift = NightShift::new(
            Position::Twr,
            make_date("2025-01-04"),
            vec!["Иванов".to_string()],
            "grafik_0125.xlsx",
        );
        assert_eq!(shift.id, "TWR-2025-01-04");
    }

    #[test]
    fn test_night_shift_serialization_roundtrip() {
        let shift = NightShift::new(
            Position::App,
            make_date("2025-02-10"),
            vec!["Петров".to_string(), "Георгиев".to_string()],
            "grafik_0225.pdf",
        );
        let json = serde_json::to_string(&shift).unwrap();
        let back: NightShift = serde_json::from_str(&json).unwrap();
        assert_eq!(shift, back);
    }

    #[test]
    fn test_extra_shift_serialization_roundtrip() {
        let extra = ExtraShift {
            name: "Иванов".to_string(),
            date: make_date("2025-01-15"),
            code: "Д09".to_string(),
            position: Position::Twr,
        };
        let json = serde_json::to_string(&extra).unwrap();
        let back: ExtraShift = serde_json::from_str(&json).unwrap();
        assert_eq!(extra, back);
    }
}
