//! Operational position (role-area) model.

use serde::{Deserialize, Serialize};

/// Location-name substring identifying the tower position.
const TOWER_MARKER: &str = "РМ Кула";

/// Location-name substring identifying the approach position.
const APPROACH_MARKER: &str = "РМ Подход";

/// An operational role-area a schedule belongs to.
///
/// Identifies where the duty is worked, not an employee. Every document
/// resolves to exactly one position (except the whole-year layout, which
/// covers both in separate row blocks).
///
/// # Example
///
/// ```
/// use roster_engine::models::Position;
///
/// assert_eq!(Position::Twr.to_string(), "TWR");
/// assert_eq!(Position::detect("График РМ Кула за месеца"), Some(Position::Twr));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    /// Tower.
    Twr,
    /// Approach.
    App,
}

impl Position {
    /// Scans a text fragment for one of the two known location markers.
    ///
    /// Whitespace runs are collapsed before matching, since both markers
    /// contain an internal space that spreadsheet cells and PDF text tend
    /// to mangle. Returns `None` when neither marker appears; callers treat
    /// that as a fatal parse error for anchors that must hold a position.
    pub fn detect(text: &str) -> Option<Position> {
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if normalized.contains(TOWER_MARKER) {
            return Some(Position::Twr);
        }
        if normalized.contains(APPROACH_MARKER) {
            return Some(Position::App);
        }
        None
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Twr => write!(f, "TWR"),
            Position::App => write!(f, "APP"),
        }
    }
}
