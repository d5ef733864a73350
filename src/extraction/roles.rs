//! Role/eligibility filtering for worker rows.

use crate::models::Position;

/// Qualified for both radar and tower duty supervision.
const RADAR_AND_TOWER_QUALIFIED: &str = "РП-радарен и ЛКК";

/// Radio-qualified duty supervision.
const RADIO_QUALIFIED: &str = "РП-РС";

/// Tower-only duty supervision.
const TOWER_QUALIFIED: &str = "РП-ЛКК";

/// Radar-only duty supervision.
const RADAR_QUALIFIED: &str = "РП-радарен";

/// Decides whether a worker row is eligible for extraction under a position.
///
/// An empty role cell records no restriction and is always allowed. A
/// dual-qualified or radio-qualified role is allowed for any position;
/// tower-qualified only for TWR; radar-qualified only for APP. Any other
/// role text excludes the row entirely.
///
/// # Example
///
/// ```
/// use roster_engine::extraction::allowed_for_role;
/// use roster_engine::models::Position;
///
/// assert!(allowed_for_role("РП-ЛКК", Position::Twr));
/// assert!(!allowed_for_role("РП-ЛКК", Position::App));
/// assert!(allowed_for_role("", Position::App));
/// ```
pub fn allowed_for_role(role: &str, position: Position) -> bool {
    let val = role.trim();
    if val.is_empty() {
        return true;
    }
    if val.contains(RADAR_AND_TOWER_QUALIFIED) || val.contains(RADIO_QUALIFIED) {
        return true;
    }
    if position == Position::Twr && val.contains(TOWER_QUALIFIED) {
        return true;
    }
    if position == Position::App && val.contains(RADAR_QUALIFIED) {
        return true;
    }
    false
}
