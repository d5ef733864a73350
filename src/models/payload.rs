//! Aggregate parse output.

use serde::{Deserialize, Serialize};

use super::{ExtraShift, MonthBase, NightShift};

/// The full result of parsing one roster document.
///
/// Returned by value; the engine keeps no reference to it. Persisting the
/// payload is the upload handler's responsibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePayload {
    /// Deduplicated night-shift groups, one per (position, date).
    pub night_shifts: Vec<NightShift>,
    /// Flat list of extra-shift observations, not deduplicated.
    pub extra_shifts: Vec<ExtraShift>,
}

impl SchedulePayload {
    /// Returns the "YYYY-MM" month this payload belongs to.
    ///
    /// Taken from the first night shift, else the first extra shift, else
    /// the fallback base's label, else an empty string. Used by upload
    /// handling to bucket results by (position, month).
    ///
    /// # Example
    ///
    /// ```
    /// use roster_engine::models::{MonthBase, SchedulePayload};
    ///
    /// let empty = SchedulePayload::default();
    /// let base = MonthBase { month: 3, year: 2025 };
    /// assert_eq!(empty.compute_month(Some(&base)), "2025-03");
    /// assert_eq!(empty.compute_month(None), "");
    /// ```
    pub fn compute_month(&self, fallback: Option<&MonthBase>) -> String {
        if let Some(shift) = self.night_shifts.first() {
            return shift.date.format("%Y-%m").to_string();
        }
        if let Some(extra) = self.extra_shifts.first() {
            return extra.date.format("%Y-%m").to_string();
        }
        fallback.map(MonthBase::label).unwrap_or_default()
    }
}
