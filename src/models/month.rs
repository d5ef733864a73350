//! Month/year base resolution.
//!
//! A [`MonthBase`] anchors relative day numbers (1-31) to absolute calendar
//! dates. It is derived once per document, either from the filename or from
//! in-document text, and never mutated afterward.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Month names as they appear in roster documents, with their month numbers.
const MONTH_NAMES: [(&str, u32); 12] = [
    ("Януари", 1),
    ("Февруари", 2),
    ("Март", 3),
    ("Април", 4),
    ("Май", 5),
    ("Юни", 6),
    ("Юли", 7),
    ("Август", 8),
    ("Септември", 9),
    ("Октомври", 10),
    ("Ноември", 11),
    ("Декември", 12),
];

/// Filenames carry the roster month as `_MMYY`, e.g. `ROSTER_0125_v2.xlsx`.
static FILENAME_MMYY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_(\d{4})").expect("filename month pattern"));

/// Month name followed by a 4-digit year, e.g. "Януари 2025".
static MONTH_YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    let names: Vec<&str> = MONTH_NAMES.iter().map(|(name, _)| *name).collect();
    Regex::new(&format!(r"(?i)({})\s+(\d{{4}})", names.join("|"))).expect("month/year pattern")
});

/// The month/year anchor used to resolve relative day numbers.
///
/// # Example
///
/// ```
/// use roster_engine::models::MonthBase;
///
/// let base = MonthBase::from_filename("ROSTER_0125_v2.xlsx").unwrap();
/// assert_eq!(base.month, 1);
/// assert_eq!(base.year, 2025);
/// assert_eq!(base.days_in_month(), 31);
/// assert_eq!(base.label(), "2025-01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBase {
    /// Calendar month, 1-12.
    pub month: u32,
    /// 4-digit calendar year.
    pub year: i32,
}

impl MonthBase {
    /// Infers the month/year from a `_MMYY` digit run in the filename.
    ///
    /// The first two digits are the month (rejected unless 1-12) and the
    /// remaining two the year, interpreted as 19xx when ≥ 70 and 20xx
    /// otherwise.
    pub fn from_filename(filename: &str) -> Option<MonthBase> {
        let caps = FILENAME_MMYY_RE.captures(filename)?;
        let digits = caps.get(1)?.as_str();
        let month: u32 = digits[..2].parse().ok()?;
        let yy: i32 = digits[2..].parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        let year = if yy >= 70 { 1900 + yy } else { 2000 + yy };
        Some(MonthBase { month, year })
    }

    /// Searches document text for a month name followed by a 4-digit year.
    pub fn from_text(text: &str) -> Option<MonthBase> {
        let caps = MONTH_YEAR_RE.captures(text)?;
        let name = caps.get(1)?.as_str().to_lowercase();
        let month = MONTH_NAMES
            .iter()
            .find(|(candidate, _)| candidate.to_lowercase() == name)
            .map(|(_, number)| *number)?;
        let year: i32 = caps.get(2)?.as_str().parse().ok()?;
        if year == 0 {
            return None;
        }
        Some(MonthBase { month, year })
    }

    /// Returns the number of days in the anchored month.
    pub fn days_in_month(&self) -> u32 {
        match self.month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if is_leap_year(self.year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    /// Formats the base as a "YYYY-MM" month key.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
