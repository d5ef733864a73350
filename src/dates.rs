//! Date resolution for roster cells.
//!
//! Converts day-of-month numbers, spreadsheet date serials, and free-text
//! date strings into absolute calendar dates against a [`MonthBase`].

use calamine::Data;
use chrono::{Days, NaiveDate};

use crate::models::MonthBase;

/// Values above this threshold are treated as spreadsheet date serials
/// rather than day-of-month numbers.
const DATE_SERIAL_THRESHOLD: f64 = 1000.0;

/// Free-text date formats tried in order when a header cell holds a string
/// that is not a plain day number.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y", "%m/%d/%Y"];

/// Resolves a 1-31 day number to a calendar date against the base month.
///
/// Day numbers past the end of the month roll over into the next month
/// (day 31 in a 30-day month becomes the 1st of the following month).
/// The rollover is an accepted quirk of the source templates, not
/// corrected. Returns `None` only for a base with an invalid month.
///
/// # Example
///
/// ```
/// use roster_engine::dates::day_to_iso;
/// use roster_engine::models::MonthBase;
/// use chrono::NaiveDate;
///
/// let base = MonthBase { month: 4, year: 2025 };
/// assert_eq!(day_to_iso(&base, 15), NaiveDate::from_ymd_opt(2025, 4, 15));
/// assert_eq!(day_to_iso(&base, 31), NaiveDate::from_ymd_opt(2025, 5, 1));
/// ```
pub fn day_to_iso(base: &MonthBase, day: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(base.year, base.month, 1)?;
    first.checked_add_days(Days::new(u64::from(day.saturating_sub(1))))
}

/// Decodes a spreadsheet date serial into a calendar date.
///
/// Serial 1 is 1900-01-01. Serials above 59 are shifted down one day to
/// compensate for the spreadsheet epoch's fictitious 1900-02-29.
pub fn date_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let days = serial as i64;
    let adjusted = if days > 59 { days - 1 } else { days };
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 31)?;
    epoch.checked_add_days(Days::new(adjusted.try_into().ok()?))
}

/// Resolves a day-number header cell (numeric or numeric string, 1-31)
/// against the base month. Anything else, or a missing base, yields `None`.
pub fn resolve_day_number(cell: &Data, base: Option<&MonthBase>) -> Option<NaiveDate> {
    let base = base?;
    let day = match cell {
        Data::Int(i) => u32::try_from(*i).ok()?,
        Data::Float(f) if f.fract() == 0.0 && *f >= 0.0 => *f as u32,
        Data::String(s) => s.trim().parse::<u32>().ok()?,
        _ => return None,
    };
    if !(1..=31).contains(&day) {
        return None;
    }
    day_to_iso(base, day)
}

/// Resolves a header cell of any supported date encoding.
///
/// Handles, in order: numeric date serials (above the 1000 threshold),
/// day-of-month numbers against the base, typed datetime cells, and
/// free-text date strings in the known formats.
pub fn resolve_cell_date(cell: &Data, base: Option<&MonthBase>) -> Option<NaiveDate> {
    match cell {
        Data::Int(i) if (*i as f64) > DATE_SERIAL_THRESHOLD => date_serial_to_date(*i as f64),
        Data::Float(f) if *f > DATE_SERIAL_THRESHOLD => date_serial_to_date(*f),
        Data::Int(_) | Data::Float(_) => resolve_day_number(cell, base),
        Data::DateTime(dt) => date_serial_to_date(dt.as_f64()),
        Data::DateTimeIso(s) => parse_date_text(s),
        Data::String(s) => {
            resolve_day_number(cell, base).or_else(|| parse_date_text(s.trim()))
        }
        _ => None,
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    // An ISO datetime still resolves through its date part
    let date_part = text.split(|c| c == 'T' || c == ' ').next().unwrap_or(text);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}
