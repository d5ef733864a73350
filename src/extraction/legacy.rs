//! Extractor for the legacy monthly spreadsheet layout.

use calamine::{Data, Range};

use super::layout::LEGACY_POSITION_ANCHOR;
use super::roles::allowed_for_role;
use super::sheet;
use super::Observation;
use crate::dates;
use crate::error::{ParseError, ParseResult};
use crate::models::{MonthBase, Position};

/// Header row carrying the date cells (1-based).
const DATE_HEADER_ROW: u32 = 11;

/// First date column; dates continue to the used-range end.
const FIRST_DATE_COLUMN: &str = "P";

/// Worker names live in column H, roles in column M.
const NAME_COLUMN: &str = "H";
const ROLE_COLUMN: &str = "M";

/// Worker row blocks as (first 1-based row, row count); rows step by 2
/// because every data row is followed by an hours row.
const WORKER_ROW_BLOCKS: &[(u32, u32)] = &[(13, 22), (63, 30)];
const WORKER_ROW_STRIDE: u32 = 2;

/// Walks the legacy grid and emits one observation per occupied shift cell.
///
/// The position comes from the BD3 anchor; header dates may be day numbers
/// against the filename's month base, spreadsheet date serials, or
/// free-text dates. Columns whose header does not resolve are skipped.
pub fn extract_legacy(worksheet: &Range<Data>, filename: &str) -> ParseResult<Vec<Observation>> {
    let (anchor_col, anchor_row) = LEGACY_POSITION_ANCHOR;
    let position = sheet::cell(worksheet, anchor_col, anchor_row)
        .and_then(|data| match data {
            Data::String(s) => Position::detect(s),
            _ => None,
        })
        .ok_or_else(|| ParseError::PositionNotDetected {
            layout: "Excel".to_string(),
        })?;

    let base = MonthBase::from_filename(filename);
    let date_columns = resolve_date_columns(worksheet, base.as_ref());

    let name_col = sheet::col_index(NAME_COLUMN);
    let role_col = sheet::col_index(ROLE_COLUMN);

    let mut observations = Vec::new();
    for &(first_row, count) in WORKER_ROW_BLOCKS {
        for step in 0..count {
            let row = first_row + step * WORKER_ROW_STRIDE;
            let Some(name) = sheet::string_value(worksheet, row - 1, name_col) else {
                continue;
            };
            if name.is_empty() {
                continue;
            }
            let role = sheet::string_value(worksheet, row - 1, role_col).unwrap_or("");
            if !allowed_for_role(role, position) {
                tracing::debug!(name, role, "row excluded by role filter");
                continue;
            }
            for &(col, date) in &date_columns {
                let Some(code) = sheet::string_value(worksheet, row - 1, col) else {
                    continue;
                };
                if code.is_empty() {
                    continue;
                }
                observations.push(Observation {
                    position,
                    name: name.to_string(),
                    date,
                    code: code.to_string(),
                });
            }
        }
    }
    Ok(observations)
}

/// Resolves the header date for every column from P to the used-range end.
fn resolve_date_columns(
    worksheet: &Range<Data>,
    base: Option<&MonthBase>,
) -> Vec<(u32, chrono::NaiveDate)> {
    let first_col = sheet::col_index(FIRST_DATE_COLUMN);
    let last_col = sheet::end_col(worksheet).unwrap_or(first_col);
    (first_col..=last_col)
        .filter_map(|col| {
            let cell = sheet::value(worksheet, DATE_HEADER_ROW - 1, col)?;
            let date = dates::resolve_cell_date(cell, base)?;
            Some((col, date))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_sheet() -> Range<Data> {
        Range::new((0, 0), (130, 60))
    }

    fn set(range: &mut Range<Data>, letters: &str, row: u32, value: Data) {
        range.set_value((row - 1, sheet::col_index(letters)), value);
    }

    fn anchored_sheet(position_text: &str) -> Range<Data> {
        let mut ws = make_sheet();
        set(&mut ws, "BD", 3, Data::String(position_text.to_string()));
        ws
    }

    #[test]
    fn test_missing_position_anchor_is_fatal() {
        let ws = make_sheet();
        let err = extract_legacy(&ws, "grafik_0125.xlsx").unwrap_err();
        assert_eq!(err.to_string(), "Position not detected in Excel");
    }

    /// A night code in one date column for one worker under a "РМ Кула"
    /// anchor yields a single TWR observation on that date.
    #[test]
    fn test_single_night_cell() {
        let mut ws = anchored_sheet("РМ Кула");
        set(&mut ws, "P", DATE_HEADER_ROW, Data::Int(4));
        set(&mut ws, "H", 13, Data::String("Иванов".to_string()));
        set(&mut ws, "P", 13, Data::String("Н".to_string()));

        let obs = extract_legacy(&ws, "grafik_0125.xlsx").unwrap();
        assert_eq!(obs.len(), 1);
        assert_eq!(obs[0].position, Position::Twr);
        assert_eq!(obs[0].name, "Иванов");
        assert_eq!(obs[0].date, NaiveDate::from_ymd_opt(2025, 1, 4).unwrap());
        assert_eq!(obs[0].code, "Н");
    }

    #[test]
    fn test_date_serial_headers_resolve_without_filename_base() {
        let mut ws = anchored_sheet("РМ Подход");
        // 45658 = 2025-01-01
        set(&mut ws, "P", DATE_HEADER_ROW, Data::Float(45658.0));
        set(&mut ws, "H", 13, Data::String("Петров".to_string()));
        set(&mut ws, "P", 13, Data::String("СД".to_string()));

        let obs = extract_legacy(&ws, "grafik.xlsx").unwrap();
        assert_eq!(obs.len(), 1);
        assert_eq!(obs[0].date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn test_role_filter_excludes_row() {
        let mut ws = anchored_sheet("РМ Подход");
        set(&mut ws, "P", DATE_HEADER_ROW, Data::Int(4));
        set(&mut ws, "H", 13, Data::String("Иванов".to_string()));
        set(&mut ws, "M", 13, Data::String("РП-ЛКК".to_string()));
        set(&mut ws, "P", 13, Data::String("Н".to_string()));

        let obs = extract_legacy(&ws, "grafik_0125.xlsx").unwrap();
        assert!(obs.is_empty());
    }

    #[test]
    fn test_second_worker_block_rows() {
        let mut ws = anchored_sheet("РМ Кула");
        set(&mut ws, "P", DATE_HEADER_ROW, Data::Int(10));
        set(&mut ws, "H", 63, Data::String("Георгиев".to_string()));
        set(&mut ws, "P", 63, Data::String("Н-2".to_string()));
        // Odd rows between workers are hours rows and are never read
        set(&mut ws, "H", 64, Data::String("Не работник".to_string()));
        set(&mut ws, "P", 64, Data::String("Н".to_string()));

        let obs = extract_legacy(&ws, "grafik_0125.xlsx").unwrap();
        assert_eq!(obs.len(), 1);
        assert_eq!(obs[0].name, "Георгиев");
    }

    #[test]
    fn test_columns_without_resolvable_header_are_skipped() {
        let mut ws = anchored_sheet("РМ Кула");
        // No month base in the filename and a day-number header: unresolvable
        set(&mut ws, "P", DATE_HEADER_ROW, Data::Int(4));
        set(&mut ws, "H", 13, Data::String("Иванов".to_string()));
        set(&mut ws, "P", 13, Data::String("Н".to_string()));

        let obs = extract_legacy(&ws, "grafik.xlsx").unwrap();
        assert!(obs.is_empty());
    }
}
