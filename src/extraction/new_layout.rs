//! Extractor for the new monthly spreadsheet layout.
//!
//! Differs from the legacy layout in its anchor cell (AF1), its day-number
//! date headers in row 3, and worker rows running every other row from row
//! 5 to the end of the used range.

use calamine::{Data, Range};

use super::layout::NEW_POSITION_ANCHOR;
use super::roles::allowed_for_role;
use super::sheet;
use super::Observation;
use crate::dates;
use crate::error::{ParseError, ParseResult};
use crate::models::{MonthBase, Position};

/// Header row carrying day-number cells (1-based).
const DATE_HEADER_ROW: u32 = 3;

/// First date column; dates continue to the used-range end.
const FIRST_DATE_COLUMN: &str = "K";

/// Worker names live in column C, roles in column H.
const NAME_COLUMN: &str = "C";
const ROLE_COLUMN: &str = "H";

/// First worker row; rows step by 2 to the used-range end.
const FIRST_WORKER_ROW: u32 = 5;
const WORKER_ROW_STRIDE: u32 = 2;

/// Walks the new-layout grid and emits one observation per occupied cell.
///
/// Date headers are plain day numbers resolved against the filename's
/// month base; columns that do not resolve are skipped.
pub fn extract_new_layout(
    worksheet: &Range<Data>,
    filename: &str,
) -> ParseResult<Vec<Observation>> {
    let (anchor_col, anchor_row) = NEW_POSITION_ANCHOR;
    let position = sheet::cell(worksheet, anchor_col, anchor_row)
        .and_then(|data| match data {
            Data::String(s) => Position::detect(s),
            _ => None,
        })
        .ok_or_else(|| ParseError::PositionNotDetected {
            layout: "Excel (new layout)".to_string(),
        })?;

    let base = MonthBase::from_filename(filename);
    let first_col = sheet::col_index(FIRST_DATE_COLUMN);
    let last_col = sheet::end_col(worksheet).unwrap_or(first_col);
    let date_columns: Vec<(u32, chrono::NaiveDate)> = (first_col..=last_col)
        .filter_map(|col| {
            let cell = sheet::value(worksheet, DATE_HEADER_ROW - 1, col)?;
            let date = dates::resolve_day_number(cell, base.as_ref())?;
            Some((col, date))
        })
        .collect();

    let name_col = sheet::col_index(NAME_COLUMN);
    let role_col = sheet::col_index(ROLE_COLUMN);
    let last_row = sheet::end_row(worksheet).unwrap_or(0) + 1;

    let mut observations = Vec::new();
    let mut row = FIRST_WORKER_ROW;
    while row <= last_row {
        let Some(name) = sheet::string_value(worksheet, row - 1, name_col) else {
            row += WORKER_ROW_STRIDE;
            continue;
        };
        if name.is_empty() {
            row += WORKER_ROW_STRIDE;
            continue;
        }
        let role = sheet::string_value(worksheet, row - 1, role_col).unwrap_or("");
        if !allowed_for_role(role, position) {
            tracing::debug!(name, role, "row excluded by role filter");
            row += WORKER_ROW_STRIDE;
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
        row += WORKER_ROW_STRIDE;
    }
    Ok(observations)
}
