//! Extractor for the whole-year spreadsheet layout.
//!
//! One sheet named "ALL <year>" carries every day of the year as a column.
//! Worker rows are split into two fixed position blocks; there is no role
//! column in this layout.

use calamine::{Data, Range};

use super::sheet;
use super::Observation;
use crate::dates;
use crate::models::{MonthBase, Position};

/// Worker names live in column B.
const NAME_COLUMN: &str = "B";

/// First day column (January 1st).
const FIRST_DAY_COLUMN: &str = "D";

/// Last day column (December 31st).
const LAST_DAY_COLUMN: &str = "ND";

/// First and last worker rows (1-based, inclusive).
const WORKER_ROWS: (u32, u32) = (7, 36);

/// Rows up to and including this one belong to the tower block; the rest
/// are approach.
const TOWER_BLOCK_LAST_ROW: u32 = 16;

/// Walks the whole-year grid and emits one observation per occupied cell.
///
/// Day columns are interpreted as offsets from January 1st of `year`;
/// offsets past a month's end roll forward naturally, which is what stamps
/// the later columns with their correct dates.
pub fn extract_whole_year(worksheet: &Range<Data>, year: i32) -> Vec<Observation> {
    let base = MonthBase { month: 1, year };
    let first_col = sheet::col_index(FIRST_DAY_COLUMN);
    let last_col = sheet::col_index(LAST_DAY_COLUMN);
    let name_col = sheet::col_index(NAME_COLUMN);

    let mut observations = Vec::new();
    let (first_row, last_row) = WORKER_ROWS;
    for row in first_row..=last_row {
        let Some(name) = sheet::string_value(worksheet, row - 1, name_col) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        let position = if row <= TOWER_BLOCK_LAST_ROW {
            Position::Twr
        } else {
            Position::App
        };
        for col in first_col..=last_col {
            let Some(code) = sheet::string_value(worksheet, row - 1, col) else {
                continue;
            };
            if code.is_empty() {
                continue;
            }
            let Some(date) = dates::day_to_iso(&base, 1 + col - first_col) else {
                continue;
            };
            observations.push(Observation {
                position,
                name: name.to_string(),
                date,
                code: code.to_string(),
            });
        }
    }
    observations
}
