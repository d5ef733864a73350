//! Cell addressing helpers over a calamine worksheet range.

use calamine::{Data, Range};

/// Converts column letters to a 0-based column index ("A" → 0, "BD" → 55).
pub fn col_index(letters: &str) -> u32 {
    letters
        .chars()
        .filter(char::is_ascii_uppercase)
        .fold(0u32, |acc, c| acc * 26 + (c as u32 - 'A' as u32 + 1))
        .saturating_sub(1)
}

/// Reads a cell by A1-style address parts (column letters, 1-based row).
pub fn cell<'a>(sheet: &'a Range<Data>, letters: &str, row: u32) -> Option<&'a Data> {
    value(sheet, row.checked_sub(1)?, col_index(letters))
}

/// Reads a cell by 0-based (row, column) coordinates.
pub fn value(sheet: &Range<Data>, row: u32, col: u32) -> Option<&Data> {
    sheet.get_value((row, col))
}

/// Returns the trimmed contents of a string cell, or `None` for any other
/// cell type. Roster names, roles, and shift codes are only ever read from
/// string cells; numeric cells in those slots are template artifacts.
pub fn string_value<'a>(sheet: &'a Range<Data>, row: u32, col: u32) -> Option<&'a str> {
    match value(sheet, row, col)? {
        Data::String(s) => Some(s.trim()),
        _ => None,
    }
}

/// The last occupied 0-based column of the sheet's used range.
pub fn end_col(sheet: &Range<Data>) -> Option<u32> {
    sheet.end().map(|(_, col)| col)
}

/// The last occupied 0-based row of the sheet's used range.
pub fn end_row(sheet: &Range<Data>) -> Option<u32> {
    sheet.end().map(|(row, _)| row)
}
