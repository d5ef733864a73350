//! Document layout detection.
//!
//! Four extraction strategies exist; detection is ordered and the first
//! match wins: a whole-year sheet, the legacy monthly spreadsheet, the new
//! monthly spreadsheet, and the PDF text layout.

use calamine::{Data, Range};
use once_cell::sync::Lazy;
use regex::Regex;

use super::sheet;

/// Filename extensions read as spreadsheets.
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xls", "xlsx", "xlsm"];

/// Filename extension read as PDF.
pub const PDF_EXTENSION: &str = "pdf";

/// Anchor cell holding the position string in the legacy layout.
pub const LEGACY_POSITION_ANCHOR: (&str, u32) = ("BD", 3);

/// Anchor cell holding the position string in the new layout.
pub const NEW_POSITION_ANCHOR: (&str, u32) = ("AF", 1);

/// A whole-year sheet is named "ALL <year>" (case/whitespace-insensitive).
static WHOLE_YEAR_SHEET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ALL\s+(\d{4})$").expect("whole-year sheet pattern"));

/// The three spreadsheet extraction strategies. The PDF strategy is
/// decided from the filename alone, before a workbook exists, via
/// [`DocumentKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutKind {
    /// Spreadsheet with an "ALL <year>" sheet covering the whole year.
    WholeYear {
        /// Name of the matching sheet, as spelled in the workbook.
        sheet: String,
        /// The year the sheet name carries.
        year: i32,
    },
    /// Legacy monthly spreadsheet layout (position anchor in BD3).
    Legacy,
    /// New monthly spreadsheet layout (position anchor in AF1).
    New,
}

/// The coarse document family derived from the filename extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// An .xls/.xlsx/.xlsm workbook.
    Spreadsheet,
    /// A .pdf document.
    Pdf,
}

/// Classifies a filename by extension, or `None` for unsupported formats.
pub fn document_kind(filename: &str) -> Option<DocumentKind> {
    let ext = filename.rsplit('.').next()?.to_lowercase();
    if SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) {
        return Some(DocumentKind::Spreadsheet);
    }
    if ext == PDF_EXTENSION {
        return Some(DocumentKind::Pdf);
    }
    None
}

/// Finds a whole-year sheet among the workbook's sheet names.
///
/// Returns the matching sheet name together with the year it names.
pub fn whole_year_sheet(sheet_names: &[String]) -> Option<(String, i32)> {
    sheet_names.iter().find_map(|name| {
        let upper = name.trim().to_uppercase();
        let caps = WHOLE_YEAR_SHEET_RE.captures(&upper)?;
        let year: i32 = caps.get(1)?.as_str().parse().ok()?;
        Some((name.clone(), year))
    })
}

/// Picks the extraction strategy for an opened workbook.
///
/// A whole-year sheet wins over the monthly layouts. Otherwise the legacy
/// layout keeps its position string in anchor cell BD3; when that cell is
/// empty the sheet is the new layout (anchor AF1).
pub fn detect_spreadsheet_layout(
    sheet_names: &[String],
    first_sheet: &Range<Data>,
) -> LayoutKind {
    if let Some((sheet, year)) = whole_year_sheet(sheet_names) {
        return LayoutKind::WholeYear { sheet, year };
    }
    let (letters, row) = LEGACY_POSITION_ANCHOR;
    match sheet::cell(first_sheet, letters, row) {
        Some(Data::String(s)) if !s.is_empty() => LayoutKind::Legacy,
        _ => LayoutKind::New,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_kind_by_extension() {
        assert_eq!(document_kind("a.xlsx"), Some(DocumentKind::Spreadsheet));
        assert_eq!(document_kind("a.XLS"), Some(DocumentKind::Spreadsheet));
        assert_eq!(document_kind("b.xlsm"), Some(DocumentKind::Spreadsheet));
        assert_eq!(document_kind("c.pdf"), Some(DocumentKind::Pdf));
        assert_eq!(document_kind("c.PDF"), Some(DocumentKind::Pdf));
        assert_eq!(document_kind("d.docx"), None);
        assert_eq!(document_kind("no_extension"), None);
    }

    #[test]
    fn test_whole_year_sheet_matches_trimmed_case_insensitive() {
        let names = vec!["Sheet1".to_string(), " all 2026 ".to_string()];
        assert_eq!(
            whole_year_sheet(&names),
            Some((" all 2026 ".to_string(), 2026))
        );
    }

    #[test]
    fn test_whole_year_sheet_requires_year() {
        let names = vec!["ALL".to_string(), "ALL YEARS".to_string()];
        assert_eq!(whole_year_sheet(&names), None);
    }

    #[test]
    fn test_detect_spreadsheet_layout_by_anchor() {
        let names = vec!["Sheet1".to_string()];
        let mut legacy = Range::new((0, 0), (10, 60));
        legacy.set_value((2, 55), Data::String("РМ Кула".to_string()));
        assert_eq!(
            detect_spreadsheet_layout(&names, &legacy),
            LayoutKind::Legacy
        );

        let new = Range::new((0, 0), (10, 60));
        assert_eq!(detect_spreadsheet_layout(&names, &new), LayoutKind::New);
    }

    #[test]
    fn test_detect_whole_year_wins_over_anchor() {
        // Even with a populated BD3 anchor the whole-year sheet takes
        // precedence, and the variant carries the sheet name and year
        let names = vec!["Sheet1".to_string(), "ALL 2026".to_string()];
        let mut first = Range::new((0, 0), (10, 60));
        first.set_value((2, 55), Data::String("РМ Кула".to_string()));
        assert_eq!(
            detect_spreadsheet_layout(&names, &first),
            LayoutKind::WholeYear {
                sheet: "ALL 2026".to_string(),
                year: 2026,
            }
        );
    }
}
