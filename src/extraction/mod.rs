//! The schedule extraction engine.
//!
//! Four layout-specific extractors turn roster documents into raw
//! (name, date, code) observations; the aggregator classifies those and
//! merges them into the canonical payload. [`parse_schedule`] is the
//! entry point that wires detection, extraction, and aggregation together.

mod aggregate;
mod layout;
mod legacy;
mod new_layout;
mod pdf;
mod roles;
mod sheet;
mod whole_year;

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use chrono::NaiveDate;

use crate::error::{ParseError, ParseResult};
use crate::models::{Position, SchedulePayload};

pub use aggregate::{aggregate, ShiftAggregator};
pub use layout::{
    detect_spreadsheet_layout, document_kind, whole_year_sheet, DocumentKind, LayoutKind,
};
pub use legacy::extract_legacy;
pub use new_layout::extract_new_layout;
pub use pdf::{parse_pdf_text, pdf_observations, spread_gaps, PdfRow, PdfTable};
pub use roles::allowed_for_role;
pub use sheet::col_index;
pub use whole_year::extract_whole_year;

/// One raw duty-cell reading: a worker, a date, and the unclassified code
/// found in the cell. Extractors emit these; the aggregator interprets them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// The position the observation belongs to.
    pub position: Position,
    /// The worker's name as written in the roster.
    pub name: String,
    /// The absolute calendar date of the cell.
    pub date: NaiveDate,
    /// The raw code token, not yet normalized or classified.
    pub code: String,
}

/// Parses one roster document into night-shift and extra-shift records.
///
/// The layout is chosen from the filename extension and, for spreadsheets,
/// the workbook's sheet names and anchor cells. Asynchronous because the
/// PDF path suspends once for text extraction; spreadsheet parsing is
/// fully synchronous. Fails rather than returning partial data.
///
/// # Errors
///
/// - [`ParseError::UnsupportedFormat`] for unrecognized extensions
/// - [`ParseError::PositionNotDetected`] when a layout's anchor holds
///   neither position marker
/// - [`ParseError::MonthNotDetected`] when a PDF yields no month/year
/// - [`ParseError::WorkbookRead`] / [`ParseError::PdfText`] for unreadable
///   buffers
pub async fn parse_schedule(document: &[u8], filename: &str) -> ParseResult<SchedulePayload> {
    tracing::info!(filename, bytes = document.len(), "parsing schedule document");
    match document_kind(filename) {
        Some(DocumentKind::Pdf) => parse_pdf(document, filename).await,
        Some(DocumentKind::Spreadsheet) => parse_spreadsheet(document, filename),
        None => Err(ParseError::UnsupportedFormat {
            filename: filename.to_string(),
        }),
    }
}

fn parse_spreadsheet(document: &[u8], filename: &str) -> ParseResult<SchedulePayload> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(document)).map_err(|e| ParseError::WorkbookRead {
            message: e.to_string(),
        })?;
    let sheet_names = workbook.sheet_names().to_vec();
    let first = sheet_names
        .first()
        .cloned()
        .ok_or_else(|| ParseError::WorkbookRead {
            message: "workbook has no sheets".to_string(),
        })?;
    let range = worksheet(&mut workbook, &first)?;

    let layout = detect_spreadsheet_layout(&sheet_names, &range);
    tracing::debug!(?layout, "spreadsheet layout detected");
    let observations = match layout {
        LayoutKind::WholeYear { sheet, year } => {
            let range = worksheet(&mut workbook, &sheet)?;
            extract_whole_year(&range, year)
        }
        LayoutKind::Legacy => extract_legacy(&range, filename)?,
        LayoutKind::New => extract_new_layout(&range, filename)?,
    };
    Ok(aggregate(&observations, filename))
}

fn worksheet(
    workbook: &mut Sheets<Cursor<&[u8]>>,
    name: &str,
) -> ParseResult<Range<Data>> {
    workbook
        .worksheet_range(name)
        .map_err(|e| ParseError::WorkbookRead {
            message: e.to_string(),
        })
}

async fn parse_pdf(document: &[u8], filename: &str) -> ParseResult<SchedulePayload> {
    let text = pdf_text(document.to_vec()).await?;
    let table = parse_pdf_text(&text, filename)?;
    pdf::write_debug_grid(&table, filename);
    Ok(aggregate(&pdf_observations(&table), filename))
}

/// Converts the PDF buffer to text off the async runtime's worker threads.
/// This is the parse's only suspension point.
async fn pdf_text(document: Vec<u8>) -> ParseResult<String> {
    tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&document))
        .await
        .map_err(|e| ParseError::PdfText {
            message: e.to_string(),
        })?
        .map_err(|e| ParseError::PdfText {
            message: e.to_string(),
        })
}
