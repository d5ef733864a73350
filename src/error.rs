//! Error types for the schedule extraction engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all fatal conditions that can occur during a parse. Malformed worker
//! rows are not errors: roster templates legitimately contain blank rows,
//! so those are skipped silently by the extractors.

use thiserror::Error;

/// The main error type for the schedule extraction engine.
///
/// All fatal parse conditions propagate as this type; the engine never
/// returns partial data alongside an error.
///
/// # Example
///
/// ```
/// use roster_engine::error::ParseError;
///
/// let error = ParseError::UnsupportedFormat {
///     filename: "roster.docx".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unsupported schedule format: roster.docx");
/// ```
#[derive(Debug, Error)]
pub enum ParseError {
    /// The filename extension is not a supported schedule format.
    #[error("Unsupported schedule format: {filename}")]
    UnsupportedFormat {
        /// The filename that was rejected.
        filename: String,
    },

    /// The layout's position anchor did not match either known position marker.
    #[error("Position not detected in {layout}")]
    PositionNotDetected {
        /// The layout being parsed when detection failed.
        layout: String,
    },

    /// Neither the filename pattern nor the in-document text yielded a month/year.
    #[error("Month/year not detected in {filename}")]
    MonthNotDetected {
        /// The document whose month could not be resolved.
        filename: String,
    },

    /// The spreadsheet buffer could not be opened or read.
    #[error("Failed to read workbook: {message}")]
    WorkbookRead {
        /// A description of the read failure.
        message: String,
    },

    /// The PDF buffer could not be converted to text.
    #[error("Failed to extract PDF text: {message}")]
    PdfText {
        /// A description of the extraction failure.
        message: String,
    },
}

/// A type alias for Results that return ParseError.
pub type ParseResult<T> = Result<T, ParseError>;
