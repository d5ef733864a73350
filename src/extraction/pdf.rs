//! Extractor for the PDF text layout.
//!
//! PDF text extraction yields flat lines with no column grid, so the
//! tabular structure is recovered heuristically: numeric index lines open
//! worker blocks, the following lines carry the (possibly wrapped) name
//! until the duty/role line, and the line after that holds the month's
//! duty codes run together. The sparse code run is then stretched across
//! the full day range by gap redistribution before positional dating.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use super::roles::allowed_for_role;
use super::Observation;
use crate::codes;
use crate::dates;
use crate::error::{ParseError, ParseResult};
use crate::models::{MonthBase, Position};

/// Substring marking the duty/role line of a worker block.
const ROLE_LINE_MARKER: &str = "РП-";

/// Token opening the duty portion of the role line when the role is bare
/// tower qualification.
const TOWER_DUTY_TOKEN: &str = "ЛКК";

/// Tokens longer than this are assumed to be concatenated code runs.
const MAX_SINGLE_CODE_CHARS: usize = 5;

/// Directory the best-effort debug grids are written to.
const DEBUG_DIR: &str = "data/debug";

/// A line consisting solely of digits marks the start of a worker block.
static INDEX_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("index pattern"));

/// Runs of spaces and tabs, collapsed before position/month searching.
static INLINE_WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").expect("space pattern"));

/// One worker's recovered roster row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfRow {
    /// The worker's name, joined from the block's name lines.
    pub name: String,
    /// Normalized day codes, padded/truncated to the month's length.
    pub codes: Vec<String>,
}

/// The tabular structure recovered from one PDF document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfTable {
    /// The position the document belongs to.
    pub position: Position,
    /// The resolved month/year anchor.
    pub base: MonthBase,
    /// Number of days in the anchored month.
    pub days_in_month: u32,
    /// One row per eligible worker block.
    pub rows: Vec<PdfRow>,
}

/// Recovers the roster table from flattened PDF text.
///
/// Fails with [`ParseError::PositionNotDetected`] or
/// [`ParseError::MonthNotDetected`] when the document carries neither
/// marker; worker blocks missing a name or duty line, or failing role
/// filtering, are skipped silently.
pub fn parse_pdf_text(text: &str, filename: &str) -> ParseResult<PdfTable> {
    let cleaned = text.replace('\r', "");
    let search_text = INLINE_WS_RE.replace_all(&cleaned, " ");

    let position =
        Position::detect(&search_text).ok_or_else(|| ParseError::PositionNotDetected {
            layout: "PDF".to_string(),
        })?;

    let base = MonthBase::from_filename(filename)
        .or_else(|| MonthBase::from_text(&search_text))
        .ok_or_else(|| ParseError::MonthNotDetected {
            filename: filename.to_string(),
        })?;
    let days_in_month = base.days_in_month();

    let lines: Vec<&str> = cleaned
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut rows = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        if !is_index_line(lines[i]) {
            i += 1;
            continue;
        }

        let mut name_parts: Vec<&str> = Vec::new();
        let mut duty_line: Option<&str> = None;
        let mut j = i + 1;
        while j < lines.len() {
            let line = lines[j];
            if is_index_line(line) && !name_parts.is_empty() {
                break;
            }
            if line.contains(ROLE_LINE_MARKER) {
                duty_line = Some(line);
                j += 1;
                break;
            }
            name_parts.push(line);
            j += 1;
        }

        let Some(duty_line) = duty_line else {
            i = j;
            continue;
        };
        if name_parts.is_empty() {
            i = j;
            continue;
        }
        let name = name_parts.join(" ").trim().to_string();

        let duty_tokens: Vec<&str> = duty_line.split_whitespace().collect();
        let Some(duty_start) = duty_tokens
            .iter()
            .position(|t| t.starts_with("РП") || *t == TOWER_DUTY_TOKEN)
        else {
            i = j;
            continue;
        };
        let duty = duty_tokens[duty_start..].join(" ");
        if !allowed_for_role(&duty, position) {
            tracing::debug!(name, duty, "worker block excluded by role filter");
            i = j;
            continue;
        }

        // Codes are on the line after the duty line
        let code_line = lines.get(j).copied().unwrap_or("");
        let mut day_codes: Vec<String> = Vec::new();
        for token in code_line.split_whitespace() {
            let normalized = codes::normalize(token);
            if normalized.chars().count() > MAX_SINGLE_CODE_CHARS {
                let budget = (days_in_month as usize).saturating_sub(day_codes.len());
                day_codes.extend(codes::split_concatenated(&normalized, budget));
            } else {
                day_codes.push(normalized);
            }
        }
        while day_codes.len() < days_in_month as usize {
            day_codes.push(codes::BLANK.to_string());
        }
        day_codes.truncate(days_in_month as usize);

        rows.push(PdfRow { name, codes: day_codes });
        i = j + 1;
    }

    Ok(PdfTable {
        position,
        base,
        days_in_month,
        rows,
    })
}

/// Spreads `codes` across `days` slots by inserting blank markers.
///
/// PDF code lines omit blank days, so `days - codes.len()` blanks are
/// distributed as evenly as possible over the gaps before each code and
/// after the last: each code is preceded by `floor(remaining_gaps /
/// remaining_slots)` blanks, and leftovers go at the end. The result
/// always has exactly `days` entries with the non-blank codes in their
/// original relative order. This is an even-spread heuristic, not a true
/// calendar alignment, and is reproduced as-is for output parity.
pub fn spread_gaps(codes: &[String], days: usize) -> Vec<String> {
    if codes.is_empty() {
        return vec![codes::BLANK.to_string(); days];
    }
    if codes.len() >= days {
        return codes[..days].to_vec();
    }
    let mut remaining_gaps = days - codes.len();
    let mut slots = codes.len() + 1;
    let mut out = Vec::with_capacity(days);
    for code in codes {
        let g = remaining_gaps / slots;
        out.extend(std::iter::repeat_n(codes::BLANK.to_string(), g));
        remaining_gaps -= g;
        slots -= 1;
        out.push(code.clone());
    }
    out.extend(std::iter::repeat_n(codes::BLANK.to_string(), remaining_gaps));
    out
}

/// Maps each recovered row through gap redistribution and positional dates.
pub fn pdf_observations(table: &PdfTable) -> Vec<Observation> {
    let mut observations = Vec::new();
    for row in &table.rows {
        let distributed = spread_gaps(&row.codes, table.days_in_month as usize);
        for (day_index, code) in distributed.iter().enumerate() {
            let Some(date) = dates::day_to_iso(&table.base, day_index as u32 + 1) else {
                continue;
            };
            observations.push(Observation {
                position: table.position,
                name: row.name.clone(),
                date,
                code: code.clone(),
            });
        }
    }
    observations
}

/// Writes a TSV mirror of the recovered grid for manual inspection.
///
/// Strictly best-effort: any failure is swallowed and never affects the
/// parse outcome.
pub(crate) fn write_debug_grid(table: &PdfTable, filename: &str) {
    let result = (|| -> std::io::Result<()> {
        let dir = Path::new(DEBUG_DIR);
        fs::create_dir_all(dir)?;
        let stem = Path::new(filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("pdf");

        let mut lines = Vec::with_capacity(table.rows.len() + 1);
        let header: Vec<String> = std::iter::once("Name".to_string())
            .chain((1..=table.days_in_month).map(|d| d.to_string()))
            .collect();
        lines.push(header.join("\t"));
        for row in &table.rows {
            let spread = spread_gaps(&row.codes, table.days_in_month as usize);
            lines.push(format!("{}\t{}", row.name, spread.join("\t")));
        }
        fs::write(dir.join(format!("{stem}_parsed.tsv")), lines.join("\n"))
    })();
    if let Err(e) = result {
        tracing::debug!("debug grid write failed: {e}");
    }
}

fn is_index_line(line: &str) -> bool {
    INDEX_LINE_RE.is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn blanks(n: usize) -> Vec<String> {
        vec![codes::BLANK.to_string(); n]
    }

    fn codes_of(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    // -------------------------------------------------------------------
    // Gap redistribution
    // -------------------------------------------------------------------

    #[test]
    fn test_spread_gaps_empty_input_is_all_blank() {
        assert_eq!(spread_gaps(&[], 4), blanks(4));
    }

    #[test]
    fn test_spread_gaps_overlong_input_truncates() {
        let input = codes_of(&["Н", "СД", "Д09"]);
        assert_eq!(spread_gaps(&input, 2), codes_of(&["Н", "СД"]));
    }

    #[test]
    fn test_spread_gaps_even_distribution() {
        // 2 codes over 5 days: 3 gaps over 3 slots, one blank per slot
        let input = codes_of(&["Н", "СД"]);
        assert_eq!(
            spread_gaps(&input, 5),
            codes_of(&["-", "Н", "-", "СД", "-"])
        );
    }

    #[test]
    fn test_spread_gaps_uneven_remainder_trails() {
        // 3 codes over 5 days: the floor division starves the early slots,
        // so the blanks land before the last code and at the end
        let input = codes_of(&["Н", "СД", "Д09"]);
        assert_eq!(
            spread_gaps(&input, 5),
            codes_of(&["Н", "СД", "-", "Д09", "-"])
        );
    }

    #[test]
    fn test_spread_gaps_preserves_length_and_order() {
        let input = codes_of(&["Н", "СД", "Д09", "Рг3"]);
        let out = spread_gaps(&input, 31);
        assert_eq!(out.len(), 31);
        let non_blank: Vec<&String> = out.iter().filter(|c| *c != codes::BLANK).collect();
        assert_eq!(non_blank.len(), 4);
        assert_eq!(
            non_blank.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            vec!["Н", "СД", "Д09", "Рг3"]
        );
    }

    // -------------------------------------------------------------------
    // Text recovery
    // -------------------------------------------------------------------

    fn sample_text(body: &str) -> String {
        format!("ГРАФИК РМ Кула\nЯнуари 2025\n{body}")
    }

    #[test]
    fn test_parse_requires_position() {
        let err = parse_pdf_text("Януари 2025\n1\nИванов", "roster.pdf").unwrap_err();
        assert_eq!(err.to_string(), "Position not detected in PDF");
    }

    #[test]
    fn test_parse_requires_month() {
        let err = parse_pdf_text("РМ Кула\n1\nИванов", "roster.pdf").unwrap_err();
        assert_eq!(err.to_string(), "Month/year not detected in roster.pdf");
    }

    #[test]
    fn test_month_from_filename_takes_precedence() {
        let table = parse_pdf_text(&sample_text(""), "grafik_0324.pdf").unwrap();
        assert_eq!(table.base, MonthBase { month: 3, year: 2024 });
    }

    #[test]
    fn test_month_from_text_fallback() {
        let table = parse_pdf_text(&sample_text(""), "roster.pdf").unwrap();
        assert_eq!(table.base, MonthBase { month: 1, year: 2025 });
        assert_eq!(table.days_in_month, 31);
    }

    #[test]
    fn test_worker_block_with_wrapped_name() {
        let text = sample_text("1\nИванов\nИван\nРП-ЛКК 168\nН СД Д09");
        let table = parse_pdf_text(&text, "roster.pdf").unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].name, "Иванов Иван");
        assert_eq!(table.rows[0].codes.len(), 31);
        assert_eq!(&table.rows[0].codes[..3], codes_of(&["Н", "СД", "Д09"]));
        assert_eq!(table.rows[0].codes[3], codes::BLANK);
    }

    #[test]
    fn test_block_without_duty_line_is_skipped() {
        let text = sample_text("1\nИванов\n2\nПетров\nРП-ЛКК\nН");
        let table = parse_pdf_text(&text, "roster.pdf").unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].name, "Петров");
    }

    #[test]
    fn test_block_failing_role_filter_is_skipped() {
        // Radar-only role under a tower document
        let text = sample_text("1\nИванов\nРП-радарен 168\nН СД");
        let table = parse_pdf_text(&text, "roster.pdf").unwrap();
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_concatenated_code_run_expands() {
        let text = sample_text("1\nИванов\nРП-ЛКК\nД09СДН22");
        let table = parse_pdf_text(&text, "roster.pdf").unwrap();
        assert_eq!(&table.rows[0].codes[..3], codes_of(&["Д09", "СД", "Н22"]));
    }

    #[test]
    fn test_code_tokens_normalize_suffixes() {
        let text = sample_text("1\nИванов\nРП-ЛКК\nД09/1 Рг3/2");
        let table = parse_pdf_text(&text, "roster.pdf").unwrap();
        assert_eq!(&table.rows[0].codes[..2], codes_of(&["Д09", "Рг3"]));
    }

    #[test]
    fn test_overlong_code_line_truncates_to_month() {
        let many = vec!["Н"; 40].join(" ");
        let text = sample_text(&format!("1\nИванов\nРП-ЛКК\n{many}"));
        let table = parse_pdf_text(&text, "roster.pdf").unwrap();
        assert_eq!(table.rows[0].codes.len(), 31);
    }

    #[test]
    fn test_pdf_observations_positional_dates() {
        let table = PdfTable {
            position: Position::Twr,
            base: MonthBase { month: 1, year: 2025 },
            days_in_month: 3,
            rows: vec![PdfRow {
                name: "Иванов".to_string(),
                codes: codes_of(&["Н", "-", "СД"]),
            }],
        };
        let obs = pdf_observations(&table);
        assert_eq!(obs.len(), 3);
        assert_eq!(obs[0].date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(obs[2].date, NaiveDate::from_ymd_opt(2025, 1, 3).unwrap());
        assert_eq!(obs[2].code, "СД");
    }
}
