//! Static duty-code classification tables and normalization.
//!
//! Codes are opaque short tokens read from roster cells; they are matched
//! literally against the tables below and never interpreted numerically.
//! The tables are pure data so they can be extended without touching
//! extraction logic.

use once_cell::sync::Lazy;
use regex::Regex;

/// Codes designating a night shift. The single-letter variants cover the
/// Cyrillic "Н" and its Latin homoglyph as produced by different templates.
pub const NIGHT_CODES: &[&str] = &["Н-2", "Н22", "H-2", "Н"];

/// Codes designating any other tracked special duty (training, reserve,
/// leave, etc.). Membership is an exact match after normalization.
pub const EXTRA_CODES: &[&str] = &[
    "I", "II-2", "Д09", "СД", "C2", "C5", "Об3", "Пк11", "пII", "Мп", "R8", "Ос", "К", "Б", "М",
    "и", "I-2", "Д07", "Д11", "СН/12", "C3", "Рг3", "Об5", "Пк14", "Iан", "Ан", "РД", "Кс", "Кп",
    "Б8", "От", "II", "Д", "Д13", "C1", "C4", "Рг5", "Пк09", "Iп", "анII", "Р", "О", "Кч", "Ап",
    "А", "Со", "Х", "Kc", "O", "X",
];

/// The placeholder cell marker meaning "no duty".
pub const BLANK: &str = "-";

/// Shift codes with a templated `/<number>` ratio suffix collapse to the
/// bare code: the "Д" family (with an optional colon before the slash),
/// the "Рг" and "Об" families, and the lone "СД" pattern.
static D_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Д(\d{2}):?/\d+$").expect("Д suffix pattern"));
static RG_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(Рг\d+)/\d+$").expect("Рг suffix pattern"));
static OB_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(Об\d+)/\d+$").expect("Об suffix pattern"));
static SD_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^СД/\d+$").expect("СД suffix pattern"));

/// All known codes (night, extra, and the blank marker), deduplicated and
/// sorted longest-first so greedy prefix matching never captures a short
/// code that prefixes a longer one.
static CODE_LIST: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut codes: Vec<&'static str> = NIGHT_CODES
        .iter()
        .chain(EXTRA_CODES.iter())
        .copied()
        .chain(std::iter::once(BLANK))
        .collect();
    codes.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    codes.dedup();
    codes
});

/// Classification of a normalized cell token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeClass {
    /// A night-shift code.
    Night,
    /// An extra-shift code.
    Extra,
    /// The "-" placeholder meaning no duty.
    Blank,
    /// Anything else; ignored by the aggregator.
    Unclassified,
}

/// Classifies a cell token. The token must already be normalized.
///
/// # Example
///
/// ```
/// use roster_engine::codes::{classify, CodeClass};
///
/// assert_eq!(classify("Н"), CodeClass::Night);
/// assert_eq!(classify("Д09"), CodeClass::Extra);
/// assert_eq!(classify("-"), CodeClass::Blank);
/// assert_eq!(classify("ГРАФИК"), CodeClass::Unclassified);
/// ```
pub fn classify(code: &str) -> CodeClass {
    if code == BLANK {
        return CodeClass::Blank;
    }
    if NIGHT_CODES.contains(&code) {
        return CodeClass::Night;
    }
    if EXTRA_CODES.contains(&code) {
        return CodeClass::Extra;
    }
    CodeClass::Unclassified
}

/// Normalizes a raw cell token: trims whitespace and collapses the
/// templated ratio suffixes (`Д09/1`, `Д09:/2`, `Рг3/1`, `Об5/2`, `СД/3`)
/// to their bare codes. A lone `-` passes through unchanged.
///
/// Normalization is idempotent: normalizing an already-normalized token
/// returns it unchanged.
///
/// # Example
///
/// ```
/// use roster_engine::codes::normalize;
///
/// assert_eq!(normalize(" Д09/1 "), "Д09");
/// assert_eq!(normalize("СД/12"), "СД");
/// assert_eq!(normalize("Н-2"), "Н-2");
/// ```
pub fn normalize(token: &str) -> String {
    let t = token.trim();
    if t == BLANK {
        return t.to_string();
    }
    if let Some(caps) = D_SUFFIX_RE.captures(t) {
        return format!("Д{}", &caps[1]);
    }
    if let Some(caps) = RG_SUFFIX_RE.captures(t) {
        return caps[1].to_string();
    }
    if let Some(caps) = OB_SUFFIX_RE.captures(t) {
        return caps[1].to_string();
    }
    if SD_SUFFIX_RE.is_match(t) {
        return "СД".to_string();
    }
    t.to_string()
}

/// Splits a run of codes concatenated without delimiters.
///
/// Text extraction from PDFs loses column boundaries, so a token longer
/// than a single code is assumed to be several codes run together. Matching
/// is greedy left-to-right against the known code list (longest-first);
/// one character is skipped whenever no known code matches at the current
/// offset. Stops when the string is exhausted or `max` codes were produced.
///
/// # Example
///
/// ```
/// use roster_engine::codes::split_concatenated;
///
/// assert_eq!(split_concatenated("Д09СД", 31), vec!["Д09", "СД"]);
/// ```
pub fn split_concatenated(raw: &str, max: usize) -> Vec<String> {
    let s = raw.trim();
    let mut codes = Vec::new();
    let mut idx = 0;
    while idx < s.len() && codes.len() < max {
        let slice = &s[idx..];
        if let Some(code) = CODE_LIST.iter().find(|c| slice.starts_with(*c)) {
            codes.push((*code).to_string());
            idx += code.len();
        } else {
            idx += slice.chars().next().map_or(1, char::len_utf8);
        }
    }
    codes
}
