//! JSONL reading operations.
//!
//! Two reading modes are provided:
//!
//! - **Strict** ([`read_jsonl`]): the first malformed line aborts the read
//!   with an error. Use this when the file is machine-generated and any
//!   corruption should be loud.
//! - **Resilient** ([`read_jsonl_resilient`], [`parse_jsonl_str`]): bad
//!   lines are skipped and reported as [`ParseWarning`]s alongside the
//!   records that did parse. Use this for snapshots that may contain
//!   hand-edited or partially-synced data.
//!
//! Blank lines are skipped silently in both modes, and trailing `\r` from
//! CRLF line endings is tolerated.

use crate::error::Result;
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

/// A non-fatal problem encountered while reading JSONL resiliently.
///
/// Line numbers are 1-based, matching what editors display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-based line number of the offending line.
    pub line: usize,
    /// Human-readable description of what went wrong.
    pub message: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Parses a complete JSONL document from an in-memory string, resiliently.
///
/// Returns the records that parsed plus a warning for every line that did
/// not. Blank lines (including whitespace-only and CRLF artifacts) are
/// skipped without a warning.
///
/// # Examples
///
/// ```
/// use trellis_jsonl::parse_jsonl_str;
///
/// let text = "{\"id\": 1}\n\nnot json\n{\"id\": 2}\n";
/// let (records, warnings) = parse_jsonl_str::<serde_json::Value>(text);
/// assert_eq!(records.len(), 2);
/// assert_eq!(warnings.len(), 1);
/// assert_eq!(warnings[0].line, 3);
/// ```
#[must_use]
pub fn parse_jsonl_str<T: DeserializeOwned>(text: &str) -> (Vec<T>, Vec<ParseWarning>) {
    let mut records = Vec::new();
    let mut warnings = Vec::new();

    for (index, line) in text.lines().enumerate() {
        match parse_line(line, index + 1) {
            LineOutcome::Record(record) => records.push(record),
            LineOutcome::Warning(warning) => warnings.push(warning),
            LineOutcome::Blank => {}
        }
    }

    (records, warnings)
}

/// Reads a JSONL file strictly: any malformed line aborts with an error.
///
/// Blank lines are still skipped.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read, or if any
/// non-blank line fails to deserialize into `T`.
pub async fn read_jsonl<T, P>(path: P) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let file = File::open(path.as_ref()).await?;
    let mut lines = BufReader::new(file).lines();
    let mut records = Vec::new();

    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        records.push(serde_json::from_str(trimmed)?);
    }

    Ok(records)
}

/// Reads a JSONL file resiliently: malformed lines become warnings.
///
/// Only I/O failures (file missing, permission denied, read error) are
/// fatal; every per-line problem is collected as a [`ParseWarning`] and
/// the remaining lines are still processed.
///
/// # Errors
///
/// Returns an error only if the file cannot be opened or read.
pub async fn read_jsonl_resilient<T, P>(path: P) -> Result<(Vec<T>, Vec<ParseWarning>)>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let file = File::open(path.as_ref()).await?;
    let mut lines = BufReader::new(file).lines();
    let mut records = Vec::new();
    let mut warnings = Vec::new();
    let mut line_number = 0;

    while let Some(line) = lines.next_line().await? {
        line_number += 1;
        match parse_line(&line, line_number) {
            LineOutcome::Record(record) => records.push(record),
            LineOutcome::Warning(warning) => warnings.push(warning),
            LineOutcome::Blank => {}
        }
    }

    Ok((records, warnings))
}

/// What a single line parsed into.
enum LineOutcome<T> {
    Record(T),
    Warning(ParseWarning),
    Blank,
}

fn parse_line<T: DeserializeOwned>(line: &str, line_number: usize) -> LineOutcome<T> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineOutcome::Blank;
    }
    match serde_json::from_str(trimmed) {
        Ok(record) => LineOutcome::Record(record),
        Err(e) => {
            tracing::debug!(line = line_number, error = %e, "skipping malformed JSONL line");
            LineOutcome::Warning(ParseWarning {
                line: line_number,
                message: e.to_string(),
            })
        }
    }
}
