//! Line segmentation: raw export text into logical chat entries.
//!
//! Exports wrap multi-line messages across physical lines. Only lines that
//! open with a `<date>, <time> - ` prefix start a new entry; every other
//! line is a continuation of the entry before it. This module detects those
//! boundaries and merges continuations, producing one [`RawEntry`] per chat
//! event.

use std::sync::OnceLock;

use regex::Regex;

/// Anchored prefix that opens a new chat entry.
///
/// Accepts day-first and month-first dates with 1-2 digit day/month and a
/// 2- or 4-digit year, 12- or 24-hour clock, optional seconds, optional
/// AM/PM marker:
///
/// ```text
/// 12/1/23, 4:05 PM - Alice: Hello
/// 15/01/2024, 16:05 - Alice: Hello
/// 1/15/24, 10:30:45 AM - Bob: Hi
/// ```
pub(crate) const ENTRY_PREFIX: &str =
    r"^(\d{1,2}/\d{1,2}/\d{2,4}), (\d{1,2}:\d{2}(?::\d{2})?(?:\s?[APap][Mm])?) - ";

pub(crate) fn entry_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ENTRY_PREFIX).unwrap())
}

/// One logical chat entry before field extraction.
///
/// Created by [`segment`], consumed by the entry parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// Entry text with continuation lines joined by `\n`.
    pub text: String,
    /// Byte offset of the entry's first line in the source text.
    pub offset: usize,
}

/// Splits export text into logical entries.
///
/// Lines that do not match the entry prefix are appended to the previous
/// entry's text with a literal newline separator. Continuation lines before
/// the first timestamped line have no entry to attach to and are dropped.
/// Input with no matching lines yields an empty vector, not an error.
///
/// CRLF line endings are accepted; the carriage return is stripped.
pub fn segment(content: &str) -> Vec<RawEntry> {
    let re = entry_regex();
    let mut entries: Vec<RawEntry> = Vec::new();
    let mut offset = 0usize;

    let mut lines = content.split('\n').peekable();
    while let Some(raw) = lines.next() {
        let advance = raw.len() + 1;
        // A final empty segment is the file's trailing newline, not a line.
        if lines.peek().is_none() && raw.is_empty() {
            break;
        }

        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if re.is_match(line) {
            entries.push(RawEntry {
                text: line.to_string(),
                offset,
            });
        } else if let Some(last) = entries.last_mut() {
            last.text.push('\n');
            last.text.push_str(line);
        }
        // No previous entry: orphan leader line, dropped.

        offset += advance;
    }

    entries
}
