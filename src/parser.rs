//! Entry parsing: timestamp, sender, and body extraction.
//!
//! [`ChatParser`] drives the full pipeline: segment the export text into
//! logical entries, extract the fields of each entry, derive time features,
//! and assemble the ordered [`ChatTable`].
//!
//! Timestamp formats are tried in a fixed priority order and the first
//! match wins. Day-first dates are preferred by default;
//! [`ParserConfig::with_month_first`](crate::config::ParserConfig::with_month_first)
//! flips the priority for US-style exports. A date that only parses one way
//! (`12/25/23`) is unaffected by the preference.

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;

use crate::config::ParserConfig;
use crate::error::Result;
use crate::message::{MessageKind, ParsedMessage};
use crate::segment::{RawEntry, entry_regex, segment};
use crate::table::ChatTable;

/// Day-first timestamp formats, highest priority first.
///
/// Within the family: 12-hour with AM/PM before 24-hour, seconds-bearing
/// before minute-only.
const DAY_FIRST_FORMATS: &[&str] = &[
    "%d/%m/%y, %I:%M:%S %p",
    "%d/%m/%Y, %I:%M:%S %p",
    "%d/%m/%y, %I:%M %p",
    "%d/%m/%Y, %I:%M %p",
    "%d/%m/%y, %H:%M:%S",
    "%d/%m/%Y, %H:%M:%S",
    "%d/%m/%y, %H:%M",
    "%d/%m/%Y, %H:%M",
];

/// Month-first timestamp formats, same internal ordering.
const MONTH_FIRST_FORMATS: &[&str] = &[
    "%m/%d/%y, %I:%M:%S %p",
    "%m/%d/%Y, %I:%M:%S %p",
    "%m/%d/%y, %I:%M %p",
    "%m/%d/%Y, %I:%M %p",
    "%m/%d/%y, %H:%M:%S",
    "%m/%d/%Y, %H:%M:%S",
    "%m/%d/%y, %H:%M",
    "%m/%d/%Y, %H:%M",
];

/// Parser for WhatsApp-style TXT chat exports.
///
/// # Example
///
/// ```rust
/// use chatlens::ChatParser;
///
/// let table = ChatParser::new().parse_str("12/1/23, 4:05 PM - Alice: Hello");
/// assert_eq!(table.len(), 1);
/// assert_eq!(table.rows()[0].user, "Alice");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChatParser {
    config: ParserConfig,
}

impl ChatParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses an export file into a chat table.
    pub fn parse(&self, path: &Path) -> Result<ChatTable> {
        let content = fs::read_to_string(path)?;
        Ok(self.parse_str(&content))
    }

    /// Parses export text into a chat table.
    ///
    /// Infallible by design: input with no recognizable entries yields an
    /// empty table, and a row whose timestamp defeats every accepted format
    /// is kept with its time fields absent. Row order equals the order
    /// entries appear in the text; the table is never re-sorted.
    pub fn parse_str(&self, content: &str) -> ChatTable {
        let messages = segment(content)
            .iter()
            .map(|entry| self.parse_entry(entry))
            .collect();
        ChatTable::from_messages(messages)
    }

    /// Extracts timestamp, sender, and body from one logical entry.
    ///
    /// The entry text is expected to match the entry prefix (the segmenter
    /// guarantees this); an entry that somehow does not is classified as a
    /// system notification with a failed timestamp rather than dropped.
    pub fn parse_entry(&self, entry: &RawEntry) -> ParsedMessage {
        let Some(caps) = entry_regex().captures(&entry.text) else {
            return self.system_message(None, entry.text.clone());
        };

        let date_str = caps.get(1).map_or("", |m| m.as_str());
        let time_str = caps.get(2).map_or("", |m| m.as_str());
        let rest = &entry.text[caps.get(0).map_or(0, |m| m.end())..];

        let timestamp = self.parse_timestamp(date_str, time_str);

        match rest.split_once(": ") {
            Some((name, body)) if !name.trim().is_empty() => {
                let body = body.to_string();
                let is_media = self.is_media_body(&body);
                ParsedMessage {
                    timestamp,
                    sender: name.trim().to_string(),
                    kind: if is_media {
                        MessageKind::Media
                    } else {
                        MessageKind::User
                    },
                    is_media,
                    timestamp_failed: timestamp.is_none(),
                    body,
                }
            }
            // No sender separator, or an empty sender: system notification.
            _ => self.system_message(timestamp, rest.to_string()),
        }
    }

    /// Tries each accepted timestamp format in priority order.
    pub fn parse_timestamp(&self, date_str: &str, time_str: &str) -> Option<NaiveDateTime> {
        let joined = format!("{date_str}, {time_str}");
        for fmt in self.formats() {
            if let Ok(ts) = NaiveDateTime::parse_from_str(&joined, fmt) {
                return Some(ts);
            }
        }
        None
    }

    fn formats(&self) -> impl Iterator<Item = &'static &'static str> {
        let (primary, secondary) = if self.config.month_first {
            (MONTH_FIRST_FORMATS, DAY_FIRST_FORMATS)
        } else {
            (DAY_FIRST_FORMATS, MONTH_FIRST_FORMATS)
        };
        primary.iter().chain(secondary.iter())
    }

    /// Media equality check with a single trailing newline ignored, so both
    /// `<Media omitted>` and `<Media omitted>\n` classify as media.
    fn is_media_body(&self, body: &str) -> bool {
        body.strip_suffix('\n').unwrap_or(body) == self.config.media_placeholder
    }

    fn system_message(&self, timestamp: Option<NaiveDateTime>, body: String) -> ParsedMessage {
        ParsedMessage {
            timestamp,
            sender: self.config.system_sender.clone(),
            body,
            kind: MessageKind::System,
            is_media: false,
            timestamp_failed: timestamp.is_none(),
        }
    }
}
