//! # chatlens
//!
//! A Rust library for turning WhatsApp-style TXT chat exports into a
//! structured, analytics-ready message table.
//!
//! ## Overview
//!
//! Chat exports are semi-structured text: timestamps vary by locale and
//! client, messages span multiple physical lines, and system notifications
//! sit between user messages. Chatlens parses all of that into one typed,
//! ordered table and provides the aggregations commonly built on top
//! (timelines, activity maps, word and emoji frequencies, response times).
//!
//! The pipeline runs in four stages:
//!
//! 1. [`segment`](segment::segment) — split raw text into logical entries,
//!    merging continuation lines.
//! 2. [`ChatParser::parse_entry`](parser::ChatParser::parse_entry) — extract
//!    timestamp, sender, and body; classify the entry kind.
//! 3. [`TimeFeatures::derive`](timefeat::TimeFeatures::derive) — expand each
//!    timestamp into the derived calendar fields.
//! 4. [`ChatTable`](table::ChatTable) — the assembled output contract, row
//!    order equal to source file order.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatlens::prelude::*;
//!
//! let export = "12/1/23, 4:05 PM - Alice: Hello\nworld\n\
//!               12/1/23, 4:06 PM - Bob: Hi";
//!
//! let table = ChatParser::new().parse_str(export);
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.rows()[0].message, "Hello\nworld");
//!
//! let stats = chatlens::stats::summary(&UserSelection::Overall, &table);
//! assert_eq!(stats.messages, 2);
//! ```
//!
//! ## Error Policy
//!
//! Parsing never drops a recognized entry: a timestamp no accepted format
//! can read leaves the row in place with its time fields absent and
//! `timestamp_failed` set, so message totals stay consistent. Input with no
//! recognizable entries parses to an empty table, not an error.
//!
//! ## Module Structure
//!
//! - [`segment`] — line segmentation into [`RawEntry`](segment::RawEntry)
//! - [`parser`] — [`ChatParser`], entry field extraction
//! - [`timefeat`] — [`TimeFeatures`](timefeat::TimeFeatures), derived fields
//! - [`table`] — [`ChatTable`], [`MessageRow`](table::MessageRow),
//!   [`UserSelection`](table::UserSelection)
//! - [`stats`] — analytics collaborators over the table
//! - [`output`] — CSV / JSON / JSONL writers
//! - [`config`] — [`ParserConfig`](config::ParserConfig)
//! - [`error`] — [`ChatlensError`], [`Result`]
//! - [`cli`] — CLI argument types

pub mod cli;
pub mod config;
pub mod error;
pub mod message;
pub mod output;
pub mod parser;
pub mod segment;
pub mod stats;
pub mod table;
pub mod timefeat;

pub use error::{ChatlensError, Result};
pub use message::{MessageKind, ParsedMessage};
pub use parser::ChatParser;
pub use table::{ChatTable, MessageRow, UserSelection};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::ParserConfig;
    pub use crate::error::{ChatlensError, Result};
    pub use crate::message::{MEDIA_PLACEHOLDER, MessageKind, ParsedMessage, SYSTEM_SENDER};
    pub use crate::output::{to_csv, to_json, to_jsonl, write_csv, write_json, write_jsonl};
    pub use crate::parser::ChatParser;
    pub use crate::segment::{RawEntry, segment};
    pub use crate::stats::{Analysis, Summary};
    pub use crate::table::{ChatTable, MessageRow, UserSelection};
    pub use crate::timefeat::{TimeFeatures, period_label};
}
