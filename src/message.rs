//! Parsed message type and classification constants.
//!
//! This module provides [`ParsedMessage`], the typed representation of one
//! chat event extracted from an export, and the fixed strings the export
//! format uses for system notifications and omitted attachments.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Sentinel sender assigned to entries with no human author.
///
/// Group-management events and service notices carry no sender in the
/// export; they get this label so downstream consumers can exclude them
/// with a plain equality check. It is never a real user name.
pub const SYSTEM_SENDER: &str = "group_notification";

/// Body text the export substitutes for an omitted attachment.
pub const MEDIA_PLACEHOLDER: &str = "<Media omitted>";

/// Classification of a chat entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Regular message from a human sender.
    User,
    /// Group-management event or service notice; no human sender.
    System,
    /// User message whose body is the media placeholder. Media messages
    /// still have a sender.
    Media,
}

impl MessageKind {
    /// Returns the lowercase label used in table output.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::User => "user",
            MessageKind::System => "system",
            MessageKind::Media => "media",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One chat event extracted from the export.
///
/// Produced by the entry parser; merged with derived time fields into a
/// [`MessageRow`](crate::table::MessageRow) by the table builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedMessage {
    /// When the message was sent. Timezone-naive: exports carry no zone
    /// information. `None` only when every accepted timestamp format
    /// failed; the row is still kept (see [`timestamp_failed`](Self::timestamp_failed)).
    pub timestamp: Option<NaiveDateTime>,

    /// Sender name, or [`SYSTEM_SENDER`] for system notifications.
    pub sender: String,

    /// Message text. Internal newlines from multi-line messages are
    /// preserved; the trailing newline of the final line is not.
    pub body: String,

    /// Entry classification.
    pub kind: MessageKind,

    /// Precomputed media check: the body, with a single trailing newline
    /// ignored, equals the media placeholder exactly. Stored once so
    /// consumers never repeat the string comparison.
    pub is_media: bool,

    /// Set when no accepted timestamp format matched. Rows with this flag
    /// have no derived time fields but still count toward totals.
    pub timestamp_failed: bool,
}

impl ParsedMessage {
    /// Returns `true` for system notifications.
    pub fn is_system(&self) -> bool {
        self.kind == MessageKind::System
    }
}
