//! The canonical output table and its row type.
//!
//! [`ChatTable`] is the contract every analytics consumer works against:
//! an ordered sequence of [`MessageRow`]s whose order equals the order
//! entries appear in the source export. Consumers receive a shared
//! reference and filter into new vectors; the table itself is never
//! mutated after construction and never re-sorted, since near-simultaneous
//! timestamps must not reorder messages.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::message::{MessageKind, ParsedMessage};
use crate::timefeat::TimeFeatures;

/// One row of the chat table: parsed fields merged with derived time fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRow {
    /// Message timestamp; `None` when parsing failed.
    pub timestamp: Option<NaiveDateTime>,

    /// Sender name, or the system sentinel.
    pub user: String,

    /// Message body.
    pub message: String,

    /// Entry classification.
    pub kind: MessageKind,

    /// Precomputed media placeholder check.
    pub is_media: bool,

    /// Set when no accepted timestamp format matched.
    pub timestamp_failed: bool,

    /// Derived calendar fields; absent exactly when the timestamp is.
    #[serde(flatten)]
    pub time: Option<TimeFeatures>,
}

impl MessageRow {
    /// Builds a row from a parsed message, deriving the time fields.
    pub fn from_message(msg: ParsedMessage) -> Self {
        let time = msg.timestamp.map(TimeFeatures::derive);
        Self {
            timestamp: msg.timestamp,
            user: msg.sender,
            message: msg.body,
            kind: msg.kind,
            is_media: msg.is_media,
            timestamp_failed: msg.timestamp_failed,
            time,
        }
    }

    /// Returns the derived time fields, if the timestamp parsed.
    pub fn time(&self) -> Option<&TimeFeatures> {
        self.time.as_ref()
    }

    /// Returns `true` for system notification rows.
    pub fn is_system(&self) -> bool {
        self.kind == MessageKind::System
    }
}

/// Selects which sender an analytics call operates on.
///
/// Every collaborator accepts a selection and either filters rows by
/// sender or uses the whole table for [`Overall`](UserSelection::Overall).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserSelection {
    /// All senders.
    Overall,
    /// A single sender, matched exactly.
    User(String),
}

impl UserSelection {
    /// The literal that selects all senders.
    pub const OVERALL: &'static str = "Overall";

    /// Parses a selection from CLI-style input: the literal `Overall`
    /// selects everyone, anything else names a sender.
    pub fn parse(s: &str) -> Self {
        if s == Self::OVERALL {
            UserSelection::Overall
        } else {
            UserSelection::User(s.to_string())
        }
    }

    /// Whether a row with this sender is in the selection.
    pub fn matches(&self, sender: &str) -> bool {
        match self {
            UserSelection::Overall => true,
            UserSelection::User(name) => name == sender,
        }
    }
}

impl std::fmt::Display for UserSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserSelection::Overall => f.write_str(Self::OVERALL),
            UserSelection::User(name) => f.write_str(name),
        }
    }
}

/// Ordered message table; the parser's output contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatTable {
    rows: Vec<MessageRow>,
}

impl ChatTable {
    /// Wraps already-built rows. Order is preserved as given.
    pub fn new(rows: Vec<MessageRow>) -> Self {
        Self { rows }
    }

    /// Assembles the table from parsed messages, deriving time fields for
    /// each. Row order equals input order.
    pub fn from_messages(messages: Vec<ParsedMessage>) -> Self {
        Self {
            rows: messages.into_iter().map(MessageRow::from_message).collect(),
        }
    }

    /// All rows, in source order.
    pub fn rows(&self) -> &[MessageRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates over rows in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, MessageRow> {
        self.rows.iter()
    }

    /// Rows matching a selection, in source order. `Overall` returns every
    /// row, including system notifications; collaborators that aggregate
    /// over humans must exclude those explicitly (see [`user_rows`](Self::user_rows)).
    pub fn select<'a>(&'a self, selection: &UserSelection) -> Vec<&'a MessageRow> {
        self.rows
            .iter()
            .filter(|row| selection.matches(&row.user))
            .collect()
    }

    /// Rows with a human sender: system notifications excluded.
    pub fn user_rows(&self) -> impl Iterator<Item = &MessageRow> {
        self.rows.iter().filter(|row| !row.is_system())
    }

    /// Distinct human senders in order of first appearance.
    pub fn users(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for row in self.user_rows() {
            if !seen.contains(&row.user.as_str()) {
                seen.push(&row.user);
            }
        }
        seen
    }

    /// Whether a sender appears in the table. `Overall` is always valid.
    pub fn contains_selection(&self, selection: &UserSelection) -> bool {
        match selection {
            UserSelection::Overall => true,
            UserSelection::User(name) => self.users().contains(&name.as_str()),
        }
    }
}

impl<'a> IntoIterator for &'a ChatTable {
    type Item = &'a MessageRow;
    type IntoIter = std::slice::Iter<'a, MessageRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::SYSTEM_SENDER;
    use chrono::NaiveDate;

    fn msg(sender: &str, body: &str, kind: MessageKind) -> ParsedMessage {
        ParsedMessage {
            timestamp: NaiveDate::from_ymd_opt(2023, 1, 12)
                .unwrap()
                .and_hms_opt(16, 5, 0),
            sender: sender.to_string(),
            body: body.to_string(),
            kind,
            is_media: kind == MessageKind::Media,
            timestamp_failed: false,
        }
    }

    fn sample_table() -> ChatTable {
        ChatTable::from_messages(vec![
            msg(SYSTEM_SENDER, "Alice created group \"Trip\"", MessageKind::System),
            msg("Alice", "Hello", MessageKind::User),
            msg("Bob", "<Media omitted>", MessageKind::Media),
            msg("Alice", "How are you?", MessageKind::User),
        ])
    }

    #[test]
    fn test_row_derives_time_fields() {
        let table = sample_table();
        let time = table.rows()[1].time().unwrap();
        assert_eq!(time.year, 2023);
        assert_eq!(time.period, "16-17");
    }

    #[test]
    fn test_select_overall_keeps_everything() {
        let table = sample_table();
        let selection = UserSelection::Overall;
        assert_eq!(table.select(&selection).len(), 4);
    }

    #[test]
    fn test_select_by_user() {
        let table = sample_table();
        let selection = UserSelection::parse("Alice");
        let rows = table.select(&selection);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.user == "Alice"));
    }

    #[test]
    fn test_users_excludes_sentinel_and_dedupes() {
        let table = sample_table();
        assert_eq!(table.users(), vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_user_rows_excludes_system() {
        let table = sample_table();
        assert_eq!(table.user_rows().count(), 3);
    }

    #[test]
    fn test_contains_selection() {
        let table = sample_table();
        assert!(table.contains_selection(&UserSelection::Overall));
        assert!(table.contains_selection(&UserSelection::parse("Bob")));
        assert!(!table.contains_selection(&UserSelection::parse("Mallory")));
        // The sentinel is not a selectable user.
        assert!(!table.contains_selection(&UserSelection::parse(SYSTEM_SENDER)));
    }

    #[test]
    fn test_selection_parse_roundtrip() {
        assert_eq!(UserSelection::parse("Overall"), UserSelection::Overall);
        assert_eq!(
            UserSelection::parse("Alice"),
            UserSelection::User("Alice".to_string())
        );
        assert_eq!(UserSelection::parse("Alice").to_string(), "Alice");
    }

    #[test]
    fn test_row_json_flattens_time_fields() {
        let table = sample_table();
        let json = serde_json::to_value(&table.rows()[1]).unwrap();
        assert_eq!(json["user"], "Alice");
        assert_eq!(json["month"], "January");
        assert_eq!(json["period"], "16-17");
    }
}
