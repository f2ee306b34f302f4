//! Analytics collaborators over the chat table.
//!
//! Every function here takes a [`UserSelection`] and a shared table
//! reference, filters into its own working set, and leaves the table
//! untouched. System notification rows (the sentinel sender) are excluded
//! from every aggregation except [`summary`], whose counts are raw totals
//! over the selection. Rows whose timestamp failed to parse are skipped by
//! time-based aggregations but still count toward totals.
//!
//! Collaborators that can legitimately run out of usable data return
//! [`Analysis::NotEnoughData`] instead of an empty value, so callers can
//! tell "no data" apart from a genuinely empty result.

use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::table::{ChatTable, MessageRow, UserSelection};

/// Weekday labels in heatmap row order.
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(?:https?://|www\.)\S+").unwrap())
}

fn month_name(month_num: u32) -> String {
    // month_num comes from chrono and is always 1-12.
    NaiveDate::from_ymd_opt(2000, month_num, 1)
        .map(|d| d.format("%B").to_string())
        .unwrap_or_default()
}

/// Outcome of a collaborator that needs a minimum amount of usable data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Analysis<T> {
    /// The computation ran over real data.
    Ready(T),
    /// Too few usable rows; nothing was computed.
    NotEnoughData,
}

impl<T> Analysis<T> {
    /// Converts to `Option`, discarding the distinction.
    pub fn ready(self) -> Option<T> {
        match self {
            Analysis::Ready(value) => Some(value),
            Analysis::NotEnoughData => None,
        }
    }

    /// Returns `true` when data was available.
    pub fn is_ready(&self) -> bool {
        matches!(self, Analysis::Ready(_))
    }
}

/// Selected rows with system notifications excluded.
fn human_rows<'a>(selection: &UserSelection, table: &'a ChatTable) -> Vec<&'a MessageRow> {
    table
        .iter()
        .filter(|row| !row.is_system() && selection.matches(&row.user))
        .collect()
}

// ============================================================================
// Summary statistics
// ============================================================================

/// Headline counts for a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    /// Total rows in the selection, system notifications included.
    pub messages: usize,
    /// Whitespace-separated words across all bodies.
    pub words: usize,
    /// Media placeholder rows.
    pub media: usize,
    /// URLs found in bodies.
    pub links: usize,
}

/// Computes headline counts over the selection.
pub fn summary(selection: &UserSelection, table: &ChatTable) -> Summary {
    let rows = table.select(selection);
    Summary {
        messages: rows.len(),
        words: rows
            .iter()
            .map(|row| row.message.split_whitespace().count())
            .sum(),
        media: rows.iter().filter(|row| row.is_media).count(),
        links: rows
            .iter()
            .map(|row| url_regex().find_iter(&row.message).count())
            .sum(),
    }
}

// ============================================================================
// Per-user activity
// ============================================================================

/// Message count and share for one sender.
#[derive(Debug, Clone, PartialEq)]
pub struct UserShare {
    pub user: String,
    pub messages: usize,
    /// Share of all human messages, percent rounded to two decimals.
    pub percent: f64,
}

/// Ranks human senders by message count, busiest first. Ties break by name
/// so the ordering is deterministic.
pub fn busiest_users(table: &ChatTable) -> Vec<UserShare> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut total = 0usize;
    for row in table.user_rows() {
        *counts.entry(row.user.as_str()).or_insert(0) += 1;
        total += 1;
    }

    let mut shares: Vec<UserShare> = counts
        .into_iter()
        .map(|(user, messages)| UserShare {
            user: user.to_string(),
            messages,
            percent: ((messages as f64 / total as f64) * 10_000.0).round() / 100.0,
        })
        .collect();
    shares.sort_by(|a, b| b.messages.cmp(&a.messages).then(a.user.cmp(&b.user)));
    shares
}

// ============================================================================
// Timelines
// ============================================================================

/// One month of activity: label `"January-2023"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelinePoint {
    pub label: String,
    pub messages: usize,
}

/// Message counts per calendar month, chronological.
pub fn monthly_timeline(selection: &UserSelection, table: &ChatTable) -> Vec<TimelinePoint> {
    let mut counts: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for row in human_rows(selection, table) {
        if let Some(time) = row.time() {
            *counts.entry((time.year, time.month_num)).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .map(|((year, month_num), messages)| TimelinePoint {
            label: format!("{}-{}", month_name(month_num), year),
            messages,
        })
        .collect()
}

/// One day of activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub messages: usize,
}

/// Message counts per day, chronological.
pub fn daily_timeline(selection: &UserSelection, table: &ChatTable) -> Vec<DailyPoint> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for row in human_rows(selection, table) {
        if let Some(time) = row.time() {
            *counts.entry(time.only_date).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .map(|(date, messages)| DailyPoint { date, messages })
        .collect()
}

// ============================================================================
// Activity maps
// ============================================================================

/// A labeled activity bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCount {
    pub label: String,
    pub messages: usize,
}

/// Message counts per weekday, Monday through Sunday. Empty weekdays are
/// included with a zero count.
pub fn week_activity(selection: &UserSelection, table: &ChatTable) -> Vec<ActivityCount> {
    let mut counts = [0usize; 7];
    for row in human_rows(selection, table) {
        if let Some(time) = row.time() {
            counts[time.only_date.weekday().num_days_from_monday() as usize] += 1;
        }
    }
    DAY_NAMES
        .iter()
        .zip(counts)
        .map(|(label, messages)| ActivityCount {
            label: (*label).to_string(),
            messages,
        })
        .collect()
}

/// Message counts per calendar month name, January through December.
/// Months with no activity are included with a zero count.
pub fn month_activity(selection: &UserSelection, table: &ChatTable) -> Vec<ActivityCount> {
    let mut counts = [0usize; 12];
    for row in human_rows(selection, table) {
        if let Some(time) = row.time() {
            counts[(time.month_num - 1) as usize] += 1;
        }
    }
    (1..=12)
        .zip(counts)
        .map(|(month_num, messages)| ActivityCount {
            label: month_name(month_num),
            messages,
        })
        .collect()
}

/// Weekday x period activity grid for heatmap rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heatmap {
    /// Row labels, Monday through Sunday.
    pub days: Vec<String>,
    /// Column labels, `"0-1"` through `"23-0"`.
    pub periods: Vec<String>,
    /// `counts[day][period]`, indexed to match the labels.
    pub counts: Vec<Vec<usize>>,
}

/// Buckets messages into a weekday x two-hour-period grid.
pub fn activity_heatmap(selection: &UserSelection, table: &ChatTable) -> Heatmap {
    let mut counts = vec![vec![0usize; 24]; 7];
    for row in human_rows(selection, table) {
        if let Some(time) = row.time() {
            let day = time.only_date.weekday().num_days_from_monday() as usize;
            counts[day][time.hour as usize] += 1;
        }
    }
    Heatmap {
        days: DAY_NAMES.iter().map(|d| (*d).to_string()).collect(),
        periods: (0..24).map(crate::timefeat::period_label).collect(),
        counts,
    }
}

// ============================================================================
// Content statistics
// ============================================================================

/// A word and its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// The most frequent words in the selection, lowercased, with the caller's
/// stop-word set removed. Media placeholder rows are skipped.
///
/// The stop-word set is an explicit parameter: load it once and pass it in,
/// there is no module-level word list.
pub fn most_common_words(
    selection: &UserSelection,
    table: &ChatTable,
    stop_words: &HashSet<String>,
    limit: usize,
) -> Analysis<Vec<WordCount>> {
    let rows: Vec<&MessageRow> = human_rows(selection, table)
        .into_iter()
        .filter(|row| !row.is_media)
        .collect();
    if rows.is_empty() {
        return Analysis::NotEnoughData;
    }

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for row in rows {
        for word in row.message.split_whitespace() {
            let word = word.to_lowercase();
            if !stop_words.contains(&word) {
                *counts.entry(word).or_insert(0) += 1;
            }
        }
    }

    let mut words: Vec<WordCount> = counts
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect();
    words.sort_by(|a, b| b.count.cmp(&a.count).then(a.word.cmp(&b.word)));
    words.truncate(limit);
    Analysis::Ready(words)
}

/// An emoji and its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiCount {
    pub emoji: String,
    pub count: usize,
}

/// Counts emoji characters across the selection's bodies, most frequent
/// first.
pub fn emoji_counts(selection: &UserSelection, table: &ChatTable) -> Vec<EmojiCount> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for row in human_rows(selection, table) {
        for ch in row.message.chars() {
            let s = ch.to_string();
            if emojis::get(&s).is_some() {
                *counts.entry(s).or_insert(0) += 1;
            }
        }
    }
    let mut result: Vec<EmojiCount> = counts
        .into_iter()
        .map(|(emoji, count)| EmojiCount { emoji, count })
        .collect();
    result.sort_by(|a, b| b.count.cmp(&a.count).then(a.emoji.cmp(&b.emoji)));
    result
}

// ============================================================================
// Conversation dynamics
// ============================================================================

/// Average reply latency for one sender.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseTime {
    pub user: String,
    pub avg_minutes: f64,
    pub samples: usize,
}

/// Average time each sender takes to reply to a different sender.
///
/// Walks rows in table order (which is file order, the property the table
/// guarantees): a sample is taken whenever the sender changes and both
/// timestamps are present. Non-positive deltas from slightly out-of-order
/// exports are skipped. Returns [`Analysis::NotEnoughData`] when no sample
/// exists.
pub fn response_times(table: &ChatTable) -> Analysis<Vec<ResponseTime>> {
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    let mut prev: Option<&MessageRow> = None;

    for row in table.user_rows() {
        if let Some(prev_row) = prev {
            if prev_row.user != row.user {
                if let (Some(a), Some(b)) = (prev_row.timestamp, row.timestamp) {
                    let minutes = (b - a).num_seconds() as f64 / 60.0;
                    if minutes > 0.0 {
                        let entry = sums.entry(row.user.as_str()).or_insert((0.0, 0));
                        entry.0 += minutes;
                        entry.1 += 1;
                    }
                }
            }
        }
        prev = Some(row);
    }

    if sums.is_empty() {
        return Analysis::NotEnoughData;
    }
    Analysis::Ready(
        sums.into_iter()
            .map(|(user, (total, samples))| ResponseTime {
                user: user.to_string(),
                avg_minutes: total / samples as f64,
                samples,
            })
            .collect(),
    )
}

/// Average message size for one sender.
#[derive(Debug, Clone, PartialEq)]
pub struct LengthStats {
    pub user: String,
    pub avg_chars: f64,
    pub avg_words: f64,
    pub messages: usize,
}

/// Average body length (in characters and words) per sender.
pub fn message_length(selection: &UserSelection, table: &ChatTable) -> Analysis<Vec<LengthStats>> {
    let mut sums: BTreeMap<&str, (usize, usize, usize)> = BTreeMap::new();
    for row in human_rows(selection, table) {
        let entry = sums.entry(row.user.as_str()).or_insert((0, 0, 0));
        entry.0 += row.message.chars().count();
        entry.1 += row.message.split_whitespace().count();
        entry.2 += 1;
    }

    if sums.is_empty() {
        return Analysis::NotEnoughData;
    }
    Analysis::Ready(
        sums.into_iter()
            .map(|(user, (chars, words, messages))| LengthStats {
                user: user.to_string(),
                avg_chars: chars as f64 / messages as f64,
                avg_words: words as f64 / messages as f64,
                messages,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ChatParser;

    const SAMPLE: &str = "\
12/1/23, 4:00 PM - Messages and calls are end-to-end encrypted.
12/1/23, 4:05 PM - Alice: Hello Bob
12/1/23, 4:07 PM - Bob: Hi Alice, see https://example.com
12/1/23, 4:09 PM - Alice: <Media omitted>
13/1/23, 9:00 AM - Bob: Good morning \u{1F600}
13/1/23, 9:01 AM - Alice: morning morning";

    fn table() -> ChatTable {
        ChatParser::new().parse_str(SAMPLE)
    }

    #[test]
    fn test_summary_overall() {
        let s = summary(&UserSelection::Overall, &table());
        assert_eq!(s.messages, 6);
        assert_eq!(s.media, 1);
        assert_eq!(s.links, 1);
    }

    #[test]
    fn test_summary_single_user() {
        let s = summary(&UserSelection::parse("Alice"), &table());
        assert_eq!(s.messages, 3);
        assert_eq!(s.media, 1);
        assert_eq!(s.links, 0);
    }

    #[test]
    fn test_busiest_users_excludes_sentinel() {
        let shares = busiest_users(&table());
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].user, "Alice");
        assert_eq!(shares[0].messages, 3);
        assert_eq!(shares[0].percent, 60.0);
        assert_eq!(shares[1].user, "Bob");
        assert_eq!(shares[1].percent, 40.0);
    }

    #[test]
    fn test_monthly_timeline() {
        let timeline = monthly_timeline(&UserSelection::Overall, &table());
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].label, "January-2023");
        // System notification excluded.
        assert_eq!(timeline[0].messages, 5);
    }

    #[test]
    fn test_daily_timeline_chronological() {
        let timeline = daily_timeline(&UserSelection::Overall, &table());
        assert_eq!(timeline.len(), 2);
        assert!(timeline[0].date < timeline[1].date);
        assert_eq!(timeline[0].messages, 3);
        assert_eq!(timeline[1].messages, 2);
    }

    #[test]
    fn test_week_activity_has_all_days() {
        let activity = week_activity(&UserSelection::Overall, &table());
        assert_eq!(activity.len(), 7);
        assert_eq!(activity[0].label, "Monday");
        // 2023-01-12 is a Thursday, 2023-01-13 a Friday.
        assert_eq!(activity[3].messages, 3);
        assert_eq!(activity[4].messages, 2);
    }

    #[test]
    fn test_heatmap_shape() {
        let heatmap = activity_heatmap(&UserSelection::Overall, &table());
        assert_eq!(heatmap.days.len(), 7);
        assert_eq!(heatmap.periods.len(), 24);
        assert_eq!(heatmap.periods[23], "23-0");
        // Thursday 16:00 block has the three afternoon messages.
        assert_eq!(heatmap.counts[3][16], 3);
    }

    #[test]
    fn test_most_common_words_respects_stop_words() {
        let stop_words: HashSet<String> = ["hi", "hello"].iter().map(|s| s.to_string()).collect();
        let words = most_common_words(&UserSelection::Overall, &table(), &stop_words, 5)
            .ready()
            .unwrap();
        assert_eq!(words[0].word, "morning");
        assert_eq!(words[0].count, 3);
        assert!(!words.iter().any(|w| w.word == "hello"));
    }

    #[test]
    fn test_most_common_words_empty_selection() {
        let stop_words = HashSet::new();
        let outcome = most_common_words(
            &UserSelection::parse("Mallory"),
            &table(),
            &stop_words,
            5,
        );
        assert_eq!(outcome, Analysis::NotEnoughData);
    }

    #[test]
    fn test_emoji_counts() {
        let counts = emoji_counts(&UserSelection::Overall, &table());
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].emoji, "\u{1F600}");
        assert_eq!(counts[0].count, 1);
    }

    #[test]
    fn test_response_times() {
        let times = response_times(&table()).ready().unwrap();
        // Bob replies at 4:07 (2 min) and 9:00 next day; Alice at 4:09 and 9:01.
        let bob = times.iter().find(|t| t.user == "Bob").unwrap();
        assert_eq!(bob.samples, 2);
        assert!(bob.avg_minutes > 1.0);
    }

    #[test]
    fn test_response_times_not_enough_data() {
        let table = ChatParser::new().parse_str("12/1/23, 4:05 PM - Alice: solo");
        assert_eq!(response_times(&table), Analysis::NotEnoughData);
    }

    #[test]
    fn test_message_length() {
        let stats = message_length(&UserSelection::parse("Bob"), &table())
            .ready()
            .unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].messages, 2);
        assert!(stats[0].avg_words > 0.0);
    }
}
