//! Derived calendar fields computed from a message timestamp.
//!
//! Every downstream aggregation (timelines, activity maps, heatmaps) works
//! from these precomputed fields rather than re-deriving them from the raw
//! timestamp. Derivation is a pure function: no I/O, no state.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Calendar fields derived from one timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeFeatures {
    /// Calendar year.
    pub year: i32,
    /// Numeric month, 1-12.
    pub month_num: u32,
    /// Full English month name ("January").
    pub month: String,
    /// Day of month, 1-31.
    pub day: u32,
    /// Full English weekday name ("Monday").
    pub day_name: String,
    /// Hour of day, 0-23.
    pub hour: u32,
    /// Heatmap bucket label for the hour, see [`period_label`].
    pub period: String,
    /// Date without the time component, for daily bucketing.
    pub only_date: NaiveDate,
}

impl TimeFeatures {
    /// Expands a timestamp into its derived fields.
    pub fn derive(ts: NaiveDateTime) -> Self {
        Self {
            year: ts.year(),
            month_num: ts.month(),
            month: ts.format("%B").to_string(),
            day: ts.day(),
            day_name: ts.format("%A").to_string(),
            hour: ts.hour(),
            period: period_label(ts.hour()),
            only_date: ts.date(),
        }
    }
}

/// Hour-range label used for heatmap bucketing.
///
/// The block containing hour `h` is labeled `"h-(h+1)"`; the 23:00 block
/// wraps to `"23-0"`.
pub fn period_label(hour: u32) -> String {
    match hour {
        23 => "23-0".to_string(),
        h => format!("{}-{}", h, h + 1),
    }
}
