//! Table writers: CSV, JSON, and JSONL.
//!
//! Each format has a `to_*` function producing a `String` and a `write_*`
//! function writing to a file. Column order is fixed by the output
//! contract; timestamp-failed rows get empty time columns in CSV and omit
//! the time fields in JSON.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::error::Result;
use crate::table::{ChatTable, MessageRow};

/// CSV column order, the table's output contract.
const CSV_HEADER: [&str; 13] = [
    "timestamp",
    "user",
    "message",
    "kind",
    "is_media",
    "year",
    "month_num",
    "month",
    "day",
    "day_name",
    "hour",
    "period",
    "only_date",
];

/// Converts the table to a CSV string.
pub fn to_csv(table: &ChatTable) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(CSV_HEADER)?;
    for row in table {
        writer.write_record(csv_record(row))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| io::Error::other(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Writes the table to a CSV file.
pub fn write_csv(table: &ChatTable, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(CSV_HEADER)?;
    for row in table {
        writer.write_record(csv_record(row))?;
    }
    writer.flush()?;
    Ok(())
}

fn csv_record(row: &MessageRow) -> Vec<String> {
    let mut record = vec![
        row.timestamp
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default(),
        row.user.clone(),
        row.message.clone(),
        row.kind.as_str().to_string(),
        row.is_media.to_string(),
    ];
    match row.time() {
        Some(time) => {
            record.push(time.year.to_string());
            record.push(time.month_num.to_string());
            record.push(time.month.clone());
            record.push(time.day.to_string());
            record.push(time.day_name.clone());
            record.push(time.hour.to_string());
            record.push(time.period.clone());
            record.push(time.only_date.to_string());
        }
        None => record.extend(std::iter::repeat_n(String::new(), 8)),
    }
    record
}

/// Converts the table to a pretty-printed JSON array of rows.
pub fn to_json(table: &ChatTable) -> Result<String> {
    Ok(serde_json::to_string_pretty(table.rows())?)
}

/// Writes the table as a JSON array of rows.
pub fn write_json(table: &ChatTable, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    serde_json::to_writer_pretty(&mut file, table.rows())?;
    file.write_all(b"\n")?;
    Ok(())
}

/// Converts the table to JSON Lines: one row object per line.
pub fn to_jsonl(table: &ChatTable) -> Result<String> {
    let mut out = String::new();
    for row in table {
        out.push_str(&serde_json::to_string(row)?);
        out.push('\n');
    }
    Ok(out)
}

/// Writes the table as JSON Lines.
pub fn write_jsonl(table: &ChatTable, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    for row in table {
        serde_json::to_writer(&mut file, row)?;
        file.write_all(b"\n")?;
    }
    Ok(())
}
