//! Command-line interface definition using clap.

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Parse a WhatsApp chat export into an analytics-ready message table.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens chat.txt
    chatlens chat.txt -o table.json --format json
    chatlens chat.txt --user Alice --stats
    chatlens chat.txt --stats --stop-words stop_words.txt
    chatlens chat.txt --month-first")]
pub struct Args {
    /// Path to the exported chat TXT file
    pub input: String,

    /// Path to output file
    #[arg(short, long, default_value = "chat_table.csv")]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Restrict analysis to one sender ("Overall" for everyone)
    #[arg(long, value_name = "USER", default_value = "Overall")]
    pub user: String,

    /// Print summary statistics for the selection
    #[arg(long)]
    pub stats: bool,

    /// File with one stop word per line, used by the common-words report
    #[arg(long, value_name = "FILE")]
    pub stop_words: Option<String>,

    /// Prefer month-first (US) date order for ambiguous dates
    #[arg(long)]
    pub month_first: bool,

    /// Skip writing the table file (useful with --stats)
    #[arg(long)]
    pub no_table: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma-separated values with the full column set
    Csv,
    /// Pretty-printed JSON array of rows
    Json,
    /// JSON Lines: one row object per line
    Jsonl,
}

impl OutputFormat {
    /// Returns the conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OutputFormat::Csv => "CSV",
            OutputFormat::Json => "JSON",
            OutputFormat::Jsonl => "JSONL",
        };
        f.write_str(name)
    }
}
