//! # chatlens CLI
//!
//! Command-line interface for the chatlens library.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use chatlens::cli::{Args, OutputFormat};
use chatlens::config::ParserConfig;
use chatlens::output::{write_csv, write_json, write_jsonl};
use chatlens::stats;
use chatlens::{ChatParser, ChatlensError, ChatTable, UserSelection};

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ChatlensError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    let output_path = adjust_output_extension(&args.output, args.format);

    println!("🔍 chatlens v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input);
    if !args.no_table {
        println!("💾 Output:  {}", output_path);
        println!("📄 Format:  {}", args.format);
    }
    println!("👤 User:    {}", args.user);
    println!();

    // Parse
    println!("⏳ Parsing export...");
    let parse_start = Instant::now();
    let config = ParserConfig::new().with_month_first(args.month_first);
    let table = ChatParser::with_config(config).parse(Path::new(&args.input))?;
    println!(
        "   Found {} messages from {} senders ({:.2}s)",
        table.len(),
        table.users().len(),
        parse_start.elapsed().as_secs_f64()
    );

    let selection = UserSelection::parse(&args.user);
    if !table.contains_selection(&selection) {
        return Err(ChatlensError::unknown_user(&args.user));
    }

    // Write the table
    if !args.no_table {
        println!("💾 Writing {}...", args.format);
        let write_start = Instant::now();
        let path = Path::new(&output_path);
        match args.format {
            OutputFormat::Csv => write_csv(&table, path)?,
            OutputFormat::Json => write_json(&table, path)?,
            OutputFormat::Jsonl => write_jsonl(&table, path)?,
        }
        println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());
    }

    if args.stats {
        let stop_words = load_stop_words(args.stop_words.as_deref())?;
        print_stats(&selection, &table, &stop_words);
    }

    println!();
    println!(
        "✅ Done in {:.2}s",
        total_start.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Loads the stop-word set once; the stats functions take it by reference
/// rather than reading any global list.
fn load_stop_words(path: Option<&str>) -> Result<HashSet<String>, ChatlensError> {
    let Some(path) = path else {
        return Ok(HashSet::new());
    };
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|line| !line.is_empty())
        .collect())
}

fn print_stats(selection: &UserSelection, table: &ChatTable, stop_words: &HashSet<String>) {
    println!();
    println!("📊 Statistics for {}:", selection);

    let summary = stats::summary(selection, table);
    println!("   Messages:  {}", summary.messages);
    println!("   Words:     {}", summary.words);
    println!("   Media:     {}", summary.media);
    println!("   Links:     {}", summary.links);

    if matches!(selection, UserSelection::Overall) {
        println!();
        println!("🏆 Busiest senders:");
        for share in stats::busiest_users(table).iter().take(5) {
            println!(
                "   {:<20} {:>6} messages ({:.2}%)",
                share.user, share.messages, share.percent
            );
        }
    }

    match stats::most_common_words(selection, table, stop_words, 10) {
        stats::Analysis::Ready(words) => {
            println!();
            println!("🔤 Most common words:");
            for word in words {
                println!("   {:<20} {}", word.word, word.count);
            }
        }
        stats::Analysis::NotEnoughData => {
            println!();
            println!("🔤 Most common words: not enough data");
        }
    }

    let emoji = stats::emoji_counts(selection, table);
    if !emoji.is_empty() {
        println!();
        println!("😀 Top emoji:");
        for count in emoji.iter().take(5) {
            println!("   {}  {}", count.emoji, count.count);
        }
    }
}

/// Adjusts output file extension based on format if using default output.
fn adjust_output_extension(output: &str, format: OutputFormat) -> String {
    if output != "chat_table.csv" {
        return output.to_string();
    }
    format!("chat_table.{}", format.extension())
}
