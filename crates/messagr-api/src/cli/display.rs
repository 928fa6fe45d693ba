//! Shared terminal helpers: spinners, timestamps, warnings and tables.

use std::time::Duration;

use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use messagr_core::aggregator::PlatformDiagnostic;
use messagr_types::conversation::Message;

/// Spinner shown while waiting on the endpoint. Hidden in JSON mode.
pub fn spinner(message: &str, json: bool) -> ProgressBar {
    if json {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

pub fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).fg(Color::White))
            .collect::<Vec<_>>(),
    );
    table
}

/// One warning line per platform that failed to load.
pub fn print_diagnostics(diagnostics: &[PlatformDiagnostic]) {
    for diagnostic in diagnostics {
        eprintln!(
            "  {} {}: {}",
            style("!").yellow().bold(),
            style(diagnostic.platform).bold(),
            diagnostic.error
        );
    }
}

pub fn print_success(message: &str) {
    println!("  {} {message}", style("✓").green().bold());
}

pub fn print_info(message: &str) {
    println!();
    println!("  {} {message}", style("i").blue().bold());
    println!();
}

/// Human-friendly age of a Unix-seconds timestamp.
pub fn format_relative_time(timestamp: u64) -> String {
    let Some(dt) = chrono::DateTime::from_timestamp(timestamp as i64, 0) else {
        return "unknown".to_string();
    };
    let diff = chrono::Utc::now() - dt;

    if diff.num_minutes() < 1 {
        "just now".to_string()
    } else if diff.num_hours() < 1 {
        format!("{}m ago", diff.num_minutes())
    } else if diff.num_days() < 1 {
        format!("{}h ago", diff.num_hours())
    } else if diff.num_days() < 30 {
        format!("{}d ago", diff.num_days())
    } else {
        dt.format("%Y-%m-%d").to_string()
    }
}

pub fn format_timestamp(timestamp: u64) -> String {
    chrono::DateTime::from_timestamp(timestamp as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

pub fn format_bytes(n: u64) -> String {
    if n >= 1 << 30 {
        format!("{:.1} GiB", n as f64 / (1u64 << 30) as f64)
    } else if n >= 1 << 20 {
        format!("{:.1} MiB", n as f64 / (1u64 << 20) as f64)
    } else if n >= 1 << 10 {
        format!("{:.1} KiB", n as f64 / (1u64 << 10) as f64)
    } else {
        format!("{n} B")
    }
}

/// Messages as a table: time, platform, sender, text.
pub fn message_table(messages: &[Message]) -> Table {
    let mut table = new_table(&["Time", "Platform", "From", "Message"]);
    for message in messages {
        let mut text = message.content.text.clone();
        if message.edited {
            text.push_str(" (edited)");
        }
        if !message.content.attachments.is_empty() {
            text.push_str(&format!(" [{} attachment(s)]", message.content.attachments.len()));
        }
        table.add_row(vec![
            Cell::new(format_timestamp(message.timestamp)).fg(Color::DarkGrey),
            Cell::new(message.platform),
            Cell::new(&message.sender.name).fg(Color::Cyan),
            Cell::new(text),
        ]);
    }
    table
}
