//! Search index maintenance: stats, optimize, rebuild.

use anyhow::{Result, bail};
use clap::Subcommand;
use console::style;
use dialoguer::Confirm;

use crate::cli::display::{format_bytes, format_relative_time, print_success, spinner};
use crate::state::AppState;

#[derive(Subcommand)]
pub enum IndexCommand {
    /// Show index statistics.
    Stats,

    /// Compact the search indices.
    Optimize,

    /// Drop and rebuild the search indices from stored messages.
    Rebuild {
        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}

pub async fn handle_index_command(state: &AppState, action: IndexCommand, json: bool) -> Result<()> {
    match action {
        IndexCommand::Stats => stats(state, json).await,
        IndexCommand::Optimize => optimize(state, json).await,
        IndexCommand::Rebuild { force } => rebuild(state, force, json).await,
    }
}

async fn stats(state: &AppState, json: bool) -> Result<()> {
    let stats = state.messagr.queries().index_stats().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    let coverage = if stats.message_count == 0 {
        100.0
    } else {
        stats.indexed_count as f64 * 100.0 / stats.message_count as f64
    };

    println!();
    println!("  {}", style("── Index ──").dim());
    println!("  Messages:  {}", style(stats.message_count).bold());
    println!(
        "  Indexed:   {} ({coverage:.1}%)",
        style(stats.indexed_count).bold()
    );
    println!("  Size:      {}", format_bytes(stats.index_size_bytes));
    println!(
        "  Optimized: {}",
        stats
            .last_optimization
            .map(format_relative_time)
            .unwrap_or_else(|| "never".to_string())
    );
    println!();
    Ok(())
}

async fn optimize(state: &AppState, json: bool) -> Result<()> {
    let spinner = spinner("Optimizing indices...", json);
    let done = state.messagr.queries().optimize_indices().await;
    spinner.finish_and_clear();
    report("optimize", done?, json)
}

async fn rebuild(state: &AppState, force: bool, json: bool) -> Result<()> {
    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt("Rebuild all search indices? Searches may be incomplete until it finishes")
            .default(false)
            .interact()?;
        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    let spinner = spinner("Rebuilding indices...", json);
    let done = state.messagr.queries().rebuild_indices().await;
    spinner.finish_and_clear();
    report("rebuild", done?, json)
}

fn report(operation: &str, done: bool, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::json!({ "operation": operation, "ok": done }));
        return Ok(());
    }
    if !done {
        bail!("endpoint declined to {operation} the indices");
    }
    print_success(&format!("Index {operation} complete"));
    Ok(())
}
