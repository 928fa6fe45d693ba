//! Status dashboard: endpoint, connected platforms, conversation breakdown.

use anyhow::Result;
use console::style;

use messagr_core::view::platform_breakdown;

use crate::cli::display::{format_bytes, print_diagnostics, spinner};
use crate::state::AppState;

/// Display the status dashboard.
///
/// Index stats are optional: an endpoint that refuses them still gets a
/// dashboard.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let spinner = spinner("Gathering status...", json);
    let connected = state.messagr.registry().refresh().await;
    let aggregate = state.messagr.conversations().fetch_all().await;
    let index = state.messagr.queries().index_stats().await;
    spinner.finish_and_clear();

    let connected = connected?;
    let breakdown = platform_breakdown(&aggregate.conversations);

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "endpoint": state.config.endpoint.base_url,
            "data_dir": state.data_dir.display().to_string(),
            "connected": connected,
            "conversations": breakdown
                .iter()
                .map(|(p, n)| (p.to_string(), *n))
                .collect::<std::collections::BTreeMap<_, _>>(),
            "diagnostics": aggregate.diagnostics,
            "index": index.as_ref().ok(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Messagr v{}",
        style("⚡").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Platforms ──").dim());
    for (platform, count) in &breakdown {
        let marker = if connected.contains(platform) {
            style("●").green()
        } else {
            style("○").dim()
        };
        println!("  {marker} {:<10} {} conversation(s)", platform.as_str(), count);
    }
    print_diagnostics(&aggregate.diagnostics);
    println!();

    println!("  {}", style("── Index ──").dim());
    match &index {
        Ok(stats) => {
            println!("  Messages: {}", style(stats.message_count).bold());
            println!("  Size:     {}", format_bytes(stats.index_size_bytes));
        }
        Err(e) => println!("  {}", style(e).yellow()),
    }
    println!();

    println!("  {}", style("── System ──").dim());
    println!(
        "  Endpoint: {}",
        style(&state.config.endpoint.base_url).cyan()
    );
    println!(
        "  Data dir: {}",
        style(state.data_dir.display()).dim()
    );
    println!();

    Ok(())
}
