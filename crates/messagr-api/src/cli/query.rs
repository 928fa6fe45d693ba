//! Query commands: free text, filtered search, AI questions, topic analysis
//! and conversation insights.

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color};
use console::style;

use messagr_types::insights::ConversationInsights;
use messagr_types::query::{QueryFilter, QueryResult};

use crate::cli::display::{message_table, new_table, print_info, spinner};
use crate::state::AppState;

/// Filters for `messagr search`.
#[derive(Args)]
pub struct SearchArgs {
    pub text: String,

    /// Only messages from this platform.
    #[arg(long)]
    pub platform: Option<String>,

    /// Only messages at or after this Unix timestamp.
    #[arg(long)]
    pub from: Option<i64>,

    /// Only messages at or before this Unix timestamp.
    #[arg(long)]
    pub to: Option<i64>,

    #[arg(long)]
    pub conversation: Option<String>,

    #[arg(long)]
    pub sender: Option<String>,

    /// Filter on attachments; `--has-attachments` alone means true.
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub has_attachments: Option<bool>,

    /// Only attachments of this type (image, file, link...).
    #[arg(long)]
    pub attachment_type: Option<String>,

    /// Filter on replies; `--replies=false` excludes them.
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub replies: Option<bool>,

    /// Filter on thread membership.
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub threads: Option<bool>,

    /// Filter on edited messages.
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub edited: Option<bool>,

    /// Sort field (defaults to config `sort_by`).
    #[arg(long)]
    pub sort_by: Option<String>,

    /// asc or desc (defaults to config `sort_direction`).
    #[arg(long)]
    pub direction: Option<String>,

    /// Maximum results (defaults to config `search_limit`).
    #[arg(long)]
    pub limit: Option<u32>,

    #[arg(long)]
    pub offset: Option<u32>,
}

impl SearchArgs {
    /// Build the façade filter, filling unset values from config defaults.
    pub fn into_filter(self, state: &AppState) -> QueryFilter {
        let defaults = &state.config.defaults;
        QueryFilter {
            query: self.text,
            platform: self.platform,
            start_time: self.from,
            end_time: self.to,
            conversation_id: self.conversation,
            sender_id: self.sender,
            has_attachments: self.has_attachments,
            attachment_type: self.attachment_type,
            is_reply: self.replies,
            in_thread: self.threads,
            is_edited: self.edited,
            sort_by: self.sort_by.unwrap_or_else(|| defaults.sort_by.clone()),
            sort_direction: self
                .direction
                .unwrap_or_else(|| defaults.sort_direction.clone()),
            limit: Some(self.limit.unwrap_or(defaults.search_limit)),
            offset: self.offset,
        }
    }
}

pub async fn query(state: &AppState, text: &str, json: bool) -> Result<()> {
    let spinner = spinner("Searching...", json);
    let result = state.messagr.queries().simple_query(text).await;
    spinner.finish_and_clear();
    print_result(&result?, json)
}

pub async fn search(state: &AppState, args: SearchArgs, json: bool) -> Result<()> {
    let filter = args.into_filter(state);
    let spinner = spinner("Searching...", json);
    let result = state.messagr.queries().advanced_search(&filter).await;
    spinner.finish_and_clear();
    print_result(&result?, json)
}

pub async fn ask(state: &AppState, text: &str, platform: Option<&str>, json: bool) -> Result<()> {
    let spinner = spinner("Thinking...", json);
    let result = state.messagr.queries().ai_query(text, platform).await;
    spinner.finish_and_clear();
    print_result(&result?, json)
}

pub async fn topic(state: &AppState, topic: &str, json: bool) -> Result<()> {
    let spinner = spinner(&format!("Analyzing '{topic}'..."), json);
    let analysis = state.messagr.queries().analyze_topic(topic).await;
    spinner.finish_and_clear();
    let analysis = analysis?;

    if json {
        println!("{}", serde_json::json!({ "topic": topic, "analysis": analysis }));
        return Ok(());
    }

    println!();
    println!("  {}", style(format!("── {topic} ──")).dim());
    println!();
    for line in analysis.lines() {
        println!("  {line}");
    }
    println!();
    Ok(())
}

pub async fn insights(state: &AppState, conversation_id: &str, json: bool) -> Result<()> {
    let spinner = spinner("Generating insights...", json);
    let insights = state
        .messagr
        .queries()
        .conversation_insights(conversation_id)
        .await;
    spinner.finish_and_clear();
    let insights = insights?;

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
        return Ok(());
    }

    print_insights(&insights);
    Ok(())
}

fn print_result(result: &QueryResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    if !result.context.is_empty() {
        println!();
        for line in result.context.lines() {
            println!("  {line}");
        }
    }

    if result.messages.is_empty() {
        print_info("No matching messages.");
        return Ok(());
    }

    println!();
    println!("{}", message_table(&result.messages));
    println!("  {} match(es)", style(result.messages.len()).bold());
    println!();
    Ok(())
}

fn print_insights(insights: &ConversationInsights) {
    println!();

    if !insights.topics.is_empty() {
        println!("  {}", style("── Topics ──").dim());
        let mut table = new_table(&["Topic", "Relevance", "Messages", "Summary"]);
        for topic in &insights.topics {
            table.add_row(vec![
                Cell::new(&topic.name).fg(Color::Cyan),
                Cell::new(format!("{:.0}%", topic.relevance_score * 100.0)),
                Cell::new(topic.message_count),
                Cell::new(&topic.summary),
            ]);
        }
        println!("{table}");
        println!();
    }

    if !insights.entities.is_empty() {
        println!("  {}", style("── Entities ──").dim());
        for entity in &insights.entities {
            println!(
                "  {} {} ({:?}, {} mention(s))",
                style("•").dim(),
                style(&entity.name).bold(),
                entity.entity_type,
                entity.mentions
            );
        }
        println!();
    }

    if let Some(sentiment) = &insights.sentiment {
        println!("  {}", style("── Sentiment ──").dim());
        println!("  Overall: {:+.2}", sentiment.overall_sentiment);
        for point in &sentiment.key_positive_points {
            println!("  {} {point}", style("+").green());
        }
        for point in &sentiment.key_negative_points {
            println!("  {} {point}", style("-").red());
        }
        println!();
    }

    if let Some(flow) = &insights.conversation_flow {
        if !flow.key_decisions.is_empty() {
            println!("  {}", style("── Decisions ──").dim());
            for decision in &flow.key_decisions {
                println!("  {} {decision}", style("•").dim());
            }
            println!();
        }
        if !flow.action_items.is_empty() {
            println!("  {}", style("── Action items ──").dim());
            for item in &flow.action_items {
                println!("  {} {item}", style("□").yellow());
            }
            println!();
        }
    }

    if let Some(timeline) = &insights.timeline {
        if !timeline.is_empty() {
            println!("  {}", style("── Timeline ──").dim());
            for event in timeline {
                println!(
                    "  {}  {}",
                    style(crate::cli::display::format_timestamp(event.timestamp)).dim(),
                    event.description
                );
            }
            println!();
        }
    }
}
