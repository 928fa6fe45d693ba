//! Conversation list and message view.

use anyhow::Result;
use comfy_table::{Cell, Color};
use console::style;

use messagr_core::view::{
    PresentationOptions, SortDirection, SortKey, compose_presentation,
    sort_messages_chronologically,
};

use crate::cli::display::{
    format_relative_time, message_table, new_table, print_diagnostics, print_info, spinner,
};
use crate::state::AppState;

/// Fetch conversations from every platform and show the filtered, sorted list.
///
/// Platforms that fail to load are reported as warnings; the rest is shown.
pub async fn list_conversations(
    state: &AppState,
    filter: Option<String>,
    platform: Option<String>,
    sort: SortKey,
    ascending: bool,
    json: bool,
) -> Result<()> {
    let spinner = spinner("Loading conversations...", json);
    let aggregate = state.messagr.conversations().fetch_all().await;
    spinner.finish_and_clear();

    let options = PresentationOptions {
        text_filter: filter.unwrap_or_default(),
        platform_filter: platform.unwrap_or_default(),
        sort_key: sort,
        sort_direction: if ascending {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        },
    };
    let conversations = compose_presentation(&aggregate.conversations, &options);

    if json {
        let out = serde_json::json!({
            "conversations": conversations,
            "diagnostics": aggregate.diagnostics,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print_diagnostics(&aggregate.diagnostics);

    if conversations.is_empty() {
        print_info(&format!(
            "No conversations found. Connect a platform with: {}",
            style("messagr connect <platform>").yellow()
        ));
        return Ok(());
    }

    let mut table = new_table(&["Name", "Platform", "Participants", "Last Activity", "ID"]);
    for conversation in &conversations {
        let last_activity = match conversation.last_message_at {
            Some(ts) => format_relative_time(ts),
            None => "never".to_string(),
        };
        table.add_row(vec![
            Cell::new(&conversation.name).fg(Color::Cyan),
            Cell::new(conversation.platform),
            Cell::new(conversation.participants.len()),
            Cell::new(last_activity).fg(Color::DarkGrey),
            Cell::new(&conversation.id).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!(
        "  {} conversation(s)",
        style(conversations.len()).bold()
    );
    println!();
    Ok(())
}

/// Show one page of a conversation's messages, oldest first.
pub async fn show_messages(
    state: &AppState,
    conversation_id: &str,
    limit: Option<u32>,
    offset: Option<u32>,
    json: bool,
) -> Result<()> {
    let limit = limit.unwrap_or(state.config.defaults.page_size);
    let offset = offset.unwrap_or(0);

    let spinner = spinner("Loading messages...", json);
    let messages = state
        .messagr
        .queries()
        .get_messages(conversation_id, Some(limit), Some(offset))
        .await;
    spinner.finish_and_clear();
    let messages = sort_messages_chronologically(messages?);

    if json {
        println!("{}", serde_json::to_string_pretty(&messages)?);
        return Ok(());
    }

    if messages.is_empty() {
        print_info("No messages in this range.");
        return Ok(());
    }

    println!();
    println!("{}", message_table(&messages));
    println!(
        "  {} message(s), offset {}",
        style(messages.len()).bold(),
        offset
    );
    println!();
    Ok(())
}
