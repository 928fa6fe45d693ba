//! Platform lifecycle commands: list, connect, disconnect, sync.

use anyhow::{Result, bail};
use comfy_table::{Cell, Color};
use console::style;
use dialoguer::{Input, Password};

use messagr_types::platform::{AuthConfig, CredentialField, LinkState, PlatformId};

use crate::cli::display::{new_table, print_success, spinner};
use crate::state::AppState;

/// Credentials given on the command line; anything missing is prompted for.
pub struct CredentialArgs {
    pub token: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub redirect_uri: Option<String>,
}

/// List every platform with its current link state.
pub async fn list_platforms(state: &AppState, json: bool) -> Result<()> {
    let registry = state.messagr.registry();
    let spinner = spinner("Loading platforms...", json);
    let refreshed = registry.refresh().await;
    spinner.finish_and_clear();
    refreshed?;

    let statuses = registry.statuses().await;

    if json {
        let list: Vec<_> = statuses
            .iter()
            .map(|(platform, status)| {
                serde_json::json!({
                    "platform": platform,
                    "status": status,
                    "required_credentials": platform
                        .required_credentials()
                        .iter()
                        .map(|f| f.as_str())
                        .collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    let mut table = new_table(&["Platform", "Status", "Credentials"]);
    for (platform, status) in &statuses {
        let status_cell = match status {
            LinkState::Connected => Cell::new("● connected").fg(Color::Green),
            LinkState::Connecting | LinkState::Disconnecting => {
                Cell::new(format!("◐ {status}")).fg(Color::Yellow)
            }
            LinkState::Disconnected => Cell::new("○ disconnected").fg(Color::DarkGrey),
        };
        let credentials = platform
            .required_credentials()
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(platform).fg(Color::Cyan),
            status_cell,
            Cell::new(credentials).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    Ok(())
}

/// Connect a platform, prompting for any required credential not supplied.
pub async fn connect(
    state: &AppState,
    platform: PlatformId,
    args: CredentialArgs,
    json: bool,
) -> Result<()> {
    let mut config = AuthConfig::new(platform, args.token.unwrap_or_default());
    config.api_key = args.api_key;
    config.api_secret = args.api_secret;
    config.redirect_uri = args.redirect_uri;

    let missing = config.missing_credentials();
    if !missing.is_empty() {
        if json || !console::Term::stdout().is_term() {
            let names: Vec<&str> = missing.iter().map(|f| f.as_str()).collect();
            bail!("{platform} needs: {}", names.join(", "));
        }
        for field in missing {
            let value = prompt_credential(platform, field)?;
            config.set_field(field, value);
        }
    }

    let spinner = spinner(&format!("Connecting {platform}..."), json);
    let result = state.messagr.registry().connect(&config).await;
    spinner.finish_and_clear();
    let result = result?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "platform": platform,
                "result": result,
                "connected": state.messagr.registry().connected().await,
            })
        );
    } else {
        print_success(&format!("{} ({})", style(platform).bold(), result));
    }
    Ok(())
}

fn prompt_credential(platform: PlatformId, field: CredentialField) -> Result<String> {
    let prompt = format!("{} {}", platform, field.label());
    let value = if field.is_secret() {
        Password::new().with_prompt(prompt).interact()?
    } else {
        Input::<String>::new().with_prompt(prompt).interact_text()?
    };
    Ok(value)
}

pub async fn disconnect(state: &AppState, platform: PlatformId, json: bool) -> Result<()> {
    let spinner = spinner(&format!("Disconnecting {platform}..."), json);
    let removed = state.messagr.registry().disconnect(platform).await;
    spinner.finish_and_clear();
    let removed = removed?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "platform": platform,
                "disconnected": removed,
                "connected": state.messagr.registry().connected().await,
            })
        );
    } else if removed {
        print_success(&format!("{} disconnected", style(platform).bold()));
    } else {
        println!(
            "  {} {} was not connected",
            style("i").blue().bold(),
            style(platform).bold()
        );
    }
    Ok(())
}

pub async fn sync(state: &AppState, platform: PlatformId, json: bool) -> Result<()> {
    let spinner = spinner(&format!("Syncing {platform}..."), json);
    let summary = state.messagr.registry().sync(platform).await;
    spinner.finish_and_clear();
    let summary = summary?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_success(&format!(
            "{}: {} new message(s)",
            style(platform).bold(),
            style(summary.synced).cyan()
        ));
    }
    Ok(())
}
