//! Messagr CLI entry point.
//!
//! Binary name: `messagr`
//!
//! Parses CLI arguments, loads configuration, wires the façade to the HTTP
//! endpoint, then dispatches to the command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,messagr=debug",
        _ => "trace",
    };
    if let Err(e) = messagr_observe::init_tracing(filter, cli.otel) {
        eprintln!("Warning: tracing setup failed: {e}");
    }

    let result = run(cli).await;
    messagr_observe::shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "messagr", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(cli.endpoint, cli.token).await?;
    let json = cli.json;

    match cli.command {
        Commands::Platforms => cli::platforms::list_platforms(&state, json).await?,

        Commands::Connect {
            platform,
            platform_token,
            api_key,
            api_secret,
            redirect_uri,
        } => {
            let args = cli::platforms::CredentialArgs {
                token: platform_token,
                api_key,
                api_secret,
                redirect_uri,
            };
            cli::platforms::connect(&state, platform, args, json).await?;
        }

        Commands::Disconnect { platform } => {
            cli::platforms::disconnect(&state, platform, json).await?;
        }

        Commands::Sync { platform } => cli::platforms::sync(&state, platform, json).await?,

        Commands::Conversations {
            filter,
            platform,
            sort,
            asc,
        } => {
            cli::conversations::list_conversations(&state, filter, platform, sort, asc, json)
                .await?;
        }

        Commands::Messages {
            conversation_id,
            limit,
            offset,
        } => {
            cli::conversations::show_messages(&state, &conversation_id, limit, offset, json)
                .await?;
        }

        Commands::Query { text } => cli::query::query(&state, &text, json).await?,

        Commands::Search(args) => cli::query::search(&state, args, json).await?,

        Commands::Ask { text, platform } => {
            cli::query::ask(&state, &text, platform.as_deref(), json).await?;
        }

        Commands::Topic { topic } => cli::query::topic(&state, &topic, json).await?,

        Commands::Insights { conversation_id } => {
            cli::query::insights(&state, &conversation_id, json).await?;
        }

        Commands::Index { action } => {
            cli::index::handle_index_command(&state, action, json).await?;
        }

        Commands::Status => cli::status::status(&state, json).await?,

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
