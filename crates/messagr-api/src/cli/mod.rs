//! CLI command definitions for the `messagr` binary.
//!
//! Uses clap derive macros for argument parsing. Every command accepts
//! `--json` for machine-readable output.

pub mod conversations;
pub mod display;
pub mod index;
pub mod platforms;
pub mod query;
pub mod status;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use messagr_core::view::SortKey;
use messagr_types::platform::PlatformId;

/// Search and analyze your conversations across messaging platforms.
#[derive(Parser)]
#[command(name = "messagr", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export trace spans to stdout via OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    /// Endpoint base URL (overrides config.toml).
    #[arg(long, global = true, env = "MESSAGR_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Identity token sent to the endpoint (overrides config.toml).
    #[arg(long, global = true, env = "MESSAGR_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every platform with its connection status.
    Platforms,

    /// Connect a platform (prompts for missing credentials).
    Connect {
        /// Platform name (telegram, slack, discord, twitter, facebook, whatsapp).
        platform: PlatformId,

        /// Platform access token.
        #[arg(long = "platform-token")]
        platform_token: Option<String>,

        #[arg(long)]
        api_key: Option<String>,

        #[arg(long)]
        api_secret: Option<String>,

        /// OAuth redirect URI (Slack, Facebook).
        #[arg(long)]
        redirect_uri: Option<String>,
    },

    /// Disconnect a platform.
    Disconnect {
        platform: PlatformId,
    },

    /// Pull new messages for a platform into the endpoint's index.
    Sync {
        platform: PlatformId,
    },

    /// List conversations from every platform.
    #[command(alias = "ls")]
    Conversations {
        /// Only conversations whose name contains this text.
        #[arg(long)]
        filter: Option<String>,

        /// Only conversations on this platform.
        #[arg(long)]
        platform: Option<String>,

        /// Sort by name, platform, participants or last-activity.
        #[arg(long, default_value = "last-activity")]
        sort: SortKey,

        /// Ascending order (default is descending).
        #[arg(long)]
        asc: bool,
    },

    /// Show messages of one conversation, oldest first.
    Messages {
        conversation_id: String,

        /// Page size (defaults to config `page_size`).
        #[arg(long)]
        limit: Option<u32>,

        #[arg(long)]
        offset: Option<u32>,
    },

    /// Free-text query over all indexed messages.
    Query {
        text: String,
    },

    /// Filtered search over indexed messages.
    Search(query::SearchArgs),

    /// Ask the AI about your conversations.
    Ask {
        text: String,

        /// Restrict the question to one platform.
        #[arg(long)]
        platform: Option<String>,
    },

    /// AI analysis of a topic across conversations.
    Topic {
        topic: String,
    },

    /// AI-generated insights for one conversation.
    Insights {
        conversation_id: String,
    },

    /// Search index maintenance.
    Index {
        #[command(subcommand)]
        action: index::IndexCommand,
    },

    /// Connected platforms and conversation counts.
    Status,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
