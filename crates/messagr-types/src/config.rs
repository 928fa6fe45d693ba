//! Configuration types for Messagr.
//!
//! `MessagrConfig` represents `config.toml` in the data directory: where the
//! endpoint lives and which defaults the front end applies to queries. All
//! fields have sensible defaults, so an empty or missing file is valid.

use serde::{Deserialize, Serialize};

use crate::query::{DEFAULT_SORT_BY, DEFAULT_SORT_DIRECTION};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessagrConfig {
    #[serde(default)]
    pub endpoint: EndpointConfig,

    #[serde(default)]
    pub defaults: QueryDefaults,
}

/// How to reach the remote endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Base URL; calls go to `{base_url}/rpc/{method}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout enforced by the transport.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Caller identity token sent as a bearer credential.
    #[serde(default)]
    pub identity_token: Option<String>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:4943".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            identity_token: None,
        }
    }
}

/// Defaults the front end fills in before calling the façade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryDefaults {
    /// Messages fetched per page in the message view.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Result limit for advanced search.
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,

    #[serde(default = "default_sort_by")]
    pub sort_by: String,

    #[serde(default = "default_sort_direction")]
    pub sort_direction: String,
}

fn default_page_size() -> u32 {
    100
}

fn default_search_limit() -> u32 {
    50
}

fn default_sort_by() -> String {
    DEFAULT_SORT_BY.to_string()
}

fn default_sort_direction() -> String {
    DEFAULT_SORT_DIRECTION.to_string()
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            search_limit: default_search_limit(),
            sort_by: default_sort_by(),
            sort_direction: default_sort_direction(),
        }
    }
}
