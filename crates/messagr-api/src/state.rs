//! Application state wiring the façade to the HTTP transport.
//!
//! The façade is generic over `RemoteClient`; AppState pins it to the
//! concrete infra implementation.

use std::path::PathBuf;
use std::sync::Arc;

use secrecy::SecretString;

use messagr_core::Messagr;
use messagr_infra::config::{load_config, resolve_data_dir};
use messagr_infra::rpc::HttpRemoteClient;
use messagr_types::config::MessagrConfig;

pub type ConcreteMessagr = Messagr<HttpRemoteClient>;

/// Shared state for CLI commands.
#[derive(Clone)]
pub struct AppState {
    pub messagr: Arc<ConcreteMessagr>,
    pub config: MessagrConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load configuration, apply command-line overrides and build the façade.
    pub async fn init(endpoint: Option<String>, token: Option<String>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let mut config = load_config(&data_dir).await?;

        if let Some(url) = endpoint {
            config.endpoint.base_url = url;
        }
        if let Some(token) = token {
            config.endpoint.identity_token = Some(token);
        }

        let identity = config
            .endpoint
            .identity_token
            .take()
            .map(SecretString::from);
        tracing::debug!(
            base_url = %config.endpoint.base_url,
            authenticated = identity.is_some(),
            "connecting to endpoint"
        );

        let remote = HttpRemoteClient::new(&config.endpoint, identity)?;

        Ok(Self {
            messagr: Arc::new(Messagr::new(remote)),
            config,
            data_dir,
        })
    }
}
