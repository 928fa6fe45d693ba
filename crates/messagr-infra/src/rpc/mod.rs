//! HttpRemoteClient -- [`RemoteClient`] over the endpoint's HTTP RPC surface.
//!
//! Every operation is a `POST {base_url}/rpc/{method}` whose body is the JSON
//! array of positional arguments. The identity token, when configured, is
//! sent as a bearer token and held in a [`SecretString`] so it never shows up
//! in logs. No retries; the request timeout comes from configuration.

pub mod wire;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::Instrument;
use uuid::Uuid;

use messagr_core::remote::{RemoteClient, RemoteResult};
use messagr_observe::attrs;
use messagr_types::config::EndpointConfig;
use messagr_types::conversation::{Conversation, Message};
use messagr_types::insights::{ConversationInsights, IndexStats};
use messagr_types::platform::{AuthConfig, ConnectResult, PlatformId};
use messagr_types::query::{AdvancedSearchRequest, QueryResult};

use self::wire::{decode_bare, decode_tagged, rpc_url, status_error, transport_error};

pub struct HttpRemoteClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<SecretString>,
}

// No Debug: the token must never be printed.

impl HttpRemoteClient {
    pub fn new(endpoint: &EndpointConfig, token: Option<SecretString>) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(endpoint.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: endpoint.base_url.clone(),
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST one call and return the reply body.
    async fn send(&self, method: &'static str, args: Value) -> RemoteResult<Value> {
        let request_id = Uuid::now_v7();
        let span = tracing::debug_span!(
            "rpc",
            messagr.rpc.method = method,
            messagr.rpc.request_id = %request_id,
            messagr.rpc.status = tracing::field::Empty,
            messagr.rpc.outcome = tracing::field::Empty,
        );

        async move {
            let mut request = self
                .client
                .post(rpc_url(&self.base_url, method))
                .header("x-request-id", request_id.to_string())
                .json(&args);
            if let Some(token) = &self.token {
                request = request.bearer_auth(token.expose_secret());
            }

            let current = tracing::Span::current();
            let response = request.send().await.map_err(|e| {
                current.record(attrs::RPC_OUTCOME, attrs::OUTCOME_TRANSPORT);
                tracing::debug!(error = %e, "request failed");
                transport_error(e)
            })?;

            let status = response.status();
            current.record(attrs::RPC_STATUS, status.as_u16());
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                current.record(attrs::RPC_OUTCOME, attrs::OUTCOME_TRANSPORT);
                return Err(status_error(status.as_u16(), &body));
            }

            response.json::<Value>().await.map_err(|e| {
                current.record(attrs::RPC_OUTCOME, attrs::OUTCOME_TRANSPORT);
                transport_error(format!("unreadable body: {e}"))
            })
        }
        .instrument(span)
        .await
    }

    async fn call<T: DeserializeOwned>(&self, method: &'static str, args: Value) -> RemoteResult<T> {
        let body = self.send(method, args).await?;
        let result = decode_tagged(body);
        let outcome = if result.is_ok() {
            attrs::OUTCOME_OK
        } else {
            attrs::OUTCOME_ERR
        };
        tracing::debug!(method, outcome, "rpc reply");
        result
    }
}

impl RemoteClient for HttpRemoteClient {
    async fn get_connected_platforms(&self) -> RemoteResult<Vec<PlatformId>> {
        let body = self.send("get_connected_platforms", json!([])).await?;
        decode_bare(body)
    }

    async fn connect_platform(&self, config: &AuthConfig) -> RemoteResult<ConnectResult> {
        self.call("connect_platform", json!([config])).await
    }

    async fn disconnect_platform(&self, platform: PlatformId) -> RemoteResult<bool> {
        self.call("disconnect_platform", json!([platform])).await
    }

    async fn sync_messages(&self, platform: PlatformId) -> RemoteResult<u64> {
        self.call("sync_messages", json!([platform])).await
    }

    async fn get_conversations(&self, platform: PlatformId) -> RemoteResult<Vec<Conversation>> {
        self.call("get_conversations", json!([platform])).await
    }

    async fn get_messages(
        &self,
        conversation_id: &str,
        limit: Vec<u32>,
        offset: Vec<u32>,
    ) -> RemoteResult<Vec<Message>> {
        self.call("get_messages", json!([conversation_id, limit, offset]))
            .await
    }

    async fn query_conversations(&self, text: &str) -> RemoteResult<QueryResult> {
        self.call("query_conversations", json!([text])).await
    }

    async fn advanced_search(&self, request: &AdvancedSearchRequest) -> RemoteResult<QueryResult> {
        self.call("advanced_search", request.to_args()).await
    }

    async fn ai_enhanced_query(&self, text: &str) -> RemoteResult<QueryResult> {
        self.call("ai_enhanced_query", json!([text])).await
    }

    async fn ai_query_platform(
        &self,
        text: &str,
        platform: PlatformId,
    ) -> RemoteResult<QueryResult> {
        self.call("ai_query_platform", json!([text, platform])).await
    }

    async fn analyze_topic(&self, topic: &str) -> RemoteResult<String> {
        self.call("analyze_topic", json!([topic])).await
    }

    async fn generate_conversation_insights(
        &self,
        conversation_id: &str,
    ) -> RemoteResult<ConversationInsights> {
        self.call("generate_conversation_insights", json!([conversation_id]))
            .await
    }

    async fn get_index_stats(&self) -> RemoteResult<IndexStats> {
        self.call("get_index_stats", json!([])).await
    }

    async fn optimize_indices(&self) -> RemoteResult<bool> {
        self.call("optimize_indices", json!([])).await
    }

    async fn rebuild_indices(&self) -> RemoteResult<bool> {
        self.call("rebuild_indices", json!([])).await
    }
}
