//! RemoteClient trait definition.
//!
//! The capability the façade is built on: one method per operation exposed
//! by the remote endpoint. Every fallible method resolves to the endpoint's
//! tagged result, with the failing branch left raw for the normalizer.
//!
//! Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
//! Implementations live in messagr-infra (e.g., `HttpRemoteClient`); tests use
//! in-memory doubles.

use std::future::Future;

use messagr_types::conversation::{Conversation, Message};
use messagr_types::error::RawWireError;
use messagr_types::insights::{ConversationInsights, IndexStats};
use messagr_types::platform::{AuthConfig, ConnectResult, PlatformId};
use messagr_types::query::{AdvancedSearchRequest, QueryResult};

/// Outcome of a single remote call.
pub type RemoteResult<T> = Result<T, RawWireError>;

/// Operations exposed by the remote endpoint.
///
/// Optional arguments arrive here already encoded as zero-or-one-element
/// sequences; callers build them with [`messagr_types::codec::encode`].
pub trait RemoteClient: Send + Sync {
    /// Platforms the caller currently has connected.
    fn get_connected_platforms(
        &self,
    ) -> impl Future<Output = RemoteResult<Vec<PlatformId>>> + Send;

    fn connect_platform(
        &self,
        config: &AuthConfig,
    ) -> impl Future<Output = RemoteResult<ConnectResult>> + Send;

    fn disconnect_platform(
        &self,
        platform: PlatformId,
    ) -> impl Future<Output = RemoteResult<bool>> + Send;

    /// Pull new messages from a platform. Resolves to the number synced.
    fn sync_messages(&self, platform: PlatformId)
    -> impl Future<Output = RemoteResult<u64>> + Send;

    fn get_conversations(
        &self,
        platform: PlatformId,
    ) -> impl Future<Output = RemoteResult<Vec<Conversation>>> + Send;

    fn get_messages(
        &self,
        conversation_id: &str,
        limit: Vec<u32>,
        offset: Vec<u32>,
    ) -> impl Future<Output = RemoteResult<Vec<Message>>> + Send;

    /// Free-text query.
    fn query_conversations(
        &self,
        text: &str,
    ) -> impl Future<Output = RemoteResult<QueryResult>> + Send;

    fn advanced_search(
        &self,
        request: &AdvancedSearchRequest,
    ) -> impl Future<Output = RemoteResult<QueryResult>> + Send;

    /// AI-assisted query across every platform.
    fn ai_enhanced_query(
        &self,
        text: &str,
    ) -> impl Future<Output = RemoteResult<QueryResult>> + Send;

    /// AI-assisted query restricted to one platform.
    fn ai_query_platform(
        &self,
        text: &str,
        platform: PlatformId,
    ) -> impl Future<Output = RemoteResult<QueryResult>> + Send;

    fn analyze_topic(&self, topic: &str) -> impl Future<Output = RemoteResult<String>> + Send;

    fn generate_conversation_insights(
        &self,
        conversation_id: &str,
    ) -> impl Future<Output = RemoteResult<ConversationInsights>> + Send;

    fn get_index_stats(&self) -> impl Future<Output = RemoteResult<IndexStats>> + Send;

    fn optimize_indices(&self) -> impl Future<Output = RemoteResult<bool>> + Send;

    fn rebuild_indices(&self) -> impl Future<Output = RemoteResult<bool>> + Send;
}
