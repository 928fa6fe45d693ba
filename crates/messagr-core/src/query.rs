//! Query façade: search, AI queries, messages and index maintenance.
//!
//! Every call resolves with its payload or fails with exactly one
//! [`ErrorKind`]. Text queries (simple, advanced, AI) share one generation
//! counter so [`QueryFacade::latest`] always reflects the newest issued query,
//! never an older one that happened to finish last.

use std::sync::Arc;

use messagr_types::codec::encode;
use messagr_types::conversation::Message;
use messagr_types::error::ErrorKind;
use messagr_types::event::FacadeEvent;
use messagr_types::insights::{ConversationInsights, IndexStats};
use messagr_types::platform::PlatformId;
use messagr_types::query::{AdvancedSearchRequest, QueryFilter, QueryResult};

use crate::event::EventBus;
use crate::generation::LatestWins;
use crate::normalize::settle;
use crate::remote::{RemoteClient, RemoteResult};

/// Outcome of the newest text query.
pub type QueryOutcome = Result<QueryResult, ErrorKind>;

/// Translate a caller-side filter into the endpoint's argument shape.
///
/// The platform identifier is matched case-insensitively against the closed
/// platform set; anything else is `InvalidInput`.
pub fn build_search_request(filter: &QueryFilter) -> Result<AdvancedSearchRequest, ErrorKind> {
    let platform = filter
        .platform
        .as_deref()
        .map(PlatformId::from_identifier)
        .transpose()?;

    Ok(AdvancedSearchRequest {
        text: filter.query.clone(),
        platform: encode(platform),
        start_time: encode(filter.start_time),
        end_time: encode(filter.end_time),
        conversation_id: encode(filter.conversation_id.clone()),
        sender_id: encode(filter.sender_id.clone()),
        has_attachments: encode(filter.has_attachments),
        attachment_type: encode(filter.attachment_type.clone()),
        is_reply: encode(filter.is_reply),
        in_thread: encode(filter.in_thread),
        is_edited: encode(filter.is_edited),
        sort_by: filter.sort_by.clone(),
        sort_direction: filter.sort_direction.clone(),
        limit: encode(filter.limit),
        offset: encode(filter.offset),
    })
}

pub struct QueryFacade<R: RemoteClient> {
    remote: Arc<R>,
    latest: LatestWins<QueryOutcome>,
    events: EventBus,
}

impl<R: RemoteClient> QueryFacade<R> {
    pub fn new(remote: Arc<R>, events: EventBus) -> Self {
        Self {
            remote,
            latest: LatestWins::new(),
            events,
        }
    }

    /// Free-text query over the message index.
    pub async fn simple_query(&self, text: &str) -> QueryOutcome {
        let generation = self.latest.begin();
        tracing::debug!(generation, "simple query");
        let outcome = settle(self.remote.query_conversations(text).await);
        self.record(generation, outcome).await
    }

    /// Filtered search. Validation failures are returned without calling the
    /// endpoint and without issuing a generation.
    pub async fn advanced_search(&self, filter: &QueryFilter) -> QueryOutcome {
        let request = build_search_request(filter)?;
        let generation = self.latest.begin();
        tracing::debug!(
            generation,
            platform = ?request.platform,
            sort_by = %request.sort_by,
            "advanced search"
        );
        let outcome = settle(self.remote.advanced_search(&request).await);
        self.record(generation, outcome).await
    }

    /// AI-assisted query, scoped to one platform when `platform` is given.
    pub async fn ai_query(&self, text: &str, platform: Option<&str>) -> QueryOutcome {
        let platform = platform.map(PlatformId::from_identifier).transpose()?;
        let generation = self.latest.begin();
        tracing::debug!(generation, ?platform, "ai query");
        let outcome = match platform {
            Some(platform) => settle(self.remote.ai_query_platform(text, platform).await),
            None => settle(self.remote.ai_enhanced_query(text).await),
        };
        self.record(generation, outcome).await
    }

    /// Outcome of the newest issued text query that has completed.
    ///
    /// `None` until the newest issued query completes, even if older ones
    /// already have.
    pub async fn latest(&self) -> Option<QueryOutcome> {
        match self.latest.applied_generation().await {
            Some(applied) if applied == self.latest.latest_issued() => self.latest.current().await,
            _ => None,
        }
    }

    /// One page of a conversation's messages.
    pub async fn get_messages(
        &self,
        conversation_id: &str,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Message>, ErrorKind> {
        self.passthrough(
            "get_messages",
            self.remote
                .get_messages(conversation_id, encode(limit), encode(offset)),
        )
        .await
    }

    pub async fn index_stats(&self) -> Result<IndexStats, ErrorKind> {
        self.passthrough("get_index_stats", self.remote.get_index_stats())
            .await
    }

    pub async fn optimize_indices(&self) -> Result<bool, ErrorKind> {
        self.passthrough("optimize_indices", self.remote.optimize_indices())
            .await
    }

    pub async fn rebuild_indices(&self) -> Result<bool, ErrorKind> {
        self.passthrough("rebuild_indices", self.remote.rebuild_indices())
            .await
    }

    pub async fn analyze_topic(&self, topic: &str) -> Result<String, ErrorKind> {
        self.passthrough("analyze_topic", self.remote.analyze_topic(topic))
            .await
    }

    pub async fn conversation_insights(
        &self,
        conversation_id: &str,
    ) -> Result<ConversationInsights, ErrorKind> {
        self.passthrough(
            "generate_conversation_insights",
            self.remote.generate_conversation_insights(conversation_id),
        )
        .await
    }

    async fn passthrough<T>(
        &self,
        method: &'static str,
        call: impl Future<Output = RemoteResult<T>>,
    ) -> Result<T, ErrorKind> {
        tracing::debug!(method, "remote call");
        settle(call.await).inspect_err(|e| tracing::debug!(method, error = %e, "remote call failed"))
    }

    async fn record(&self, generation: u64, outcome: QueryOutcome) -> QueryOutcome {
        if !self.latest.commit(generation, outcome.clone()).await {
            let latest = self.latest.latest_issued();
            tracing::warn!(generation, latest, "discarding stale query result");
            self.events.publish(FacadeEvent::StaleResultDiscarded {
                scope: "query".to_string(),
                generation,
                latest,
            });
        }
        outcome
    }
}
