//! Conversation aggregation across every platform.
//!
//! One `get_conversations` call per platform is issued concurrently; the
//! merged list is assembled in canonical platform order regardless of which
//! call finishes first. A failing platform never sinks the aggregate: its
//! error is recorded as a diagnostic and the rest is returned.

use std::sync::Arc;

use futures_util::future::join_all;
use serde::Serialize;

use messagr_types::conversation::Conversation;
use messagr_types::error::ErrorKind;
use messagr_types::event::FacadeEvent;
use messagr_types::platform::PlatformId;

use crate::event::EventBus;
use crate::generation::LatestWins;
use crate::normalize::settle;
use crate::remote::RemoteClient;

/// One platform's failure inside an otherwise successful aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformDiagnostic {
    pub platform: PlatformId,
    pub error: ErrorKind,
}

/// Result of one `fetch_all` pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    pub generation: u64,
    pub conversations: Vec<Conversation>,
    pub diagnostics: Vec<PlatformDiagnostic>,
    /// A newer pass was issued before this one finished; its state was not
    /// applied.
    pub superseded: bool,
}

impl Aggregate {
    pub fn failed_platforms(&self) -> Vec<PlatformId> {
        self.diagnostics.iter().map(|d| d.platform).collect()
    }
}

pub struct ConversationAggregator<R: RemoteClient> {
    remote: Arc<R>,
    state: LatestWins<Aggregate>,
    events: EventBus,
}

impl<R: RemoteClient> ConversationAggregator<R> {
    pub fn new(remote: Arc<R>, events: EventBus) -> Self {
        Self {
            remote,
            state: LatestWins::new(),
            events,
        }
    }

    /// Fetch conversations from every platform concurrently and merge them.
    ///
    /// Always resolves; per-platform failures land in `diagnostics`.
    pub async fn fetch_all(&self) -> Aggregate {
        let generation = self.state.begin();
        tracing::debug!(generation, "fetching conversations from all platforms");

        let calls = PlatformId::ALL.map(|platform| {
            let remote = self.remote.clone();
            async move { (platform, settle(remote.get_conversations(platform).await)) }
        });
        let outcomes = join_all(calls).await;

        let mut conversations = Vec::new();
        let mut diagnostics = Vec::new();
        for (platform, outcome) in outcomes {
            match outcome {
                Ok(list) => conversations.extend(list),
                Err(error) => {
                    tracing::warn!(%platform, %error, "failed to load conversations");
                    diagnostics.push(PlatformDiagnostic { platform, error });
                }
            }
        }

        let mut aggregate = Aggregate {
            generation,
            conversations,
            diagnostics,
            superseded: false,
        };

        if self.state.commit(generation, aggregate.clone()).await {
            self.events.publish(FacadeEvent::ConversationsRefreshed {
                generation,
                conversations: aggregate.conversations.len(),
                failures: aggregate.failed_platforms(),
            });
        } else {
            let latest = self.state.latest_issued();
            tracing::warn!(generation, latest, "discarding stale conversation fetch");
            self.events.publish(FacadeEvent::StaleResultDiscarded {
                scope: "conversations".to_string(),
                generation,
                latest,
            });
            aggregate.superseded = true;
        }

        aggregate
    }

    /// Latest applied aggregate, if any pass has completed.
    pub async fn snapshot(&self) -> Option<Aggregate> {
        self.state.current().await
    }

    /// Look a conversation up in the latest applied aggregate.
    pub async fn find(&self, conversation_id: &str) -> Option<Conversation> {
        self.state.current().await.and_then(|aggregate| {
            aggregate
                .conversations
                .into_iter()
                .find(|c| c.id == conversation_id)
        })
    }
}
