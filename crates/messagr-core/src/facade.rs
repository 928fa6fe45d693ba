//! Top-level handle bundling the registry, aggregator and query façade over a
//! single injected [`RemoteClient`].

use std::sync::Arc;

use tokio::sync::broadcast;

use messagr_types::event::FacadeEvent;

use crate::aggregator::ConversationAggregator;
use crate::event::EventBus;
use crate::query::QueryFacade;
use crate::registry::PlatformRegistry;
use crate::remote::RemoteClient;

pub struct Messagr<R: RemoteClient> {
    remote: Arc<R>,
    registry: PlatformRegistry<R>,
    conversations: ConversationAggregator<R>,
    queries: QueryFacade<R>,
    events: EventBus,
}

impl<R: RemoteClient> Messagr<R> {
    /// Build every component over `remote`, sharing one event bus.
    pub fn new(remote: R) -> Self {
        Self::with_events(Arc::new(remote), EventBus::default())
    }

    pub fn with_events(remote: Arc<R>, events: EventBus) -> Self {
        Self {
            registry: PlatformRegistry::new(remote.clone(), events.clone()),
            conversations: ConversationAggregator::new(remote.clone(), events.clone()),
            queries: QueryFacade::new(remote.clone(), events.clone()),
            remote,
            events,
        }
    }

    pub fn registry(&self) -> &PlatformRegistry<R> {
        &self.registry
    }

    pub fn conversations(&self) -> &ConversationAggregator<R> {
        &self.conversations
    }

    pub fn queries(&self) -> &QueryFacade<R> {
        &self.queries
    }

    pub fn remote(&self) -> &Arc<R> {
        &self.remote
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FacadeEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use messagr_types::platform::{AuthConfig, PlatformId};

    use crate::testing::MockRemote;

    #[tokio::test]
    async fn test_components_share_remote_and_events() {
        let messagr = Messagr::new(MockRemote::new().with_conversations(PlatformId::Telegram, 2));
        let mut rx = messagr.subscribe();

        messagr
            .registry()
            .connect(&AuthConfig::new(PlatformId::Telegram, "abc"))
            .await
            .unwrap();
        let aggregate = messagr.conversations().fetch_all().await;
        let result = messagr.queries().simple_query("hello").await.unwrap();

        assert_eq!(aggregate.conversations.len(), 2);
        assert_eq!(result.context, "plain:hello");
        assert_eq!(messagr.remote().count("connect_platform"), 1);

        assert!(matches!(rx.recv().await.unwrap(), FacadeEvent::PlatformsChanged { .. }));
        assert!(matches!(
            rx.recv().await.unwrap(),
            FacadeEvent::ConversationsRefreshed { conversations: 2, .. }
        ));
    }
}
