//! Connected-platform registry.
//!
//! Membership is never edited locally: after every successful connect or
//! disconnect the registry re-reads the full list from the endpoint and
//! replaces its state wholesale. Failed operations leave membership untouched.
//!
//! Known race: the mutation and the follow-up read are two separate round
//! trips. If another client disconnects a different platform between them,
//! the refreshed list is still authoritative for the moment it was read, but
//! a refresh issued by this registry earlier can be discarded in favour of a
//! later one that does not reflect it yet. The next refresh corrects it.
//!
//! Overlapping transitions on one platform are stacked: `status` reports the
//! most recently started one, and each operation removes only its own entry
//! when it finishes.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use messagr_types::error::ErrorKind;
use messagr_types::event::FacadeEvent;
use messagr_types::platform::{AuthConfig, ConnectResult, LinkState, PlatformId, SyncSummary};

use crate::event::EventBus;
use crate::generation::LatestWins;
use crate::normalize::settle;
use crate::remote::RemoteClient;

/// Owns the connected-platform set and the connect/disconnect/sync lifecycle.
pub struct PlatformRegistry<R: RemoteClient> {
    remote: Arc<R>,
    connected: LatestWins<Vec<PlatformId>>,
    /// In-flight transitions (Connecting / Disconnecting) only, oldest first.
    transitions: DashMap<PlatformId, Vec<(u64, LinkState)>>,
    next_ticket: AtomicU64,
    events: EventBus,
}

impl<R: RemoteClient> PlatformRegistry<R> {
    pub fn new(remote: Arc<R>, events: EventBus) -> Self {
        Self {
            remote,
            connected: LatestWins::new(),
            transitions: DashMap::new(),
            next_ticket: AtomicU64::new(0),
            events,
        }
    }

    /// Re-read the connected list from the endpoint and replace local state.
    ///
    /// Refreshes are latest-wins: if a newer refresh was issued while this one
    /// was in flight, this result is returned to the caller but not applied.
    pub async fn refresh(&self) -> Result<Vec<PlatformId>, ErrorKind> {
        let generation = self.connected.begin();
        let mut platforms = settle(self.remote.get_connected_platforms().await)?;
        platforms.sort();
        platforms.dedup();

        if self.connected.commit(generation, platforms.clone()).await {
            tracing::info!(generation, connected = ?platforms, "connected platforms updated");
            self.events.publish(FacadeEvent::PlatformsChanged {
                connected: platforms.clone(),
            });
        } else {
            let latest = self.connected.latest_issued();
            tracing::debug!(generation, latest, "discarding superseded platform refresh");
            self.events.publish(FacadeEvent::StaleResultDiscarded {
                scope: "registry".to_string(),
                generation,
                latest,
            });
        }

        Ok(platforms)
    }

    /// Connect a platform, then refresh membership from the endpoint.
    ///
    /// On failure the registry is unchanged and the normalized error is
    /// returned. A failure of the follow-up refresh is also returned, since
    /// local state could not be confirmed.
    pub async fn connect(&self, config: &AuthConfig) -> Result<ConnectResult, ErrorKind> {
        let platform = config.platform;
        let ticket = self.begin_transition(platform, LinkState::Connecting);
        tracing::debug!(%platform, "connecting platform");

        let result = match settle(self.remote.connect_platform(config).await) {
            Ok(result) => result,
            Err(e) => {
                self.end_transition(platform, ticket);
                tracing::warn!(%platform, error = %e, "connect failed");
                return Err(e);
            }
        };

        let refreshed = self.refresh().await;
        self.end_transition(platform, ticket);
        refreshed?;
        Ok(result)
    }

    /// Disconnect a platform, then refresh membership from the endpoint.
    pub async fn disconnect(&self, platform: PlatformId) -> Result<bool, ErrorKind> {
        let ticket = self.begin_transition(platform, LinkState::Disconnecting);
        tracing::debug!(%platform, "disconnecting platform");

        let removed = match settle(self.remote.disconnect_platform(platform).await) {
            Ok(removed) => removed,
            Err(e) => {
                self.end_transition(platform, ticket);
                tracing::warn!(%platform, error = %e, "disconnect failed");
                return Err(e);
            }
        };

        let refreshed = self.refresh().await;
        self.end_transition(platform, ticket);
        refreshed?;
        Ok(removed)
    }

    /// Ask the endpoint to pull new messages. Membership is not touched.
    pub async fn sync(&self, platform: PlatformId) -> Result<SyncSummary, ErrorKind> {
        let synced = settle(self.remote.sync_messages(platform).await)?;
        tracing::info!(%platform, synced, "platform synced");
        self.events
            .publish(FacadeEvent::PlatformSynced { platform, synced });
        Ok(SyncSummary { platform, synced })
    }

    /// Connected platforms as of the last applied refresh.
    pub async fn connected(&self) -> Vec<PlatformId> {
        self.connected.current().await.unwrap_or_default()
    }

    pub async fn is_connected(&self, platform: PlatformId) -> bool {
        self.connected().await.contains(&platform)
    }

    /// Lifecycle state of one platform.
    pub async fn status(&self, platform: PlatformId) -> LinkState {
        if let Some(state) = self.in_flight(platform) {
            return state;
        }
        if self.is_connected(platform).await {
            LinkState::Connected
        } else {
            LinkState::Disconnected
        }
    }

    /// Lifecycle state of every platform, in canonical order.
    pub async fn statuses(&self) -> Vec<(PlatformId, LinkState)> {
        let connected = self.connected().await;
        PlatformId::ALL
            .into_iter()
            .map(|p| {
                let state = match self.in_flight(p) {
                    Some(state) => state,
                    None if connected.contains(&p) => LinkState::Connected,
                    None => LinkState::Disconnected,
                };
                (p, state)
            })
            .collect()
    }

    fn begin_transition(&self, platform: PlatformId, state: LinkState) -> u64 {
        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        self.transitions
            .entry(platform)
            .or_default()
            .push((ticket, state));
        ticket
    }

    fn end_transition(&self, platform: PlatformId, ticket: u64) {
        if let Some(mut stack) = self.transitions.get_mut(&platform) {
            stack.retain(|(t, _)| *t != ticket);
        }
        self.transitions.remove_if(&platform, |_, stack| stack.is_empty());
    }

    fn in_flight(&self, platform: PlatformId) -> Option<LinkState> {
        self.transitions
            .get(&platform)
            .and_then(|stack| stack.last().map(|(_, state)| *state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use messagr_types::error::WireError;

    use crate::testing::MockRemote;

    fn registry(remote: MockRemote) -> (Arc<MockRemote>, PlatformRegistry<MockRemote>) {
        let remote = Arc::new(remote);
        let registry = PlatformRegistry::new(remote.clone(), EventBus::default());
        (remote, registry)
    }

    #[tokio::test]
    async fn test_connect_success_refreshes_membership() {
        let (remote, registry) = registry(MockRemote::new());

        let result = registry
            .connect(&AuthConfig::new(PlatformId::Telegram, "abc"))
            .await
            .unwrap();

        assert_eq!(result.0, "Telegram connected");
        assert_eq!(registry.connected().await, vec![PlatformId::Telegram]);
        assert_eq!(registry.status(PlatformId::Telegram).await, LinkState::Connected);
        assert_eq!(
            remote.calls(),
            vec!["connect_platform:Telegram", "get_connected_platforms"]
        );
    }

    #[tokio::test]
    async fn test_failed_connect_leaves_registry_unchanged() {
        let (remote, registry) = registry(
            MockRemote::new()
                .failing("connect_platform:Slack", WireError::PlatformError("invalid token".into())),
        );

        registry
            .connect(&AuthConfig::new(PlatformId::Telegram, "abc"))
            .await
            .unwrap();
        let before = registry.connected().await;

        let err = registry
            .connect(&AuthConfig::new(PlatformId::Slack, "bad"))
            .await
            .unwrap_err();

        assert_eq!(err, ErrorKind::PlatformFailure("invalid token".into()));
        assert_eq!(err.to_string(), "Platform error: invalid token");
        assert_eq!(registry.connected().await, before);
        assert_eq!(registry.status(PlatformId::Slack).await, LinkState::Disconnected);
        // no refresh after a failed connect
        assert_eq!(remote.count("get_connected_platforms"), 1);
    }

    #[tokio::test]
    async fn test_connect_unauthenticated() {
        let (_, registry) = registry(
            MockRemote::new().failing("connect_platform", WireError::NotAuthenticated),
        );
        let err = registry
            .connect(&AuthConfig::new(PlatformId::Discord, "t"))
            .await
            .unwrap_err();
        assert_eq!(err, ErrorKind::Unauthenticated);
    }

    #[tokio::test]
    async fn test_status_is_connecting_while_in_flight() {
        let remote = MockRemote::new();
        let release = remote.gate("connect_platform", 1);
        let (_, registry) = registry(remote);
        let registry = Arc::new(registry);

        let pending = tokio::spawn({
            let registry = registry.clone();
            async move {
                registry
                    .connect(&AuthConfig::new(PlatformId::Telegram, "abc"))
                    .await
            }
        });

        while registry.status(PlatformId::Telegram).await != LinkState::Connecting {
            tokio::task::yield_now().await;
        }
        assert!(!registry.is_connected(PlatformId::Telegram).await);

        release.send(true).unwrap();
        pending.await.unwrap().unwrap();
        assert_eq!(registry.status(PlatformId::Telegram).await, LinkState::Connected);
    }

    #[tokio::test]
    async fn test_disconnect_success_and_failure() {
        let (remote, registry) = registry(
            MockRemote::new()
                .failing("disconnect_platform:Slack", WireError::InternalError("busy".into())),
        );
        *remote.connected.lock().unwrap() = vec![PlatformId::Telegram, PlatformId::Slack];
        registry.refresh().await.unwrap();

        assert!(registry.disconnect(PlatformId::Telegram).await.unwrap());
        assert_eq!(registry.connected().await, vec![PlatformId::Slack]);

        let err = registry.disconnect(PlatformId::Slack).await.unwrap_err();
        assert_eq!(err, ErrorKind::InternalFailure("busy".into()));
        assert_eq!(registry.connected().await, vec![PlatformId::Slack]);
        assert_eq!(registry.status(PlatformId::Slack).await, LinkState::Connected);
    }

    #[tokio::test]
    async fn test_sync_does_not_touch_membership() {
        let (remote, registry) = registry(MockRemote::new());
        let summary = registry.sync(PlatformId::Twitter).await.unwrap();

        assert_eq!(summary.platform, PlatformId::Twitter);
        assert_eq!(summary.synced, 17);
        assert!(registry.connected().await.is_empty());
        assert_eq!(remote.count("get_connected_platforms"), 0);
    }

    #[tokio::test]
    async fn test_refresh_sorts_into_canonical_order() {
        let (remote, registry) = registry(MockRemote::new());
        *remote.connected.lock().unwrap() =
            vec![PlatformId::WhatsApp, PlatformId::Telegram, PlatformId::WhatsApp];

        let platforms = registry.refresh().await.unwrap();
        assert_eq!(platforms, vec![PlatformId::Telegram, PlatformId::WhatsApp]);
    }

    #[tokio::test]
    async fn test_statuses_cover_every_platform() {
        let (remote, registry) = registry(MockRemote::new());
        *remote.connected.lock().unwrap() = vec![PlatformId::Facebook];
        registry.refresh().await.unwrap();

        let statuses = registry.statuses().await;
        assert_eq!(statuses.len(), 6);
        assert_eq!(statuses[4], (PlatformId::Facebook, LinkState::Connected));
        assert_eq!(statuses[0], (PlatformId::Telegram, LinkState::Disconnected));
    }

    #[tokio::test]
    async fn test_superseded_refresh_is_discarded() {
        let remote = MockRemote::new();
        *remote.connected.lock().unwrap() = vec![PlatformId::Slack];
        let release = remote.gate("get_connected_platforms", 1);
        let (remote, registry) = registry(remote);
        let registry = Arc::new(registry);
        let mut rx = registry.events.subscribe();

        let older = tokio::spawn({
            let registry = registry.clone();
            async move { registry.refresh().await }
        });
        while remote.count("get_connected_platforms") == 0 {
            tokio::task::yield_now().await;
        }

        *remote.connected.lock().unwrap() = vec![PlatformId::Telegram];
        let newer = registry.refresh().await.unwrap();
        assert_eq!(newer, vec![PlatformId::Telegram]);

        release.send(true).unwrap();
        let older = older.await.unwrap().unwrap();

        // the caller still sees what it read, but it is not applied
        assert_eq!(older, vec![PlatformId::Slack]);
        assert_eq!(registry.connected().await, vec![PlatformId::Telegram]);
        assert_eq!(
            rx.recv().await.unwrap(),
            FacadeEvent::PlatformsChanged {
                connected: vec![PlatformId::Telegram]
            }
        );
        assert_eq!(
            rx.recv().await.unwrap(),
            FacadeEvent::StaleResultDiscarded {
                scope: "registry".to_string(),
                generation: 1,
                latest: 2,
            }
        );
    }

    #[tokio::test]
    async fn test_overlapping_transitions_keep_their_own_state() {
        let remote = MockRemote::new();
        let release = remote.gate("connect_platform", 1);
        let (_, registry) = registry(remote);
        let registry = Arc::new(registry);

        let connecting = tokio::spawn({
            let registry = registry.clone();
            async move {
                registry
                    .connect(&AuthConfig::new(PlatformId::Telegram, "abc"))
                    .await
            }
        });
        while registry.status(PlatformId::Telegram).await != LinkState::Connecting {
            tokio::task::yield_now().await;
        }

        // a disconnect that starts and finishes inside the connect
        assert!(registry.disconnect(PlatformId::Telegram).await.unwrap());
        assert_eq!(registry.status(PlatformId::Telegram).await, LinkState::Connecting);

        release.send(true).unwrap();
        connecting.await.unwrap().unwrap();
        assert_eq!(registry.status(PlatformId::Telegram).await, LinkState::Connected);
        assert!(registry.transitions.is_empty());
    }

    #[tokio::test]
    async fn test_connect_publishes_platforms_changed() {
        let (_, registry) = registry(MockRemote::new());
        let mut rx = registry.events.subscribe();

        registry
            .connect(&AuthConfig::new(PlatformId::Telegram, "abc"))
            .await
            .unwrap();

        assert_eq!(
            rx.recv().await.unwrap(),
            FacadeEvent::PlatformsChanged {
                connected: vec![PlatformId::Telegram]
            }
        );
    }
}
