//! Events published by the façade for UI collaborators.

use serde::{Deserialize, Serialize};

use crate::platform::PlatformId;

/// State change notifications emitted on the façade's event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FacadeEvent {
    /// The registry replaced its connected-platform list.
    PlatformsChanged { connected: Vec<PlatformId> },

    /// A platform sync finished.
    PlatformSynced { platform: PlatformId, synced: u64 },

    /// A conversation fan-out was applied to shared state.
    ConversationsRefreshed {
        generation: u64,
        conversations: usize,
        failures: Vec<PlatformId>,
    },

    /// A completed operation lost to a newer one and was not applied.
    StaleResultDiscarded {
        /// Which component discarded it ("registry", "conversations", "query").
        scope: String,
        generation: u64,
        latest: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_tagging() {
        let event = FacadeEvent::PlatformSynced {
            platform: PlatformId::Slack,
            synced: 42,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "platform_synced");
        assert_eq!(json["platform"], "Slack");
        assert_eq!(json["synced"], 42);
    }
}
