//! In-memory `RemoteClient` double shared by the unit tests.
//!
//! Records every call, serves canned responses, and can hold calls open on a
//! gate so tests control completion order.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::json;
use tokio::sync::watch;

use messagr_types::conversation::{Conversation, Message, MessageContent, Participant};
use messagr_types::error::{RawWireError, WireError};
use messagr_types::insights::{ConversationInsights, IndexStats};
use messagr_types::platform::{AuthConfig, ConnectResult, PlatformId};
use messagr_types::query::{AdvancedSearchRequest, QueryResult};

use crate::remote::{RemoteClient, RemoteResult};

#[derive(Default)]
pub(crate) struct MockRemote {
    /// Server-side connected list; connect/disconnect mutate it.
    pub connected: Mutex<Vec<PlatformId>>,
    pub conversations: Mutex<HashMap<PlatformId, Vec<Conversation>>>,
    /// Keyed by `method` or `method:argument`.
    pub failures: Mutex<HashMap<String, RawWireError>>,
    pub calls: Mutex<Vec<String>>,
    pub last_search: Mutex<Option<AdvancedSearchRequest>>,
    pub last_paging: Mutex<Option<(Vec<u32>, Vec<u32>)>>,
    gates: Mutex<HashMap<&'static str, (usize, watch::Receiver<bool>)>>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_conversations(self, platform: PlatformId, count: usize) -> Self {
        let list = (0..count)
            .map(|i| conversation(&format!("{platform}-{i}"), platform, 0, None))
            .collect();
        self.conversations.lock().unwrap().insert(platform, list);
        self
    }

    pub fn failing(self, key: &str, error: WireError) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert(key.to_string(), RawWireError::from(error));
        self
    }

    pub fn failing_raw(self, key: &str, raw: serde_json::Value) -> Self {
        self.failures
            .lock()
            .unwrap()
            .insert(key.to_string(), RawWireError(raw));
        self
    }

    /// Hold the next `count` calls to `method` until the returned sender
    /// publishes `true`.
    pub fn gate(&self, method: &'static str, count: usize) -> watch::Sender<bool> {
        let (tx, rx) = watch::channel(false);
        self.gates.lock().unwrap().insert(method, (count, rx));
        tx
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.split(':').next() == Some(method))
            .count()
    }

    fn failure(&self, keys: &[String]) -> Option<RawWireError> {
        let failures = self.failures.lock().unwrap();
        keys.iter().find_map(|k| failures.get(k).cloned())
    }

    async fn enter(&self, method: &'static str, argument: Option<String>) {
        let waiter = {
            let call = match &argument {
                Some(arg) => format!("{method}:{arg}"),
                None => method.to_string(),
            };
            self.calls.lock().unwrap().push(call);
            let mut gates = self.gates.lock().unwrap();
            match gates.get_mut(method) {
                Some((remaining, rx)) if *remaining > 0 => {
                    *remaining -= 1;
                    Some(rx.clone())
                }
                _ => None,
            }
        };
        if let Some(mut rx) = waiter {
            let _ = rx.wait_for(|open| *open).await;
        }
    }

    fn check(&self, method: &str, argument: Option<&str>) -> Result<(), RawWireError> {
        let mut keys = vec![method.to_string()];
        if let Some(arg) = argument {
            keys.insert(0, format!("{method}:{arg}"));
        }
        match self.failure(&keys) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

pub(crate) fn conversation(
    name: &str,
    platform: PlatformId,
    participants: usize,
    last_message_at: Option<u64>,
) -> Conversation {
    Conversation {
        id: format!("id-{name}"),
        platform,
        name: name.to_string(),
        participants: (0..participants)
            .map(|i| participant(&format!("user{i}"), platform))
            .collect(),
        created_at: 0,
        last_message_at,
    }
}

pub(crate) fn participant(name: &str, platform: PlatformId) -> Participant {
    Participant {
        id: format!("id-{name}"),
        name: name.to_string(),
        platform,
        avatar_url: None,
    }
}

pub(crate) fn message(id: &str, timestamp: u64) -> Message {
    Message {
        id: id.to_string(),
        conversation_id: "c1".to_string(),
        platform: PlatformId::Slack,
        sender: participant("ada", PlatformId::Slack),
        content: MessageContent {
            text: format!("message {id}"),
            attachments: vec![],
        },
        timestamp,
        edited: false,
        reply_to: None,
        thread_id: None,
    }
}

fn result_for(context: String) -> QueryResult {
    QueryResult {
        messages: vec![],
        context,
    }
}

impl RemoteClient for MockRemote {
    async fn get_connected_platforms(&self) -> RemoteResult<Vec<PlatformId>> {
        let response = self.connected.lock().unwrap().clone();
        self.enter("get_connected_platforms", None).await;
        self.check("get_connected_platforms", None)?;
        Ok(response)
    }

    async fn connect_platform(&self, config: &AuthConfig) -> RemoteResult<ConnectResult> {
        let platform = config.platform;
        self.enter("connect_platform", Some(platform.to_string())).await;
        self.check("connect_platform", Some(platform.as_str()))?;
        let mut connected = self.connected.lock().unwrap();
        if !connected.contains(&platform) {
            connected.push(platform);
        }
        Ok(ConnectResult(format!("{platform} connected")))
    }

    async fn disconnect_platform(&self, platform: PlatformId) -> RemoteResult<bool> {
        self.enter("disconnect_platform", Some(platform.to_string())).await;
        self.check("disconnect_platform", Some(platform.as_str()))?;
        self.connected.lock().unwrap().retain(|p| *p != platform);
        Ok(true)
    }

    async fn sync_messages(&self, platform: PlatformId) -> RemoteResult<u64> {
        self.enter("sync_messages", Some(platform.to_string())).await;
        self.check("sync_messages", Some(platform.as_str()))?;
        Ok(17)
    }

    async fn get_conversations(&self, platform: PlatformId) -> RemoteResult<Vec<Conversation>> {
        // Snapshot before the gate so a held call returns what it saw when issued.
        let response = self
            .conversations
            .lock()
            .unwrap()
            .get(&platform)
            .cloned()
            .unwrap_or_default();
        let failure = self.check("get_conversations", Some(platform.as_str()));
        self.enter("get_conversations", Some(platform.to_string())).await;
        failure?;
        Ok(response)
    }

    async fn get_messages(
        &self,
        conversation_id: &str,
        limit: Vec<u32>,
        offset: Vec<u32>,
    ) -> RemoteResult<Vec<Message>> {
        self.enter("get_messages", Some(conversation_id.to_string())).await;
        self.check("get_messages", Some(conversation_id))?;
        *self.last_paging.lock().unwrap() = Some((limit, offset));
        Ok(vec![message("m2", 200), message("m1", 100)])
    }

    async fn query_conversations(&self, text: &str) -> RemoteResult<QueryResult> {
        self.enter("query_conversations", Some(text.to_string())).await;
        self.check("query_conversations", Some(text))?;
        Ok(result_for(format!("plain:{text}")))
    }

    async fn advanced_search(&self, request: &AdvancedSearchRequest) -> RemoteResult<QueryResult> {
        self.enter("advanced_search", Some(request.text.clone())).await;
        self.check("advanced_search", Some(&request.text))?;
        *self.last_search.lock().unwrap() = Some(request.clone());
        Ok(result_for(format!("advanced:{}", request.text)))
    }

    async fn ai_enhanced_query(&self, text: &str) -> RemoteResult<QueryResult> {
        self.enter("ai_enhanced_query", Some(text.to_string())).await;
        self.check("ai_enhanced_query", Some(text))?;
        Ok(result_for(format!("ai:{text}")))
    }

    async fn ai_query_platform(
        &self,
        text: &str,
        platform: PlatformId,
    ) -> RemoteResult<QueryResult> {
        self.enter("ai_query_platform", Some(platform.to_string())).await;
        self.check("ai_query_platform", Some(platform.as_str()))?;
        Ok(result_for(format!("ai:{platform}:{text}")))
    }

    async fn analyze_topic(&self, topic: &str) -> RemoteResult<String> {
        self.enter("analyze_topic", Some(topic.to_string())).await;
        self.check("analyze_topic", Some(topic))?;
        Ok(format!("analysis of {topic}"))
    }

    async fn generate_conversation_insights(
        &self,
        conversation_id: &str,
    ) -> RemoteResult<ConversationInsights> {
        self.enter("generate_conversation_insights", Some(conversation_id.to_string()))
            .await;
        self.check("generate_conversation_insights", Some(conversation_id))?;
        Ok(serde_json::from_value(json!({
            "entities": [],
            "topics": [{
                "name": "release",
                "relevance_score": 0.9,
                "message_count": 4,
                "summary": "release planning"
            }],
            "timeline": [],
            "sentiment": [],
            "conversation_flow": []
        }))
        .unwrap())
    }

    async fn get_index_stats(&self) -> RemoteResult<IndexStats> {
        self.enter("get_index_stats", None).await;
        self.check("get_index_stats", None)?;
        Ok(IndexStats {
            message_count: 10,
            indexed_count: 9,
            last_optimization: None,
            index_size_bytes: 2048,
        })
    }

    async fn optimize_indices(&self) -> RemoteResult<bool> {
        self.enter("optimize_indices", None).await;
        self.check("optimize_indices", None)?;
        Ok(true)
    }

    async fn rebuild_indices(&self) -> RemoteResult<bool> {
        self.enter("rebuild_indices", None).await;
        self.check("rebuild_indices", None)?;
        Ok(true)
    }
}
