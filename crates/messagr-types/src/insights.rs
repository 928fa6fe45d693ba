//! Index statistics and AI-generated conversation insights.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Health numbers for the endpoint's search indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub message_count: u64,
    pub indexed_count: u64,
    /// Unix seconds of the last optimize run, if any.
    #[serde(with = "crate::codec::seq", default)]
    pub last_optimization: Option<u64>,
    pub index_size_bytes: u64,
}

/// Analysis of a single conversation produced behind the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationInsights {
    pub entities: Vec<Entity>,
    pub topics: Vec<Topic>,
    #[serde(with = "crate::codec::seq", default)]
    pub timeline: Option<Vec<TimelineEvent>>,
    #[serde(with = "crate::codec::seq", default)]
    pub sentiment: Option<SentimentAnalysis>,
    #[serde(with = "crate::codec::seq", default)]
    pub conversation_flow: Option<ConversationFlow>,
}

/// Person, place, organization etc. mentioned in the messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub entity_type: EntityType,
    pub mentions: i32,
    #[serde(with = "crate::codec::seq", default)]
    pub sentiment_score: Option<f32>,
    pub related_entities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityType {
    Person,
    Organization,
    Location,
    Date,
    Product,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    pub relevance_score: f32,
    pub message_count: i32,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub timestamp: u64,
    pub description: String,
    pub related_message_ids: Vec<String>,
    pub importance: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    /// -1.0 (negative) to 1.0 (positive).
    pub overall_sentiment: f32,
    pub sentiment_breakdown: HashMap<String, f32>,
    pub key_positive_points: Vec<String>,
    pub key_negative_points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationFlow {
    pub main_threads: Vec<ConversationThread>,
    pub key_decisions: Vec<String>,
    pub action_items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationThread {
    pub topic: String,
    pub message_ids: Vec<String>,
    pub participants: Vec<String>,
    pub resolved: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_index_stats_never_optimized() {
        let stats: IndexStats = serde_json::from_value(json!({
            "message_count": 120,
            "indexed_count": 118,
            "last_optimization": [],
            "index_size_bytes": 4096
        }))
        .unwrap();
        assert_eq!(stats.last_optimization, None);
        assert_eq!(stats.indexed_count, 118);
    }

    #[test]
    fn test_insights_with_partial_sections() {
        let insights: ConversationInsights = serde_json::from_value(json!({
            "entities": [{
                "name": "Acme",
                "entity_type": "Organization",
                "mentions": 3,
                "sentiment_score": [],
                "related_entities": []
            }, {
                "name": "launch",
                "entity_type": { "Other": "event" },
                "mentions": 1,
                "sentiment_score": [0.5],
                "related_entities": ["Acme"]
            }],
            "topics": [],
            "timeline": [],
            "sentiment": [],
            "conversation_flow": [{
                "main_threads": [],
                "key_decisions": ["ship friday"],
                "action_items": []
            }]
        }))
        .unwrap();

        assert_eq!(insights.entities[0].entity_type, EntityType::Organization);
        assert_eq!(insights.entities[1].entity_type, EntityType::Other("event".into()));
        assert_eq!(insights.entities[1].sentiment_score, Some(0.5));
        assert!(insights.timeline.is_none());
        assert!(insights.sentiment.is_none());
        assert_eq!(
            insights.conversation_flow.unwrap().key_decisions,
            vec!["ship friday".to_string()]
        );
    }
}
