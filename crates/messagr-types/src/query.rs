//! Query filters, results and the advanced-search wire request.

use serde::{Deserialize, Serialize};

use crate::conversation::Message;
use crate::platform::PlatformId;

/// Sort field used when the caller does not choose one.
pub const DEFAULT_SORT_BY: &str = "relevance";

/// Sort direction used when the caller does not choose one.
pub const DEFAULT_SORT_DIRECTION: &str = "desc";

/// Structured search filter as filled in by a caller.
///
/// `platform` is a free-form identifier ("slack", "Slack"); it is mapped to a
/// [`PlatformId`] when the request is built. `sort_by` and `sort_direction`
/// are always sent as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryFilter {
    pub query: String,
    pub platform: Option<String>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub conversation_id: Option<String>,
    pub sender_id: Option<String>,
    pub has_attachments: Option<bool>,
    pub attachment_type: Option<String>,
    pub is_reply: Option<bool>,
    pub in_thread: Option<bool>,
    pub is_edited: Option<bool>,
    pub sort_by: String,
    pub sort_direction: String,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl QueryFilter {
    /// A filter with only the query text set and the default sort applied.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            platform: None,
            start_time: None,
            end_time: None,
            conversation_id: None,
            sender_id: None,
            has_attachments: None,
            attachment_type: None,
            is_reply: None,
            in_thread: None,
            is_edited: None,
            sort_by: DEFAULT_SORT_BY.to_string(),
            sort_direction: DEFAULT_SORT_DIRECTION.to_string(),
            limit: None,
            offset: None,
        }
    }
}

/// Messages matching a query plus the endpoint's explanation of the match.
///
/// Not deduplicated and not balanced across platforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    pub messages: Vec<Message>,
    pub context: String,
}

/// Positional arguments of the `advanced_search` call.
///
/// Every optional argument is already a zero-or-one-element sequence; build
/// it from a [`QueryFilter`] rather than by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvancedSearchRequest {
    pub text: String,
    pub platform: Vec<PlatformId>,
    pub start_time: Vec<i64>,
    pub end_time: Vec<i64>,
    pub conversation_id: Vec<String>,
    pub sender_id: Vec<String>,
    pub has_attachments: Vec<bool>,
    pub attachment_type: Vec<String>,
    pub is_reply: Vec<bool>,
    pub in_thread: Vec<bool>,
    pub is_edited: Vec<bool>,
    pub sort_by: String,
    pub sort_direction: String,
    pub limit: Vec<u32>,
    pub offset: Vec<u32>,
}

impl AdvancedSearchRequest {
    /// Arguments in the order the endpoint expects them.
    pub fn to_args(&self) -> serde_json::Value {
        serde_json::json!([
            self.text,
            self.platform,
            self.start_time,
            self.end_time,
            self.conversation_id,
            self.sender_id,
            self.has_attachments,
            self.attachment_type,
            self.is_reply,
            self.in_thread,
            self.is_edited,
            self.sort_by,
            self.sort_direction,
            self.limit,
            self.offset,
        ])
    }
}
