//! Conversations and messages as returned by the endpoint.
//!
//! Timestamps are Unix seconds. Optional fields use the zero-or-one-element
//! sequence encoding on the wire (see [`crate::codec`]).

use serde::{Deserialize, Serialize};

use crate::platform::PlatformId;

/// A user on one of the platforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub platform: PlatformId,
    #[serde(with = "crate::codec::seq", default)]
    pub avatar_url: Option<String>,
}

/// A chat, channel or thread on a platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub platform: PlatformId,
    pub name: String,
    pub participants: Vec<Participant>,
    pub created_at: u64,
    #[serde(with = "crate::codec::seq", default)]
    pub last_message_at: Option<u64>,
}

/// A file, image or link attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub attachment_type: String,
    #[serde(with = "crate::codec::seq", default)]
    pub name: Option<String>,
    #[serde(with = "crate::codec::seq", default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContent {
    pub text: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// A single message inside a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub conversation_id: String,
    pub platform: PlatformId,
    pub sender: Participant,
    pub content: MessageContent,
    pub timestamp: u64,
    pub edited: bool,
    /// ID of the message this one replies to.
    #[serde(with = "crate::codec::seq", default)]
    pub reply_to: Option<String>,
    /// Thread the message belongs to, on platforms that have threads.
    #[serde(with = "crate::codec::seq", default)]
    pub thread_id: Option<String>,
}
