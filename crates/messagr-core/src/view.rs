//! Presentation helpers for conversation and message lists.
//!
//! Pure functions: the same input always yields an equal output and nothing
//! here touches the network or shared state.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use messagr_types::conversation::{Conversation, Message};
use messagr_types::error::ErrorKind;
use messagr_types::platform::PlatformId;

/// Column a conversation list is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    Platform,
    Participants,
    #[default]
    LastActivity,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Platform => "platform",
            SortKey::Participants => "participants",
            SortKey::LastActivity => "last_activity",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "name" => Ok(SortKey::Name),
            "platform" => Ok(SortKey::Platform),
            "participants" => Ok(SortKey::Participants),
            "lastactivity" => Ok(SortKey::LastActivity),
            _ => Err(ErrorKind::InvalidInput(format!("unknown sort key '{s}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortDirection {
    type Err = ErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(ErrorKind::InvalidInput(format!("unknown sort direction '{s}'"))),
        }
    }
}

/// Filter and sort settings for a conversation list. Empty filters match
/// everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresentationOptions {
    pub text_filter: String,
    pub platform_filter: String,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
}

/// Filter then stably sort `conversations` for display.
pub fn compose_presentation(
    conversations: &[Conversation],
    options: &PresentationOptions,
) -> Vec<Conversation> {
    let text = options.text_filter.to_lowercase();
    let platform = options.platform_filter.to_lowercase();

    let mut visible: Vec<Conversation> = conversations
        .iter()
        .filter(|c| platform.is_empty() || c.platform.as_str().to_lowercase() == platform)
        .filter(|c| text.is_empty() || c.name.to_lowercase().contains(&text))
        .cloned()
        .collect();

    let compare = comparator(options.sort_key);
    match options.sort_direction {
        SortDirection::Asc => visible.sort_by(compare),
        SortDirection::Desc => visible.sort_by(|a, b| compare(a, b).reverse()),
    }
    visible
}

fn comparator(key: SortKey) -> fn(&Conversation, &Conversation) -> Ordering {
    match key {
        SortKey::Name => |a, b| text_order(&a.name, &b.name),
        SortKey::Platform => |a, b| text_order(a.platform.as_str(), b.platform.as_str()),
        SortKey::Participants => |a, b| a.participants.len().cmp(&b.participants.len()),
        SortKey::LastActivity => {
            |a, b| a.last_message_at.unwrap_or(0).cmp(&b.last_message_at.unwrap_or(0))
        }
    }
}

// Case-folded code point order; strings differing only in case compare
// equal. Accented letters are not folded onto their base letter.
fn text_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Oldest message first; equal timestamps keep their received order.
pub fn sort_messages_chronologically(mut messages: Vec<Message>) -> Vec<Message> {
    messages.sort_by_key(|m| m.timestamp);
    messages
}

/// Conversation count per platform, in canonical platform order.
pub fn platform_breakdown(conversations: &[Conversation]) -> Vec<(PlatformId, usize)> {
    PlatformId::ALL
        .into_iter()
        .map(|p| (p, conversations.iter().filter(|c| c.platform == p).count()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{conversation, message};

    fn names(list: &[Conversation]) -> Vec<&str> {
        list.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_last_activity_desc_is_stable() {
        let input = vec![
            conversation("B", PlatformId::Slack, 1, Some(100)),
            conversation("A", PlatformId::Slack, 1, Some(100)),
            conversation("C", PlatformId::Slack, 1, Some(200)),
        ];
        let out = compose_presentation(&input, &PresentationOptions::default());
        assert_eq!(names(&out), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_missing_last_activity_sorts_as_zero() {
        let input = vec![
            conversation("never", PlatformId::Discord, 0, None),
            conversation("recent", PlatformId::Discord, 0, Some(5)),
        ];
        let options = PresentationOptions {
            sort_direction: SortDirection::Asc,
            ..Default::default()
        };
        assert_eq!(names(&compose_presentation(&input, &options)), vec!["never", "recent"]);
    }

    #[test]
    fn test_filters_are_case_insensitive() {
        let input = vec![
            conversation("Team Standup", PlatformId::Slack, 3, Some(1)),
            conversation("standup notes", PlatformId::Discord, 2, Some(2)),
            conversation("Family", PlatformId::WhatsApp, 4, Some(3)),
        ];
        let options = PresentationOptions {
            text_filter: "STANDUP".into(),
            platform_filter: "slack".into(),
            ..Default::default()
        };
        assert_eq!(names(&compose_presentation(&input, &options)), vec!["Team Standup"]);

        let options = PresentationOptions {
            text_filter: "standup".into(),
            ..Default::default()
        };
        assert_eq!(
            names(&compose_presentation(&input, &options)),
            vec!["standup notes", "Team Standup"]
        );
    }

    #[test]
    fn test_sort_by_name_and_participants() {
        let input = vec![
            conversation("bravo", PlatformId::Telegram, 5, None),
            conversation("Alpha", PlatformId::Telegram, 2, None),
            conversation("charlie", PlatformId::Telegram, 9, None),
        ];
        let by_name = PresentationOptions {
            sort_key: SortKey::Name,
            sort_direction: SortDirection::Asc,
            ..Default::default()
        };
        assert_eq!(
            names(&compose_presentation(&input, &by_name)),
            vec!["Alpha", "bravo", "charlie"]
        );

        let by_participants = PresentationOptions {
            sort_key: SortKey::Participants,
            ..Default::default()
        };
        assert_eq!(
            names(&compose_presentation(&input, &by_participants)),
            vec!["charlie", "bravo", "Alpha"]
        );
    }

    #[test]
    fn test_name_order_for_non_ascii() {
        let input = vec![
            conversation("zoe", PlatformId::Slack, 1, None),
            conversation("Émile", PlatformId::Slack, 1, None),
            conversation("adam", PlatformId::Slack, 1, None),
            conversation("émile", PlatformId::Slack, 1, None),
        ];
        let options = PresentationOptions {
            sort_key: SortKey::Name,
            sort_direction: SortDirection::Asc,
            ..Default::default()
        };
        assert_eq!(
            names(&compose_presentation(&input, &options)),
            vec!["adam", "zoe", "Émile", "émile"]
        );
    }

    #[test]
    fn test_sort_by_platform() {
        let input = vec![
            conversation("w", PlatformId::WhatsApp, 0, None),
            conversation("d", PlatformId::Discord, 0, None),
            conversation("t", PlatformId::Twitter, 0, None),
        ];
        let options = PresentationOptions {
            sort_key: SortKey::Platform,
            sort_direction: SortDirection::Asc,
            ..Default::default()
        };
        assert_eq!(names(&compose_presentation(&input, &options)), vec!["d", "t", "w"]);
    }

    #[test]
    fn test_presentation_is_idempotent() {
        let input = vec![
            conversation("x", PlatformId::Slack, 1, Some(3)),
            conversation("y", PlatformId::Slack, 1, Some(7)),
        ];
        let options = PresentationOptions::default();
        let once = compose_presentation(&input, &options);
        assert_eq!(compose_presentation(&once, &options), once);
        assert_eq!(compose_presentation(&input, &options), once);
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("lastActivity".parse::<SortKey>().unwrap(), SortKey::LastActivity);
        assert_eq!("last-activity".parse::<SortKey>().unwrap(), SortKey::LastActivity);
        assert_eq!("Name".parse::<SortKey>().unwrap(), SortKey::Name);
        assert!("size".parse::<SortKey>().is_err());
        assert_eq!("ASC".parse::<SortDirection>().unwrap(), SortDirection::Asc);
    }

    #[test]
    fn test_messages_oldest_first() {
        let sorted = sort_messages_chronologically(vec![
            message("m3", 300),
            message("m1", 100),
            message("m2", 100),
        ]);
        let ids: Vec<&str> = sorted.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2", "m3"]);
    }

    #[test]
    fn test_platform_breakdown_covers_all_platforms() {
        let input = vec![
            conversation("a", PlatformId::Slack, 0, None),
            conversation("b", PlatformId::Slack, 0, None),
            conversation("c", PlatformId::Facebook, 0, None),
        ];
        let breakdown = platform_breakdown(&input);
        assert_eq!(breakdown.len(), 6);
        assert_eq!(breakdown[1], (PlatformId::Slack, 2));
        assert_eq!(breakdown[4], (PlatformId::Facebook, 1));
        assert_eq!(breakdown[0], (PlatformId::Telegram, 0));
    }
}
