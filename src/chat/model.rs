//! Chat data model: group messages, reply previews and reaction tallies.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the quoted text shown above a reply.
pub const REPLY_SNIPPET_CHARS: usize = 60;

/// A message posted to a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub group_id: String,
    pub user_id: String,
    pub user_name: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<Uuid>,
}

impl Message {
    pub fn new(
        group_id: impl Into<String>,
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id: group_id.into(),
            user_id: user_id.into(),
            user_name: user_name.into(),
            content: content.into(),
            timestamp: Utc::now(),
            reply_to: None,
        }
    }

    pub fn with_reply_to(mut self, reply_to: Uuid) -> Self {
        self.reply_to = Some(reply_to);
        self
    }

    /// The quote shown above replies to this message.
    pub fn reply_preview(&self) -> ReplyPreview {
        let mut snippet: String = self.content.chars().take(REPLY_SNIPPET_CHARS).collect();
        if self.content.chars().count() > REPLY_SNIPPET_CHARS {
            snippet.push('…');
        }
        ReplyPreview {
            message_id: self.id,
            user_name: self.user_name.clone(),
            snippet,
        }
    }
}

/// Message submitted by the composer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    pub user_id: String,
    pub user_name: String,
    pub content: String,
    #[serde(default)]
    pub reply_to: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyPreview {
    pub message_id: Uuid,
    pub user_name: String,
    pub snippet: String,
}

/// A message as rendered in the list: reactions and reply quote attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageView {
    #[serde(flatten)]
    pub message: Message,
    /// Emoji → count.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub reactions: BTreeMap<String, u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<ReplyPreview>,
}
