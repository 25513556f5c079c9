//! Chat hub: one in-memory room per group.
//!
//! Messages are appended in arrival order and live only as long as the
//! process. There are no delivery acknowledgements and nothing is synced
//! between sessions.

use std::collections::{BTreeMap, HashMap};

use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use super::model::{Message, MessageView, NewMessage, ReplyPreview};
use crate::error::ChatError;

#[derive(Debug, Default)]
struct ChatRoom {
    messages: Vec<Message>,
    reactions: HashMap<Uuid, BTreeMap<String, u32>>,
}

impl ChatRoom {
    fn find(&self, id: Uuid) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    fn view(&self, message: &Message) -> MessageView {
        MessageView {
            message: message.clone(),
            reactions: self.reactions.get(&message.id).cloned().unwrap_or_default(),
            reply: message
                .reply_to
                .and_then(|id| self.find(id))
                .map(Message::reply_preview),
        }
    }
}

/// All group chat rooms.
#[derive(Default)]
pub struct ChatHub {
    rooms: RwLock<HashMap<String, ChatRoom>>,
}

impl ChatHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// A hub with an empty room for each group id.
    pub fn with_groups<I, S>(group_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rooms = group_ids
            .into_iter()
            .map(|id| (id.into(), ChatRoom::default()))
            .collect();
        Self {
            rooms: RwLock::new(rooms),
        }
    }

    /// Make sure a room exists for `group_id`.
    pub async fn open_room(&self, group_id: &str) {
        let mut rooms = self.rooms.write().await;
        rooms.entry(group_id.to_string()).or_default();
    }

    pub async fn has_room(&self, group_id: &str) -> bool {
        self.rooms.read().await.contains_key(group_id)
    }

    /// Append a message to a group's room.
    pub async fn post(&self, group_id: &str, new: NewMessage) -> Result<Message, ChatError> {
        let content = new.content.trim();
        if content.is_empty() {
            debug!(group_id, "Ignoring empty message");
            return Err(ChatError::EmptyMessage);
        }

        let mut rooms = self.rooms.write().await;
        let room = rooms.get_mut(group_id).ok_or_else(|| ChatError::GroupNotFound {
            id: group_id.to_string(),
        })?;

        let mut message = Message::new(group_id, new.user_id, new.user_name, content);
        if let Some(reply_to) = new.reply_to {
            if room.find(reply_to).is_none() {
                return Err(ChatError::MessageNotFound { id: reply_to });
            }
            message = message.with_reply_to(reply_to);
        }

        info!(
            group_id,
            message_id = %message.id,
            user_id = %message.user_id,
            reply = message.reply_to.is_some(),
            "Message posted"
        );
        room.messages.push(message.clone());
        Ok(message)
    }

    /// Messages of a room in append order, with reactions and reply quotes.
    pub async fn history(&self, group_id: &str) -> Result<Vec<MessageView>, ChatError> {
        let rooms = self.rooms.read().await;
        let room = rooms.get(group_id).ok_or_else(|| ChatError::GroupNotFound {
            id: group_id.to_string(),
        })?;
        Ok(room.messages.iter().map(|m| room.view(m)).collect())
    }

    /// Add one emoji reaction. Returns the message's updated tally.
    pub async fn react(
        &self,
        group_id: &str,
        message_id: Uuid,
        emoji: &str,
    ) -> Result<BTreeMap<String, u32>, ChatError> {
        let emoji = emoji.trim();
        if emoji.is_empty() {
            return Err(ChatError::EmptyReaction);
        }

        let mut rooms = self.rooms.write().await;
        let room = rooms.get_mut(group_id).ok_or_else(|| ChatError::GroupNotFound {
            id: group_id.to_string(),
        })?;
        if room.find(message_id).is_none() {
            return Err(ChatError::MessageNotFound { id: message_id });
        }

        let tally = room.reactions.entry(message_id).or_default();
        *tally.entry(emoji.to_string()).or_insert(0) += 1;
        debug!(group_id, message_id = %message_id, emoji, "Reaction added");
        Ok(tally.clone())
    }

    /// The quote a reply to `message_id` would show.
    pub async fn reply_preview(
        &self,
        group_id: &str,
        message_id: Uuid,
    ) -> Result<ReplyPreview, ChatError> {
        let rooms = self.rooms.read().await;
        let room = rooms.get(group_id).ok_or_else(|| ChatError::GroupNotFound {
            id: group_id.to_string(),
        })?;
        room.find(message_id)
            .map(Message::reply_preview)
            .ok_or(ChatError::MessageNotFound { id: message_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_message(content: &str) -> NewMessage {
        NewMessage {
            user_id: "u-sarah".into(),
            user_name: "Sarah Chen".into(),
            content: content.into(),
            reply_to: None,
        }
    }

    #[tokio::test]
    async fn post_and_history_keep_append_order() {
        let hub = ChatHub::with_groups(["grp-1"]);
        hub.post("grp-1", new_message("first")).await.unwrap();
        hub.post("grp-1", new_message("  second  ")).await.unwrap();

        let history = hub.history("grp-1").await.unwrap();
        let contents: Vec<&str> = history.iter().map(|v| v.message.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);
        assert!(history.iter().all(|v| v.message.group_id == "grp-1"));
    }

    #[tokio::test]
    async fn empty_message_rejected() {
        let hub = ChatHub::with_groups(["grp-1"]);
        assert_eq!(
            hub.post("grp-1", new_message("   ")).await.unwrap_err(),
            ChatError::EmptyMessage
        );
        assert!(hub.history("grp-1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_group() {
        let hub = ChatHub::new();
        assert!(matches!(
            hub.post("nope", new_message("hi")).await,
            Err(ChatError::GroupNotFound { .. })
        ));
        assert!(hub.history("nope").await.is_err());

        hub.open_room("nope").await;
        assert!(hub.has_room("nope").await);
        assert!(hub.post("nope", new_message("hi")).await.is_ok());
    }

    #[tokio::test]
    async fn replies_link_to_existing_messages() {
        let hub = ChatHub::with_groups(["grp-1", "grp-2"]);
        let original = hub.post("grp-1", new_message("Anyone going Friday?")).await.unwrap();

        let reply = hub
            .post(
                "grp-1",
                NewMessage {
                    reply_to: Some(original.id),
                    ..new_message("Count me in")
                },
            )
            .await
            .unwrap();
        assert_eq!(reply.reply_to, Some(original.id));

        let history = hub.history("grp-1").await.unwrap();
        let quoted = history[1].reply.as_ref().unwrap();
        assert_eq!(quoted.message_id, original.id);
        assert_eq!(quoted.snippet, "Anyone going Friday?");

        // Replies cannot cross rooms
        let err = hub
            .post(
                "grp-2",
                NewMessage {
                    reply_to: Some(original.id),
                    ..new_message("wrong room")
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err, ChatError::MessageNotFound { id: original.id });
    }

    #[tokio::test]
    async fn reactions_tally_per_emoji() {
        let hub = ChatHub::with_groups(["grp-1"]);
        let msg = hub.post("grp-1", new_message("Launch day!")).await.unwrap();

        hub.react("grp-1", msg.id, "🎉").await.unwrap();
        hub.react("grp-1", msg.id, "🎉").await.unwrap();
        let tally = hub.react("grp-1", msg.id, "👍").await.unwrap();
        assert_eq!(tally.get("🎉"), Some(&2));
        assert_eq!(tally.get("👍"), Some(&1));

        let history = hub.history("grp-1").await.unwrap();
        assert_eq!(history[0].reactions, tally);

        assert_eq!(
            hub.react("grp-1", msg.id, " ").await.unwrap_err(),
            ChatError::EmptyReaction
        );
        let missing = Uuid::new_v4();
        assert_eq!(
            hub.react("grp-1", missing, "👍").await.unwrap_err(),
            ChatError::MessageNotFound { id: missing }
        );
    }

    #[tokio::test]
    async fn reply_preview_lookup() {
        let hub = ChatHub::with_groups(["grp-1"]);
        let msg = hub.post("grp-1", new_message("hello")).await.unwrap();
        let preview = hub.reply_preview("grp-1", msg.id).await.unwrap();
        assert_eq!(preview.user_name, "Sarah Chen");
        assert!(hub.reply_preview("grp-1", Uuid::new_v4()).await.is_err());
    }
}
