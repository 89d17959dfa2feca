//! Direct messages between the viewer and businesses.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::{CatalogError, Result};
use crate::model::{Attachment, Conversation, Message, MessageKind, Viewer};
use crate::seed;

/// Conversations for a single viewer, most recently started first.
#[derive(Debug, Clone)]
pub struct MessageCenter {
    viewer: Viewer,
    conversations: Vec<Conversation>,
    messages: HashMap<String, Vec<Message>>,
}

impl MessageCenter {
    pub fn new(viewer: Viewer) -> Self {
        Self {
            viewer,
            conversations: Vec::new(),
            messages: HashMap::new(),
        }
    }

    /// A message center pre-filled with the seed conversation.
    pub fn seeded(viewer: Viewer, now: DateTime<Utc>) -> Self {
        let mut center = Self::new(viewer);

        for (conversation, messages) in seed::conversations(&center.viewer, now) {
            center.messages.insert(conversation.id.clone(), messages);
            center.conversations.push(conversation);
        }

        debug!(conversations = center.conversations.len(), "Conversations loaded");

        center
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn messages(&self, conversation_id: &str) -> Result<&[Message]> {
        self.messages
            .get(conversation_id)
            .map(Vec::as_slice)
            .ok_or_else(|| CatalogError::ConversationNotFound(conversation_id.to_string()))
    }

    /// Sum of unread counts across all conversations.
    pub fn total_unread(&self) -> u32 {
        self.conversations.iter().map(|c| c.unread_count).sum()
    }

    fn conversation_mut(&mut self, conversation_id: &str) -> Result<&mut Conversation> {
        self.conversations
            .iter_mut()
            .find(|c| c.id == conversation_id)
            .ok_or_else(|| CatalogError::ConversationNotFound(conversation_id.to_string()))
    }

    /// Send a message from the viewer to the other participant.
    #[instrument(skip(self, content, attachment))]
    pub fn send(
        &mut self,
        conversation_id: &str,
        content: impl Into<String>,
        kind: MessageKind,
        attachment: Option<Attachment>,
    ) -> Result<Message> {
        let viewer_id = self.viewer.id.clone();
        let conversation = self.conversation_mut(conversation_id)?;

        let receiver_id = conversation
            .counterpart(&viewer_id)
            .map(|p| p.id.clone())
            .unwrap_or_default();

        let message = Message {
            id: Uuid::new_v4().to_string(),
            sender_id: viewer_id,
            receiver_id,
            content: content.into(),
            kind,
            attachment,
            created_at: Utc::now(),
            read: false,
        };

        conversation.last_message = Some(message.clone());
        conversation.updated_at = message.created_at;

        self.messages
            .entry(conversation_id.to_string())
            .or_default()
            .push(message.clone());

        info!(
            conversation_id,
            receiver = %message.receiver_id,
            kind = ?message.kind,
            "Message sent"
        );

        Ok(message)
    }

    /// Mark every message addressed to the viewer as read.
    #[instrument(skip(self))]
    pub fn mark_read(&mut self, conversation_id: &str) -> Result<()> {
        let viewer_id = self.viewer.id.clone();
        self.conversation_mut(conversation_id)?.unread_count = 0;

        if let Some(messages) = self.messages.get_mut(conversation_id) {
            for message in messages.iter_mut().filter(|m| m.receiver_id == viewer_id) {
                message.read = true;
            }
        }

        Ok(())
    }

    /// Return the conversation with `participant`, creating it if needed.
    #[instrument(skip(self, participant), fields(participant = %participant.id))]
    pub fn start_conversation(&mut self, participant: Viewer) -> String {
        if let Some(existing) = self
            .conversations
            .iter()
            .find(|c| c.participants.iter().any(|p| p.id == participant.id))
        {
            return existing.id.clone();
        }

        let conversation = Conversation {
            id: Uuid::new_v4().to_string(),
            participants: vec![self.viewer.clone(), participant],
            last_message: None,
            unread_count: 0,
            updated_at: Utc::now(),
        };
        let id = conversation.id.clone();

        self.conversations.insert(0, conversation);
        self.messages.insert(id.clone(), Vec::new());

        info!(conversation_id = %id, "Conversation started");

        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer() -> Viewer {
        Viewer::new("current-user", "John Doe", "avatar.jpg")
    }

    fn center() -> MessageCenter {
        MessageCenter::seeded(viewer(), Utc::now())
    }

    #[test]
    fn test_seeded_unread() {
        let center = center();
        assert_eq!(center.total_unread(), 1);
        assert_eq!(center.messages("1").unwrap().len(), 2);
    }

    #[test]
    fn test_send_targets_counterpart() {
        let mut center = center();

        let message = center
            .send("1", "Still in stock?", MessageKind::Text, None)
            .unwrap();

        assert_eq!(message.sender_id, "current-user");
        assert_eq!(message.receiver_id, "tech-store");
        assert_eq!(center.messages("1").unwrap().len(), 3);
        assert_eq!(
            center.conversations()[0].last_message.as_ref().map(|m| &m.id),
            Some(&message.id)
        );
    }

    #[test]
    fn test_send_with_attachment() {
        let mut center = center();
        let attachment = Attachment {
            file_name: "receipt.pdf".to_string(),
            file_size: 2048,
            file_url: "blob:receipt".to_string(),
        };

        let message = center
            .send("1", "Here is my receipt", MessageKind::File, Some(attachment.clone()))
            .unwrap();

        assert_eq!(message.attachment, Some(attachment));
    }

    #[test]
    fn test_mark_read() {
        let mut center = center();

        center.mark_read("1").unwrap();

        assert_eq!(center.total_unread(), 0);
        assert!(center.messages("1").unwrap().iter().all(|m| m.read));
    }

    #[test]
    fn test_start_conversation_reuses_existing() {
        let mut center = center();

        let id = center.start_conversation(seed::tech_store());

        assert_eq!(id, "1");
        assert_eq!(center.conversations().len(), 1);
    }

    #[test]
    fn test_start_conversation_creates_new() {
        let mut center = center();
        let hub = Viewer::new("fashion-hub", "Fashion Hub", "hub.jpg");

        let id = center.start_conversation(hub);

        assert_eq!(center.conversations().len(), 2);
        assert_eq!(center.conversations()[0].id, id);
        assert!(center.messages(&id).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_conversation() {
        let mut center = center();

        assert!(matches!(
            center.send("nope", "hi", MessageKind::Text, None),
            Err(CatalogError::ConversationNotFound(_))
        ));
        assert!(center.mark_read("nope").is_err());
        assert!(center.messages("nope").is_err());
    }
}
