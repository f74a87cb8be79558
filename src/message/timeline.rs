use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use crate::chat;

use super::Id;
use super::model::{Content, Message};

/// In-memory per-chat view state backing the optimistic send pipeline.
///
/// A send stages a placeholder immediately; the gateway call then either
/// confirms it in place or discards it. Placeholder ids carry a
/// process-wide monotonic sequence number, so reconciliation is
/// issuance-ordered and two sends can never collide on an id.
pub struct Timeline {
    seq: AtomicU64,
    messages: RwLock<HashMap<chat::Id, Vec<Message>>>,
    previews: RwLock<HashMap<chat::Id, String>>,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            seq: AtomicU64::new(0),
            messages: RwLock::new(HashMap::new()),
            previews: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    /// Replaces a chat's message list with a fresh fetch.
    pub async fn replace(&self, chat_id: &chat::Id, messages: Vec<Message>) {
        self.messages
            .write()
            .await
            .insert(chat_id.clone(), messages);
    }

    pub async fn messages(&self, chat_id: &chat::Id) -> Vec<Message> {
        self.messages
            .read()
            .await
            .get(chat_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn preview(&self, chat_id: &chat::Id) -> Option<String> {
        self.previews.read().await.get(chat_id).cloned()
    }

    /// Appends a pending placeholder and returns its temporary id.
    /// Append-only: arrival order is preserved.
    pub async fn stage(&self, chat_id: &chat::Id, sender: &str, content: Content) -> Id {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        let id = Id::temp(seq);

        let placeholder = Message {
            id: id.clone(),
            content,
            sender: sender.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            reactions: Vec::new(),
        };

        self.messages
            .write()
            .await
            .entry(chat_id.clone())
            .or_default()
            .push(placeholder);

        id
    }

    /// Swaps the placeholder for the server-confirmed message, keeping
    /// its position, and moves the chat preview to the sent content.
    pub async fn confirm(&self, chat_id: &chat::Id, temp_id: &Id, confirmed: Message) {
        let preview = confirmed.content.preview();

        {
            let mut messages = self.messages.write().await;
            if let Some(list) = messages.get_mut(chat_id) {
                if let Some(slot) = list.iter_mut().find(|m| m.id == *temp_id) {
                    *slot = confirmed;
                }
            }
        }

        self.previews.write().await.insert(chat_id.clone(), preview);
    }

    /// Drops the placeholder of a failed send. The preview is left
    /// untouched.
    pub async fn discard(&self, chat_id: &chat::Id, temp_id: &Id) {
        let mut messages = self.messages.write().await;
        if let Some(list) = messages.get_mut(chat_id) {
            list.retain(|m| m.id != *temp_id);
        }
    }
}
