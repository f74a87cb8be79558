use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::auth;
use crate::chat;
use crate::graph;

use super::Id;
use super::model::{Message, Outgoing};
use super::timeline::Timeline;

/// Sender label for the connected account's own messages.
const SELF_SENDER: &str = "me";

#[async_trait]
pub trait MessageService {
    /// Fetches a chat's messages from the Graph API and makes them the
    /// chat's current timeline.
    async fn find_by_chat(
        &self,
        token: &auth::Token,
        chat_id: &chat::Id,
    ) -> super::Result<Vec<Message>>;

    /// Optimistic send: stage placeholder, call the gateway, reconcile.
    async fn send(
        &self,
        token: &auth::Token,
        chat_id: &chat::Id,
        outgoing: Outgoing,
    ) -> super::Result<Message>;

    async fn react(
        &self,
        token: &auth::Token,
        chat_id: &chat::Id,
        message_id: &Id,
        emoji: &str,
    ) -> super::Result<()>;

    /// Current in-memory timeline, placeholders included.
    async fn timeline(&self, chat_id: &chat::Id) -> Vec<Message>;

    /// Optimistically-maintained conversation preview, if any send has
    /// been confirmed for this chat.
    async fn preview(&self, chat_id: &chat::Id) -> Option<String>;
}

#[derive(Clone)]
pub struct MessageServiceImpl {
    graph: graph::Client,
    chat_service: chat::Service,
    timeline: Arc<Timeline>,
}

impl MessageServiceImpl {
    pub fn new(graph: graph::Client, chat_service: chat::Service) -> Self {
        Self {
            graph,
            chat_service,
            timeline: Arc::new(Timeline::new()),
        }
    }
}

#[async_trait]
impl MessageService for MessageServiceImpl {
    async fn find_by_chat(
        &self,
        token: &auth::Token,
        chat_id: &chat::Id,
    ) -> super::Result<Vec<Message>> {
        let messages = self
            .graph
            .messages(token, chat_id.as_str())
            .await?
            .into_iter()
            .map(Message::from)
            .collect::<Vec<_>>();

        self.timeline.replace(chat_id, messages.clone()).await;

        Ok(messages)
    }

    async fn send(
        &self,
        token: &auth::Token,
        chat_id: &chat::Id,
        outgoing: Outgoing,
    ) -> super::Result<Message> {
        let participant = self.chat_service.resolve_participant(token, chat_id).await?;

        let temp_id = self
            .timeline
            .stage(chat_id, SELF_SENDER, outgoing.content())
            .await;
        debug!("Staged {temp_id} for chat {chat_id}");

        match self
            .graph
            .send(token, participant.as_str(), &outgoing.payload())
            .await
        {
            Ok(ack) => {
                let confirmed = Message {
                    id: Id(ack.message_id),
                    content: outgoing.content(),
                    sender: SELF_SENDER.to_string(),
                    timestamp: chrono::Utc::now().to_rfc3339(),
                    reactions: Vec::new(),
                };

                self.timeline
                    .confirm(chat_id, &temp_id, confirmed.clone())
                    .await;

                Ok(confirmed)
            }
            Err(e) => {
                self.timeline.discard(chat_id, &temp_id).await;
                Err(e.into())
            }
        }
    }

    async fn react(
        &self,
        token: &auth::Token,
        chat_id: &chat::Id,
        message_id: &Id,
        emoji: &str,
    ) -> super::Result<()> {
        let participant = self.chat_service.resolve_participant(token, chat_id).await?;

        self.graph
            .react(token, participant.as_str(), message_id.as_str(), emoji)
            .await?;

        Ok(())
    }

    async fn timeline(&self, chat_id: &chat::Id) -> Vec<Message> {
        self.timeline.messages(chat_id).await
    }

    async fn preview(&self, chat_id: &chat::Id) -> Option<String> {
        self.timeline.preview(chat_id).await
    }
}
