use async_trait::async_trait;
use log::warn;

use crate::auth;
use crate::graph;

use super::model::Conversation;
use super::{Id, ParticipantId};

#[async_trait]
pub trait ChatService {
    async fn find_all(&self, token: &auth::Token) -> super::Result<Vec<Conversation>>;

    /// Maps a conversation id to the counterpart's IGSID. Already-scoped
    /// ids pass through untouched; otherwise the conversation list is
    /// consulted. An unresolvable id falls back to itself — the send
    /// still goes out, possibly to the wrong recipient, which is why
    /// this logs a warning rather than failing.
    async fn resolve_participant(
        &self,
        token: &auth::Token,
        chat_id: &Id,
    ) -> super::Result<ParticipantId>;
}

#[derive(Clone)]
pub struct ChatServiceImpl {
    graph: graph::Client,
}

impl ChatServiceImpl {
    pub fn new(graph: graph::Client) -> Self {
        Self { graph }
    }
}

#[async_trait]
impl ChatService for ChatServiceImpl {
    async fn find_all(&self, token: &auth::Token) -> super::Result<Vec<Conversation>> {
        let conversations = self.graph.conversations(token).await?;
        Ok(conversations.into_iter().map(Conversation::from).collect())
    }

    async fn resolve_participant(
        &self,
        token: &auth::Token,
        chat_id: &Id,
    ) -> super::Result<ParticipantId> {
        if chat_id.as_str().starts_with(ParticipantId::PREFIX) {
            return Ok(ParticipantId::new(chat_id.as_str()));
        }

        let chats = self.find_all(token).await?;
        let resolved = chats
            .into_iter()
            .find(|c| c.id == *chat_id)
            .map(|c| c.participant_id)
            .filter(|p| !p.is_empty());

        match resolved {
            Some(participant_id) => Ok(participant_id),
            None => {
                warn!(
                    "Could not find participant id for chat {chat_id}, falling back to the conversation id"
                );
                Ok(ParticipantId::new(chat_id.as_str()))
            }
        }
    }
}
