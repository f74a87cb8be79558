pub(super) mod api {
    use axum::extract::{Path, State};
    use axum::{Extension, Json};
    use serde::Deserialize;

    use crate::auth::Token;
    use crate::chat;
    use crate::message::model::{Message, Outgoing, SendReceipt};
    use crate::message::{self, Id};

    pub async fn find_by_chat(
        Extension(token): Extension<Token>,
        Path(chat_id): Path<chat::Id>,
        message_service: State<message::Service>,
    ) -> crate::Result<Json<Vec<Message>>> {
        let messages = message_service.find_by_chat(&token, &chat_id).await?;
        Ok(Json(messages))
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SendParams {
        recipient_id: Option<chat::Id>,
        message_type: Option<String>,
        content: Option<String>,
    }

    pub async fn send(
        Extension(token): Extension<Token>,
        message_service: State<message::Service>,
        Json(params): Json<SendParams>,
    ) -> crate::Result<Json<SendReceipt>> {
        let recipient = params
            .recipient_id
            .ok_or(message::Error::RecipientRequired)?;

        let (message_type, content) = params
            .message_type
            .filter(|t| !t.is_empty())
            .zip(params.content.filter(|c| !c.is_empty()))
            .ok_or(message::Error::ContentRequired)?;

        let outgoing = Outgoing::parse(&message_type, content)?;
        let message = message_service.send(&token, &recipient, outgoing).await?;

        Ok(Json(SendReceipt::from(message)))
    }

    #[derive(Deserialize)]
    pub struct ReactParams {
        emoji: Option<String>,
    }

    pub async fn react(
        Extension(token): Extension<Token>,
        Path((chat_id, message_id)): Path<(chat::Id, Id)>,
        message_service: State<message::Service>,
        Json(params): Json<ReactParams>,
    ) -> crate::Result<Json<serde_json::Value>> {
        let emoji = params
            .emoji
            .filter(|e| !e.is_empty())
            .ok_or(message::Error::EmojiRequired)?;

        message_service
            .react(&token, &chat_id, &message_id, &emoji)
            .await?;

        Ok(Json(serde_json::json!({ "success": true })))
    }
}
