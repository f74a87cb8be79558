pub(super) mod api {
    use axum::extract::State;
    use axum::{Extension, Json};

    use crate::auth::Token;
    use crate::chat::{self, model::Conversation};

    pub async fn find_all(
        Extension(token): Extension<Token>,
        chat_service: State<chat::Service>,
    ) -> crate::Result<Json<Vec<Conversation>>> {
        let chats = chat_service.find_all(&token).await?;
        Ok(Json(chats))
    }
}
