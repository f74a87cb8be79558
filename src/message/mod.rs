use std::fmt::Display;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::{
    Router,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use service::MessageService;

use crate::state::AppState;
use crate::{chat, graph};

pub mod attachment;
mod handler;
pub mod model;
pub mod service;
pub mod timeline;

type Result<T> = std::result::Result<T, Error>;
pub type Service = Arc<dyn MessageService + Send + Sync>;

pub fn api<S>(s: AppState) -> Router<S> {
    Router::new()
        .route("/chats/{chat_id}/messages", get(handler::api::find_by_chat))
        .route("/messages", post(handler::api::send))
        .route(
            "/chats/{chat_id}/messages/{message_id}/reactions",
            post(handler::api::react),
        )
        .with_state(s)
}

/// Message id: either issued by the Graph API or a local `temp-<seq>`
/// placeholder id for a send still in flight.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub struct Id(pub String);

impl Id {
    const TEMP_PREFIX: &str = "temp-";

    pub fn temp(seq: u64) -> Self {
        Self(format!("{}{seq}", Self::TEMP_PREFIX))
    }

    pub fn is_temp(&self) -> bool {
        self.0.starts_with(Self::TEMP_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Recipient ID is required")]
    RecipientRequired,
    #[error("Message type and content are required")]
    ContentRequired,
    #[error("Emoji is required")]
    EmojiRequired,
    #[error("Invalid message type: {0}")]
    UnsupportedType(String),

    #[error(transparent)]
    _Chat(#[from] chat::Error),

    #[error(transparent)]
    _Graph(#[from] graph::Error),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::RecipientRequired
            | Self::ContentRequired
            | Self::EmojiRequired
            | Self::UnsupportedType(_) => StatusCode::BAD_REQUEST,

            Self::_Chat(e) => e.status(),
            Self::_Graph(e) => e.status(),
        }
    }
}
