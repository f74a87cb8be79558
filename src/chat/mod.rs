use std::fmt::Display;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::{Router, routing::get};
use serde::{Deserialize, Serialize};

use service::ChatService;

use crate::graph;
use crate::state::AppState;

mod handler;
pub mod model;
pub mod service;

type Result<T> = std::result::Result<T, Error>;
pub type Service = Arc<dyn ChatService + Send + Sync>;

pub fn api<S>(s: AppState) -> Router<S> {
    Router::new()
        .route("/chats", get(handler::api::find_all))
        .with_state(s)
}

/// Conversation (thread) id as issued by the Graph API.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub struct Id(pub String);

impl Id {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Instagram-scoped id of the conversation counterpart (IGSID), distinct
/// from the conversation id and recognizable by its prefix.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub const PREFIX: &str = "ig_";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    _Graph(#[from] graph::Error),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::_Graph(e) => e.status(),
        }
    }
}
