use std::fmt;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum_extra::extract::cookie::Cookie;
use serde::{Deserialize, Serialize};

use crate::graph;
use crate::state::AppState;
use crate::{Raw, Redact};

pub mod handler;
pub mod middleware;
pub mod service;

type Result<T> = std::result::Result<T, Error>;
pub type Service = std::sync::Arc<dyn service::AuthService + Send + Sync>;

pub fn api<S>(s: AppState) -> Router<S> {
    Router::new()
        .route("/auth/instagram", get(handler::api::connect))
        .route("/auth/instagram/callback", get(handler::api::callback))
        .route("/auth/instagram/status", get(handler::api::status))
        .route("/auth/instagram/me", get(handler::api::me))
        .route("/auth/instagram/disconnect", post(handler::api::disconnect))
        .with_state(s)
}

/// Bearer token for the connected Instagram account. Lives only in the
/// HTTP-only cookie and request extensions; never in logs whole.
#[derive(Clone, PartialEq)]
pub struct Token(String);

impl Token {
    pub const COOKIE: &str = "instagram_access_token";

    pub fn new(t: impl Into<String>) -> Self {
        Self(t.into())
    }
}

impl Redact for Token {}

impl Raw for Token {
    fn raw(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({})", self.redact())
    }
}

impl From<&Cookie<'_>> for Token {
    fn from(c: &Cookie<'_>) -> Self {
        Self::new(c.value())
    }
}

impl From<Token> for Cookie<'_> {
    fn from(t: Token) -> Self {
        Self::new(Token::COOKIE, t.0)
    }
}

/// Authorization code handed back by the Instagram redirect.
#[derive(Deserialize)]
pub struct Code(String);

impl Code {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl Redact for Code {}

impl Raw for Code {
    fn raw(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code({})", self.redact())
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct Account {
    pub id: String,
    pub username: String,
    pub provider: &'static str,
}

impl From<graph::model::Profile> for Account {
    fn from(p: graph::model::Profile) -> Self {
        Self {
            id: p.id,
            username: p.username,
            provider: "instagram",
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ConnectionStatus {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error(transparent)]
    _Graph(#[from] graph::Error),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotAuthenticated => StatusCode::UNAUTHORIZED,
            Self::_Graph(e) => e.status(),
        }
    }
}
