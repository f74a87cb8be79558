use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;
use serde::Serialize;

use crate::{auth, chat, graph, message, user, webhook};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub enum Error {
    _Auth(#[from] auth::Error),
    _Chat(#[from] chat::Error),
    _Message(#[from] message::Error),
    _User(#[from] user::Error),
    _Webhook(#[from] webhook::Error),
    _Graph(#[from] graph::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(rename = "errorCode", skip_serializing_if = "Option::is_none")]
    error_code: Option<String>,
}

impl Error {
    fn status(&self) -> StatusCode {
        match self {
            Self::_Auth(e) => e.status(),
            Self::_Chat(e) => e.status(),
            Self::_Message(e) => e.status(),
            Self::_User(e) => e.status(),
            Self::_Webhook(e) => e.status(),
            Self::_Graph(e) => e.status(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!("{self}");
        }

        let error_code = match &self {
            Self::_Graph(graph::Error::UpstreamApi { status, .. }) => Some(status.to_string()),
            Self::_Chat(chat::Error::_Graph(graph::Error::UpstreamApi { status, .. }))
            | Self::_Message(message::Error::_Graph(graph::Error::UpstreamApi {
                status, ..
            })) => Some(status.to_string()),
            _ => None,
        };

        let body = ErrorResponse {
            error: self.to_string(),
            error_code,
        };

        (status, Json(body)).into_response()
    }
}
