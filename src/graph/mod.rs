use std::sync::Arc;

use axum::http::StatusCode;

use client::GraphApi;

pub mod client;
pub mod model;

type Result<T> = std::result::Result<T, Error>;

pub type Client = Arc<dyn GraphApi + Send + Sync>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Instagram API error: {body}")]
    UpstreamApi { status: u16, body: String },

    #[error(transparent)]
    _Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    _Url(#[from] url::ParseError),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::UpstreamApi { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::_Reqwest(_) | Self::_Url(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
