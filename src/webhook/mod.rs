use axum::http::StatusCode;
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

mod handler;
pub mod model;

pub fn api<S>(s: AppState) -> Router<S> {
    Router::new()
        .route("/webhooks/instagram", get(handler::api::verify))
        .route("/webhooks/instagram", post(handler::api::receive))
        .with_state(s)
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Forbidden")]
    VerificationFailed,
    #[error("No signature")]
    MissingSignature,
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::VerificationFailed => StatusCode::FORBIDDEN,
            Self::MissingSignature => StatusCode::UNAUTHORIZED,
        }
    }
}
