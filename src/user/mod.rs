use std::fmt::Display;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::{
    Router,
    routing::{get, post, put},
};
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, Output, ToSql};
use email_address::EmailAddress;
use repository::UserRepository;
use serde::{Deserialize, Serialize};
use service::UserService;
use uuid::Uuid;

use crate::state::AppState;

mod handler;
pub mod model;
pub mod repository;
pub mod service;

type Result<T> = std::result::Result<T, Error>;
pub type Repository = Arc<dyn UserRepository + Send + Sync>;
pub type Service = Arc<dyn UserService + Send + Sync>;

pub fn api<S>(s: AppState) -> Router<S> {
    Router::new()
        .route("/users/{id}/onboarding", get(handler::api::find_onboarding))
        .route("/users/{id}/onboarding", put(handler::api::update_step))
        .route(
            "/users/{id}/onboarding/complete",
            post(handler::api::complete),
        )
        .with_state(s)
}

/// User id as issued by the hosted auth provider.
#[derive(
    Clone, Copy, Debug, Deserialize, Serialize, Hash, PartialEq, Eq, FromSqlRow, AsExpression,
)]
#[diesel(sql_type = diesel::sql_types::Uuid)]
pub struct Id(Uuid);

impl Id {
    pub const fn get(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for Id {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromSql<diesel::sql_types::Uuid, Pg> for Id {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        <Uuid as FromSql<diesel::sql_types::Uuid, Pg>>::from_sql(bytes).map(Id)
    }
}

impl ToSql<diesel::sql_types::Uuid, Pg> for Id {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        <Uuid as ToSql<diesel::sql_types::Uuid, Pg>>::to_sql(&self.0, out)
    }
}

/// Validated on the way in, stored as plain text.
#[derive(Clone, Debug, Serialize, PartialEq, Eq, FromSqlRow, AsExpression)]
#[diesel(sql_type = diesel::sql_types::Text)]
pub struct Email(String);

impl Email {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Email {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Email, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if !EmailAddress::is_valid(&s) {
            return Err(serde::de::Error::custom(format!("invalid email: {s}")));
        }
        Ok(Email(s))
    }
}

impl FromSql<diesel::sql_types::Text, Pg> for Email {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        <String as FromSql<diesel::sql_types::Text, Pg>>::from_sql(bytes).map(Email)
    }
}

impl ToSql<diesel::sql_types::Text, Pg> for Email {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        <String as ToSql<diesel::sql_types::Text, Pg>>::to_sql(&self.0, out)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("user not found: {0}")]
    NotFound(Id),
    #[error("email is required to create the user row")]
    EmailRequired,

    #[error(transparent)]
    _R2d2(#[from] r2d2::Error),

    #[error(transparent)]
    _Diesel(#[from] diesel::result::Error),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::EmailRequired => StatusCode::BAD_REQUEST,
            Self::_R2d2(_) | Self::_Diesel(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
