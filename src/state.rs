use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::service::AuthServiceImpl;
use crate::chat::service::ChatServiceImpl;
use crate::graph::client::GraphClient;
use crate::message::service::MessageServiceImpl;
use crate::user::repository::PgUserRepository;
use crate::user::service::UserServiceImpl;
use crate::{auth, chat, graph, integration, message, user};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub config: Arc<integration::Config>,
    pub auth_service: auth::Service,
    pub chat_service: chat::Service,
    pub message_service: message::Service,
    pub user_service: user::Service,
}

impl AppState {
    pub fn init(config: integration::Config) -> Self {
        let http = integration::init_http_client();
        let graph: graph::Client = Arc::new(GraphClient::new(&config.graph, http));

        let pool = integration::db::init(&config.db);
        let user_repo: user::Repository = Arc::new(PgUserRepository::new(pool));

        let chat_service: chat::Service = Arc::new(ChatServiceImpl::new(graph.clone()));

        Self {
            auth_service: Arc::new(AuthServiceImpl::new(&config.graph, graph.clone())),
            message_service: Arc::new(MessageServiceImpl::new(graph, chat_service.clone())),
            chat_service,
            user_service: Arc::new(UserServiceImpl::new(user_repo)),
            config: Arc::new(config),
        }
    }
}
