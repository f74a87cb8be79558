use async_trait::async_trait;
use log::debug;

use crate::Raw;
use crate::graph;

use super::{Account, Code, Token};

#[async_trait]
pub trait AuthService {
    /// URL to bounce the browser to for the Instagram consent screen.
    fn authorize(&self) -> String;

    async fn exchange_code(&self, code: Code) -> super::Result<Token>;

    async fn account(&self, token: &Token) -> super::Result<Account>;
}

#[derive(Clone)]
pub struct AuthServiceImpl {
    cfg: crate::integration::graph::Config,
    graph: graph::Client,
}

impl AuthServiceImpl {
    pub fn new(cfg: &crate::integration::graph::Config, graph: graph::Client) -> Self {
        Self {
            cfg: cfg.to_owned(),
            graph,
        }
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    fn authorize(&self) -> String {
        self.cfg.authorize_url()
    }

    async fn exchange_code(&self, code: Code) -> super::Result<Token> {
        debug!("Exchanging code '{code:?}' for an access token");

        let grant = self.graph.exchange_code(code.raw()).await?;

        if let Some(user_id) = grant.user_id {
            debug!("Access token granted for Instagram user {user_id}");
        }

        Ok(Token::new(grant.access_token))
    }

    async fn account(&self, token: &Token) -> super::Result<Account> {
        let profile = self.graph.profile(token).await?;
        Ok(Account::from(profile))
    }
}
