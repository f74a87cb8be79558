use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use url::Url;

use crate::Raw;
use crate::auth;
use crate::integration;

use super::model::{
    AccessGrant, ConversationData, MessageData, OutgoingPayload, Page, Profile, Recipient,
    SendAck, SendRequest,
};

const CONVERSATION_FIELDS: &str =
    "participants,updated_time,unread_count,messages{id,from,message,created_time,attachments}";
const MESSAGE_FIELDS: &str = "message,from,created_time,attachments,reactions";

/// One-shot calls against the Instagram Graph API. No retries, no
/// backoff; a failed call surfaces once and is done.
#[async_trait]
pub trait GraphApi {
    async fn exchange_code(&self, code: &str) -> super::Result<AccessGrant>;

    async fn profile(&self, token: &auth::Token) -> super::Result<Profile>;

    async fn conversations(&self, token: &auth::Token) -> super::Result<Vec<ConversationData>>;

    async fn messages(
        &self,
        token: &auth::Token,
        chat_id: &str,
    ) -> super::Result<Vec<MessageData>>;

    async fn send(
        &self,
        token: &auth::Token,
        recipient_id: &str,
        payload: &OutgoingPayload,
    ) -> super::Result<SendAck>;

    async fn react(
        &self,
        token: &auth::Token,
        recipient_id: &str,
        message_id: &str,
        emoji: &str,
    ) -> super::Result<SendAck> {
        self.send(
            token,
            recipient_id,
            &OutgoingPayload::reaction(message_id, emoji),
        )
        .await
    }
}

#[derive(Clone)]
pub struct GraphClient {
    cfg: integration::graph::Config,
    http: reqwest::Client,
}

impl GraphClient {
    pub fn new(cfg: &integration::graph::Config, http: reqwest::Client) -> Self {
        Self {
            cfg: cfg.to_owned(),
            http,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        token: &auth::Token,
    ) -> super::Result<T> {
        let response = self.http.get(url).bearer_auth(token.raw()).send().await?;
        read_json(response).await
    }
}

#[async_trait]
impl GraphApi for GraphClient {
    async fn exchange_code(&self, code: &str) -> super::Result<AccessGrant> {
        let params = [
            ("client_id", self.cfg.client_id()),
            ("client_secret", self.cfg.client_secret()),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.cfg.redirect_url()),
            ("code", code),
        ];

        let response = self
            .http
            .post(self.cfg.token_url())
            .form(&params)
            .send()
            .await?;

        read_json(response).await
    }

    async fn profile(&self, token: &auth::Token) -> super::Result<Profile> {
        let url = Url::parse_with_params(
            &format!("{}/me", self.cfg.api_url()),
            [("fields", "id,username")],
        )?;

        self.get_json(url, token).await
    }

    async fn conversations(&self, token: &auth::Token) -> super::Result<Vec<ConversationData>> {
        let mut url = Url::parse_with_params(
            &format!("{}/me/conversations", self.cfg.api_url()),
            [("fields", CONVERSATION_FIELDS)],
        )?;

        let mut conversations = Vec::new();
        loop {
            let page: Page<ConversationData> = self.get_json(url, token).await?;
            conversations.extend(page.data);

            match page.paging.and_then(|p| p.next) {
                Some(next) => url = Url::parse(&next)?,
                None => break,
            }
        }

        debug!("Fetched {} conversations", conversations.len());
        Ok(conversations)
    }

    async fn messages(
        &self,
        token: &auth::Token,
        chat_id: &str,
    ) -> super::Result<Vec<MessageData>> {
        let url = Url::parse_with_params(
            &format!("{}/{chat_id}/messages", self.cfg.api_url()),
            [("fields", MESSAGE_FIELDS)],
        )?;

        let page: Page<MessageData> = self.get_json(url, token).await?;
        Ok(page.data)
    }

    async fn send(
        &self,
        token: &auth::Token,
        recipient_id: &str,
        payload: &OutgoingPayload,
    ) -> super::Result<SendAck> {
        let request = SendRequest {
            recipient: Recipient { id: recipient_id },
            message: payload,
        };

        let response = self
            .http
            .post(format!("{}/me/messages", self.cfg.api_url()))
            .bearer_auth(token.raw())
            .json(&request)
            .send()
            .await?;

        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> super::Result<T> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(super::Error::UpstreamApi {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response.json::<T>().await?)
}
