pub(super) mod api {
    use std::sync::Arc;

    use axum::Json;
    use axum::extract::State;
    use axum::http::HeaderMap;
    use axum_extra::extract::Query;
    use log::{debug, info};
    use serde::Deserialize;

    use crate::integration::Config;
    use crate::webhook::{self, model::Event};

    #[derive(Deserialize)]
    pub struct VerifyParams {
        #[serde(rename = "hub.mode")]
        mode: Option<String>,
        #[serde(rename = "hub.verify_token")]
        verify_token: Option<String>,
        #[serde(rename = "hub.challenge")]
        challenge: Option<String>,
    }

    /// Subscription handshake: echo the challenge back when the verify
    /// token matches.
    pub async fn verify(
        Query(params): Query<VerifyParams>,
        config: State<Arc<Config>>,
    ) -> crate::Result<String> {
        let token_matches = params.verify_token.as_deref() == Some(config.graph.verify_token());

        if params.mode.as_deref() == Some("subscribe") && token_matches {
            return Ok(params.challenge.unwrap_or_default());
        }

        Err(webhook::Error::VerificationFailed.into())
    }

    /// Accepts delivery and logs what arrived. Events are not processed.
    pub async fn receive(
        headers: HeaderMap,
        Json(event): Json<Event>,
    ) -> crate::Result<&'static str> {
        if !headers.contains_key("x-hub-signature") {
            return Err(webhook::Error::MissingSignature.into());
        }

        if event.object.as_deref() != Some("instagram") {
            debug!("Ignoring webhook for object {:?}", event.object);
            return Ok("OK");
        }

        for entry in &event.entry {
            for messaging in &entry.messaging {
                let sender = messaging
                    .sender
                    .as_ref()
                    .and_then(|s| s.id.as_deref())
                    .unwrap_or("unknown");

                if let Some(message) = &messaging.message {
                    info!("Message event from {sender}");
                    if let Some(text) = &message.text {
                        debug!("Text message: {text}");
                    }
                    if message.attachments.is_some() {
                        debug!("Message with attachments from {sender}");
                    }
                } else if let Some(reaction) = &messaging.reaction {
                    info!("Reaction event from {sender}: {reaction}");
                } else if let Some(read) = &messaging.read {
                    info!("Read event from {sender}: {read}");
                } else if let Some(postback) = &messaging.postback {
                    info!("Postback event from {sender}: {postback}");
                }
            }

            for change in &entry.changes {
                debug!("Change event on field {:?}", change.field);
                if change.field.as_deref() == Some("messages") {
                    debug!("Message-related change: {:?}", change.value);
                }
            }

            if entry.messaging.is_empty() && entry.changes.is_empty() {
                debug!("Unknown entry structure: {:?}", entry.id);
            }
        }

        Ok("OK")
    }
}
