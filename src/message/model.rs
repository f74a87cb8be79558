use serde::Serialize;

use crate::chat;
use crate::graph::model::{MessageData, OutgoingPayload};

use super::Id;
use super::attachment::{self, Attachment, Kind};

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Message {
    pub id: Id,
    #[serde(flatten)]
    pub content: Content,
    pub sender: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reactions: Vec<Reaction>,
}

/// A message renders as either text or attachments, never both. A raw
/// message carrying both keeps only its text.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum Content {
    Text { text: String },
    Media { attachments: Vec<Attachment> },
}

impl Content {
    pub fn text(t: impl Into<String>) -> Self {
        Self::Text { text: t.into() }
    }

    pub fn media(attachments: Vec<Attachment>) -> Self {
        Self::Media { attachments }
    }

    /// Conversation-list summary of this content: truncated text or a
    /// `[Image]`-style tag from the first attachment.
    pub fn preview(&self) -> String {
        match self {
            Self::Text { text } => chat::model::truncate(text),
            Self::Media { attachments } => match attachments.first() {
                Some(a) => format!("[{}]", a.kind.title()),
                None => String::from("[Attachment]"),
            },
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Reaction {
    pub emoji: String,
    pub sender: String,
}

impl From<MessageData> for Message {
    fn from(m: MessageData) -> Self {
        let sender = m
            .from
            .as_ref()
            .and_then(|f| f.username.clone().or_else(|| f.id.clone()))
            .unwrap_or_default();

        let attachments = m
            .attachments
            .map(|a| a.data.iter().map(attachment::normalize).collect::<Vec<_>>())
            .unwrap_or_default();

        let content = match m.message.filter(|t| !t.is_empty()) {
            Some(text) => Content::text(text),
            None if !attachments.is_empty() => Content::media(attachments),
            None => Content::text(""),
        };

        let reactions = m
            .reactions
            .map(|r| {
                r.data
                    .into_iter()
                    .filter_map(|r| {
                        r.reaction.map(|emoji| Reaction {
                            emoji,
                            sender: r.username.unwrap_or_default(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            id: Id(m.id),
            content,
            sender,
            timestamp: m.created_time.unwrap_or_default(),
            reactions,
        }
    }
}

/// Outgoing message as accepted from the UI, one variant per supported
/// message type.
#[derive(Clone, Debug)]
pub enum Outgoing {
    Text(String),
    Image(String),
    Video(String),
    Audio(String),
    Sticker(String),
    Post(String),
}

impl Outgoing {
    pub fn parse(message_type: &str, content: String) -> super::Result<Self> {
        match message_type {
            "text" => Ok(Self::Text(content)),
            "image" => Ok(Self::Image(content)),
            "video" => Ok(Self::Video(content)),
            "audio" => Ok(Self::Audio(content)),
            "sticker" => Ok(Self::Sticker(content)),
            "post" => Ok(Self::Post(content)),
            other => Err(super::Error::UnsupportedType(other.to_string())),
        }
    }

    /// Wire payload for `POST me/messages`.
    pub fn payload(&self) -> OutgoingPayload {
        match self {
            Self::Text(text) => OutgoingPayload::text(text.clone()),
            Self::Image(url) => OutgoingPayload::image(url.clone()),
            Self::Video(url) => OutgoingPayload::video(url.clone()),
            Self::Audio(url) => OutgoingPayload::audio(url.clone()),
            Self::Sticker(url) => OutgoingPayload::sticker(url.clone()),
            Self::Post(id_or_url) => OutgoingPayload::post(id_or_url),
        }
    }

    /// Local echo of what was sent, used for the placeholder and the
    /// confirmed message alike.
    pub fn content(&self) -> Content {
        match self {
            Self::Text(text) => Content::text(text.clone()),
            Self::Image(url) => Self::echo(Kind::Image, url),
            Self::Video(url) => Self::echo(Kind::Video, url),
            Self::Audio(url) => Self::echo(Kind::Audio, url),
            Self::Sticker(url) => Self::echo(Kind::Sticker, url),
            Self::Post(url) => Self::echo(Kind::Post, url),
        }
    }

    fn echo(kind: Kind, url: &str) -> Content {
        Content::media(vec![Attachment::new(kind, url, kind.title())])
    }
}

/// Response body for a confirmed send.
#[derive(Serialize, Debug)]
pub struct SendReceipt {
    pub success: bool,
    pub message_id: Id,
    pub timestamp: String,
    #[serde(flatten)]
    pub content: Content,
}

impl From<Message> for SendReceipt {
    fn from(m: Message) -> Self {
        Self {
            success: true,
            message_id: m.id,
            timestamp: m.timestamp,
            content: m.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::model::{Page, RawAttachment, SenderData};

    use super::*;

    #[test]
    fn text_takes_precedence_over_attachments() {
        let data = MessageData {
            id: "m1".into(),
            from: Some(SenderData {
                id: Some("ig_9".into()),
                username: Some("friend".into()),
            }),
            message: Some("hi there".into()),
            created_time: Some("2025-05-01T10:00:00+0000".into()),
            attachments: Some(Page {
                data: vec![RawAttachment {
                    mime_type: Some("image/jpeg".into()),
                    url: Some("https://x/img.jpg".into()),
                    ..Default::default()
                }],
                paging: None,
            }),
            reactions: None,
        };

        let msg = Message::from(data);
        assert_eq!(msg.content, Content::text("hi there"));
        assert_eq!(msg.sender, "friend");
    }

    #[test]
    fn attachments_map_through_the_normalizer() {
        let data = MessageData {
            id: "m2".into(),
            from: None,
            message: None,
            created_time: None,
            attachments: Some(Page {
                data: vec![RawAttachment {
                    mime_type: Some("image/jpeg".into()),
                    url: Some("https://x/img.jpg".into()),
                    ..Default::default()
                }],
                paging: None,
            }),
            reactions: None,
        };

        let msg = Message::from(data);
        assert_eq!(
            msg.content,
            Content::media(vec![Attachment::new(
                Kind::Image,
                "https://x/img.jpg",
                "Image"
            )])
        );
    }

    #[test]
    fn empty_message_degrades_to_empty_text() {
        let data = MessageData {
            id: "m3".into(),
            from: None,
            message: None,
            created_time: None,
            attachments: None,
            reactions: None,
        };

        assert_eq!(Message::from(data).content, Content::text(""));
    }

    #[test]
    fn sender_falls_back_to_participant_id() {
        let data = MessageData {
            id: "m4".into(),
            from: Some(SenderData {
                id: Some("ig_77".into()),
                username: None,
            }),
            message: Some("x".into()),
            created_time: None,
            attachments: None,
            reactions: None,
        };

        assert_eq!(Message::from(data).sender, "ig_77");
    }

    #[test]
    fn media_preview_is_a_typed_tag() {
        let content = Content::media(vec![Attachment::new(Kind::Video, "https://x/v", "Video")]);
        assert_eq!(content.preview(), "[Video]");
        assert_eq!(Content::text("short").preview(), "short");
    }

    #[test]
    fn unknown_message_type_is_rejected() {
        let err = Outgoing::parse("carrier_pigeon", "coo".into()).unwrap_err();
        assert!(matches!(err, crate::message::Error::UnsupportedType(t) if t == "carrier_pigeon"));
    }
}
