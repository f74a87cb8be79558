use serde::{Deserialize, Serialize};

/// Standard Graph API envelope: a data array plus pagination cursors.
#[derive(Deserialize, Debug)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    pub paging: Option<Paging>,
}

#[derive(Deserialize, Debug)]
pub struct Paging {
    pub next: Option<String>,
    pub cursors: Option<Cursors>,
}

#[derive(Deserialize, Debug)]
pub struct Cursors {
    pub before: Option<String>,
    pub after: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ConversationData {
    pub id: String,
    pub unread_count: Option<u32>,
    pub updated_time: Option<String>,
    pub participants: Option<Page<ParticipantData>>,
    pub messages: Option<Page<MessageData>>,
}

#[derive(Deserialize, Debug)]
pub struct ParticipantData {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub username: String,
    pub profile_picture: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct MessageData {
    pub id: String,
    pub from: Option<SenderData>,
    pub message: Option<String>,
    pub created_time: Option<String>,
    pub attachments: Option<Page<RawAttachment>>,
    pub reactions: Option<Page<ReactionData>>,
}

#[derive(Deserialize, Debug)]
pub struct SenderData {
    pub id: Option<String>,
    pub username: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ReactionData {
    pub username: Option<String>,
    pub reaction: Option<String>,
}

/// Raw attachment as the Graph API has shipped it over the years. The
/// shapes are mutually inconsistent (`mime_type`-based, nested
/// `image_data`/`video_data`-based, `type`-based) and every field is
/// optional; nothing outside `message::attachment::normalize` may
/// consume this type.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct RawAttachment {
    pub mime_type: Option<String>,
    pub name: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub url: Option<String>,
    pub file_url: Option<String>,
    pub audio_url: Option<String>,
    pub asset_url: Option<String>,
    pub image_data: Option<MediaData>,
    pub video_data: Option<MediaData>,
    pub audio_data: Option<MediaData>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct MediaData {
    pub url: Option<String>,
    pub preview_url: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct SendRequest<'a> {
    pub recipient: Recipient<'a>,
    pub message: &'a OutgoingPayload,
}

#[derive(Serialize, Debug)]
pub struct Recipient<'a> {
    pub id: &'a str,
}

/// Message body shapes accepted by `POST me/messages`.
#[derive(Serialize, Debug, Clone)]
#[serde(untagged)]
pub enum OutgoingPayload {
    Text {
        text: String,
    },
    Attachment {
        attachment: OutgoingAttachment,
    },
    Reaction {
        reaction: ReactionPayload,
    },
}

#[derive(Serialize, Debug, Clone)]
pub struct OutgoingAttachment {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub payload: AttachmentPayload,
}

#[derive(Serialize, Debug, Clone)]
#[serde(untagged)]
pub enum AttachmentPayload {
    Url {
        url: String,
    },
    Template {
        template_type: &'static str,
        elements: Vec<TemplateElement>,
    },
}

#[derive(Serialize, Debug, Clone)]
#[serde(untagged)]
pub enum TemplateElement {
    Generic {
        title: &'static str,
        image_url: String,
    },
    Media {
        media_type: &'static str,
        url: String,
    },
}

#[derive(Serialize, Debug, Clone)]
pub struct ReactionPayload {
    pub mid: String,
    pub action: &'static str,
    pub emoji: String,
}

impl OutgoingPayload {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self::media("image", url)
    }

    pub fn video(url: impl Into<String>) -> Self {
        Self::media("video", url)
    }

    pub fn audio(url: impl Into<String>) -> Self {
        Self::media("audio", url)
    }

    fn media(kind: &'static str, url: impl Into<String>) -> Self {
        Self::Attachment {
            attachment: OutgoingAttachment {
                kind,
                payload: AttachmentPayload::Url { url: url.into() },
            },
        }
    }

    /// Stickers go out as a generic template carrying the sticker image.
    pub fn sticker(image_url: impl Into<String>) -> Self {
        Self::Attachment {
            attachment: OutgoingAttachment {
                kind: "template",
                payload: AttachmentPayload::Template {
                    template_type: "generic",
                    elements: vec![TemplateElement::Generic {
                        title: "Sticker",
                        image_url: image_url.into(),
                    }],
                },
            },
        }
    }

    /// Accepts either a bare post id or a pasted permalink; the id is the
    /// last path segment.
    pub fn post(id_or_url: &str) -> Self {
        let post_id = id_or_url
            .rsplit('/')
            .find(|s| !s.is_empty())
            .unwrap_or(id_or_url);

        Self::Attachment {
            attachment: OutgoingAttachment {
                kind: "template",
                payload: AttachmentPayload::Template {
                    template_type: "media",
                    elements: vec![TemplateElement::Media {
                        media_type: "instagram_post",
                        url: post_id.to_string(),
                    }],
                },
            },
        }
    }

    pub fn reaction(message_id: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self::Reaction {
            reaction: ReactionPayload {
                mid: message_id.into(),
                action: "react",
                emoji: emoji.into(),
            },
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct SendAck {
    pub message_id: String,
    pub recipient_id: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct AccessGrant {
    pub access_token: String,
    pub user_id: Option<i64>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Profile {
    pub id: String,
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_payload_shape() {
        let payload = OutgoingPayload::text("hello");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({"text": "hello"}));
    }

    #[test]
    fn media_payload_shape() {
        let payload = OutgoingPayload::image("https://x/img.jpg");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "attachment": {"type": "image", "payload": {"url": "https://x/img.jpg"}}
            })
        );
    }

    #[test]
    fn sticker_goes_out_as_generic_template() {
        let payload = OutgoingPayload::sticker("https://x/sticker.png");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "attachment": {
                    "type": "template",
                    "payload": {
                        "template_type": "generic",
                        "elements": [{"title": "Sticker", "image_url": "https://x/sticker.png"}]
                    }
                }
            })
        );
    }

    #[test]
    fn post_payload_takes_last_url_segment() {
        let payload = OutgoingPayload::post("https://www.instagram.com/p/DEF456/");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json["attachment"]["payload"]["elements"][0]["url"],
            serde_json::json!("DEF456")
        );

        let bare = OutgoingPayload::post("ABC123");
        let json = serde_json::to_value(&bare).unwrap();
        assert_eq!(
            json["attachment"]["payload"]["elements"][0]["url"],
            serde_json::json!("ABC123")
        );
    }

    #[test]
    fn page_tolerates_missing_data() {
        let page: Page<MessageData> = serde_json::from_str("{}").unwrap();
        assert!(page.data.is_empty());
        assert!(page.paging.is_none());
    }
}
