use serde::Serialize;

use crate::graph::model::{ConversationData, MessageData, RawAttachment};

use super::ParticipantId;

const PREVIEW_LIMIT: usize = 30;

/// One row of the conversation list. Recomputed on every fetch, never
/// persisted.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: super::Id,
    pub username: String,
    pub participant_id: ParticipantId,
    pub last_message: String,
    pub unread_count: u32,
}

impl From<ConversationData> for Conversation {
    fn from(c: ConversationData) -> Self {
        // Index 0 is assumed to be the authenticated account, so the
        // counterpart sits at index 1. Anything shorter gets the
        // sentinel participant.
        let other = c
            .participants
            .as_ref()
            .map(|p| p.data.as_slice())
            .unwrap_or_default()
            .get(1);

        let (username, participant_id) = match other {
            Some(p) => (p.username.clone(), ParticipantId::new(p.id.clone())),
            None => (String::from("Unknown"), ParticipantId::new("")),
        };

        let last_message = c
            .messages
            .as_ref()
            .and_then(|m| m.data.first())
            .map(preview)
            .unwrap_or_else(|| String::from("No messages yet"));

        Self {
            id: super::Id(c.id),
            username,
            participant_id,
            last_message,
            unread_count: c.unread_count.unwrap_or(0),
        }
    }
}

/// Short list-row summary of a message: truncated text, or a bracketed
/// tag chosen by the first attachment's MIME prefix.
pub fn preview(msg: &MessageData) -> String {
    if let Some(text) = msg.message.as_deref().filter(|t| !t.is_empty()) {
        return truncate(text);
    }

    match msg.attachments.as_ref().and_then(|a| a.data.first()) {
        Some(attachment) => mime_tag(attachment).to_string(),
        None => String::from("No messages yet"),
    }
}

pub fn truncate(text: &str) -> String {
    if text.chars().count() > PREVIEW_LIMIT {
        let cut = text.chars().take(PREVIEW_LIMIT).collect::<String>();
        return format!("{cut}...");
    }

    text.to_string()
}

fn mime_tag(raw: &RawAttachment) -> &'static str {
    match raw.mime_type.as_deref() {
        Some(m) if m.starts_with("image/") => "[Image]",
        Some(m) if m.starts_with("video/") => "[Video]",
        Some(m) if m.starts_with("audio/") => "[Audio]",
        _ => "[Attachment]",
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::model::{Page, ParticipantData};

    use super::*;

    fn conversation(participants: Vec<ParticipantData>) -> ConversationData {
        ConversationData {
            id: "thread-1".into(),
            unread_count: Some(2),
            updated_time: None,
            participants: Some(Page {
                data: participants,
                paging: None,
            }),
            messages: None,
        }
    }

    fn participant(id: &str, username: &str) -> ParticipantData {
        ParticipantData {
            id: id.into(),
            username: username.into(),
            profile_picture: None,
        }
    }

    #[test]
    fn second_participant_is_the_counterpart() {
        let c = conversation(vec![participant("ig_me", "me"), participant("ig_444", "friend")]);
        let conv = Conversation::from(c);

        assert_eq!(conv.username, "friend");
        assert_eq!(conv.participant_id, ParticipantId::new("ig_444"));
        assert_eq!(conv.unread_count, 2);
    }

    #[test]
    fn short_participant_list_falls_back_to_sentinel() {
        let c = conversation(vec![participant("ig_me", "me")]);
        let conv = Conversation::from(c);

        assert_eq!(conv.username, "Unknown");
        assert!(conv.participant_id.is_empty());
    }

    #[test]
    fn missing_messages_yield_placeholder_preview() {
        let conv = Conversation::from(conversation(vec![]));
        assert_eq!(conv.last_message, "No messages yet");
    }

    #[test]
    fn long_text_is_truncated_with_ellipsis() {
        let text = "a very long message that definitely exceeds the preview limit";
        let cut = truncate(text);

        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), PREVIEW_LIMIT + 3);
    }

    #[test]
    fn attachment_preview_follows_mime_prefix() {
        let raw = RawAttachment {
            mime_type: Some("video/mp4".into()),
            ..Default::default()
        };
        assert_eq!(mime_tag(&raw), "[Video]");

        let unknown = RawAttachment::default();
        assert_eq!(mime_tag(&unknown), "[Attachment]");
    }
}
