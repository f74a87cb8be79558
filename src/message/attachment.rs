use serde::Serialize;

use crate::graph::model::{MediaData, RawAttachment};

/// UI-renderable attachment, flattened out of whichever raw shape the
/// Graph API produced.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    #[serde(rename = "type")]
    pub kind: Kind,
    pub payload: Payload,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Payload {
    pub url: String,
    pub title: String,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Image,
    Video,
    Audio,
    Sticker,
    Story,
    Post,
    Template,
    File,
}

impl Kind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::Sticker => "Sticker",
            Self::Story => "Story",
            Self::Post => "Post",
            Self::Template => "Template",
            Self::File => "File",
        }
    }
}

impl Attachment {
    pub fn new(kind: Kind, url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind,
            payload: Payload {
                url: url.into(),
                title: title.into(),
            },
        }
    }
}

/// Flattens one raw attachment into exactly one [`Attachment`]. Pure and
/// total: every field is optional upstream and absence of all of them
/// still yields a `file` fallback.
///
/// Priority order, first match wins:
/// 1. nested media descriptor (`image_data`/`video_data`/`audio_data`);
/// 2. MIME prefix — beats a generic `type` field when both are present;
/// 3. explicit `type` value, unknown values degrade to `file`.
pub fn normalize(raw: &RawAttachment) -> Attachment {
    let (kind, url) = if let Some(image) = &raw.image_data {
        (Kind::Image, media_url(image, raw))
    } else if let Some(video) = &raw.video_data {
        (Kind::Video, media_url(video, raw))
    } else if let Some(audio) = &raw.audio_data {
        (Kind::Audio, media_url(audio, raw))
    } else if let Some(kind) = raw.mime_type.as_deref().and_then(kind_by_mime) {
        (kind, pick_url(raw))
    } else {
        (kind_by_type(raw.kind.as_deref()), pick_url(raw))
    };

    let title = [raw.title.as_deref(), raw.name.as_deref()]
        .into_iter()
        .flatten()
        .find(|t| !t.is_empty())
        .unwrap_or(kind.title());

    Attachment::new(kind, url, title)
}

fn kind_by_mime(mime: &str) -> Option<Kind> {
    if mime.starts_with("image/") {
        Some(Kind::Image)
    } else if mime.starts_with("video/") {
        Some(Kind::Video)
    } else if mime.starts_with("audio/") {
        Some(Kind::Audio)
    } else {
        None
    }
}

fn kind_by_type(kind: Option<&str>) -> Kind {
    match kind {
        Some("template") | Some("sticker") => Kind::Sticker,
        Some("story_mention") | Some("story_share") => Kind::Story,
        Some("share") => Kind::Post,
        _ => Kind::File,
    }
}

fn media_url(media: &MediaData, raw: &RawAttachment) -> String {
    [media.url.as_deref(), media.preview_url.as_deref()]
        .into_iter()
        .flatten()
        .find(|u| !u.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| pick_url(raw))
}

fn pick_url(raw: &RawAttachment) -> String {
    let nested = |m: &Option<MediaData>| {
        m.as_ref()
            .and_then(|m| m.url.clone().or_else(|| m.preview_url.clone()))
    };

    [
        raw.url.clone(),
        raw.file_url.clone(),
        raw.audio_url.clone(),
        raw.asset_url.clone(),
        nested(&raw.image_data),
        nested(&raw.video_data),
        nested(&raw.audio_data),
    ]
    .into_iter()
    .flatten()
    .find(|u| !u.is_empty())
    .unwrap_or_default()
}
