use serde::Deserialize;

/// Top-level webhook envelope. Everything is optional; unknown shapes
/// are logged, never rejected.
#[derive(Deserialize, Debug)]
pub struct Event {
    pub object: Option<String>,
    #[serde(default)]
    pub entry: Vec<Entry>,
}

#[derive(Deserialize, Debug)]
pub struct Entry {
    pub id: Option<String>,
    pub time: Option<i64>,
    #[serde(default)]
    pub messaging: Vec<MessagingEvent>,
    #[serde(default)]
    pub changes: Vec<Change>,
}

#[derive(Deserialize, Debug)]
pub struct MessagingEvent {
    pub sender: Option<Actor>,
    pub recipient: Option<Actor>,
    pub timestamp: Option<i64>,
    pub message: Option<IncomingMessage>,
    pub reaction: Option<serde_json::Value>,
    pub read: Option<serde_json::Value>,
    pub postback: Option<serde_json::Value>,
}

#[derive(Deserialize, Debug)]
pub struct Actor {
    pub id: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct IncomingMessage {
    pub mid: Option<String>,
    pub text: Option<String>,
    pub attachments: Option<serde_json::Value>,
}

#[derive(Deserialize, Debug)]
pub struct Change {
    pub field: Option<String>,
    pub value: Option<serde_json::Value>,
}
