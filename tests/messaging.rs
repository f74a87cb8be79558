use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use pilot::auth::Token;
use pilot::chat::service::{ChatService, ChatServiceImpl};
use pilot::chat::{self, ParticipantId};
use pilot::graph;
use pilot::graph::client::GraphApi;
use pilot::graph::model::{
    AccessGrant, ConversationData, MessageData, OutgoingPayload, Profile, SendAck,
};
use pilot::message::attachment::Kind;
use pilot::message::model::{Content, Outgoing};
use pilot::message::service::{MessageService, MessageServiceImpl};

enum SendBehavior {
    Ack(&'static str),
    Fail(u16, &'static str),
}

/// Scripted Graph API double: fixed JSON fixtures in, recorded sends out.
struct StubGraph {
    conversations_json: serde_json::Value,
    messages_json: serde_json::Value,
    send_behavior: SendBehavior,
    conversation_calls: AtomicUsize,
    sent: Mutex<Vec<(String, serde_json::Value)>>,
}

impl StubGraph {
    fn new(conversations_json: serde_json::Value) -> Self {
        Self {
            conversations_json,
            messages_json: json!([]),
            send_behavior: SendBehavior::Ack("mid-1"),
            conversation_calls: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    fn with_messages(mut self, messages_json: serde_json::Value) -> Self {
        self.messages_json = messages_json;
        self
    }

    fn with_send(mut self, behavior: SendBehavior) -> Self {
        self.send_behavior = behavior;
        self
    }

    fn recorded_sends(&self) -> Vec<(String, serde_json::Value)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl GraphApi for StubGraph {
    async fn exchange_code(&self, _code: &str) -> Result<AccessGrant, graph::Error> {
        panic!("exchange_code is not exercised by these tests")
    }

    async fn profile(&self, _token: &Token) -> Result<Profile, graph::Error> {
        panic!("profile is not exercised by these tests")
    }

    async fn conversations(&self, _token: &Token) -> Result<Vec<ConversationData>, graph::Error> {
        self.conversation_calls.fetch_add(1, Ordering::SeqCst);
        Ok(serde_json::from_value(self.conversations_json.clone()).unwrap())
    }

    async fn messages(
        &self,
        _token: &Token,
        _chat_id: &str,
    ) -> Result<Vec<MessageData>, graph::Error> {
        Ok(serde_json::from_value(self.messages_json.clone()).unwrap())
    }

    async fn send(
        &self,
        _token: &Token,
        recipient_id: &str,
        payload: &OutgoingPayload,
    ) -> Result<SendAck, graph::Error> {
        self.sent.lock().unwrap().push((
            recipient_id.to_string(),
            serde_json::to_value(payload).unwrap(),
        ));

        match self.send_behavior {
            SendBehavior::Ack(message_id) => Ok(SendAck {
                message_id: message_id.to_string(),
                recipient_id: Some(recipient_id.to_string()),
            }),
            SendBehavior::Fail(status, body) => Err(graph::Error::UpstreamApi {
                status,
                body: body.to_string(),
            }),
        }
    }
}

fn two_party_conversations() -> serde_json::Value {
    json!([{
        "id": "t-1",
        "unread_count": 1,
        "participants": {
            "data": [
                {"id": "ig_me", "username": "me"},
                {"id": "ig_777", "username": "friend"}
            ]
        }
    }])
}

fn services(stub: Arc<StubGraph>) -> (Arc<ChatServiceImpl>, MessageServiceImpl) {
    let graph: graph::Client = stub;
    let chat_service = Arc::new(ChatServiceImpl::new(graph.clone()));
    let message_service = MessageServiceImpl::new(graph, chat_service.clone());
    (chat_service, message_service)
}

fn token() -> Token {
    Token::new("IGQWRPdGlCWHZA3test")
}

#[tokio::test]
async fn scoped_id_resolves_without_listing_conversations() {
    let stub = Arc::new(StubGraph::new(two_party_conversations()));
    let (chat_service, _) = services(stub.clone());

    let resolved = chat_service
        .resolve_participant(&token(), &chat::Id("ig_12345".into()))
        .await
        .unwrap();

    assert_eq!(resolved, ParticipantId::new("ig_12345"));
    assert_eq!(stub.conversation_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn conversation_id_resolves_through_the_list() {
    let stub = Arc::new(StubGraph::new(two_party_conversations()));
    let (chat_service, _) = services(stub.clone());

    let resolved = chat_service
        .resolve_participant(&token(), &chat::Id("t-1".into()))
        .await
        .unwrap();

    assert_eq!(resolved, ParticipantId::new("ig_777"));
    assert_eq!(stub.conversation_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unknown_conversation_falls_back_to_its_own_id() {
    let stub = Arc::new(StubGraph::new(two_party_conversations()));
    let (chat_service, _) = services(stub.clone());

    let resolved = chat_service
        .resolve_participant(&token(), &chat::Id("t-404".into()))
        .await
        .unwrap();

    assert_eq!(resolved, ParticipantId::new("t-404"));
}

#[tokio::test]
async fn confirmed_send_swaps_the_placeholder_for_the_server_message() {
    let stub = Arc::new(StubGraph::new(two_party_conversations()));
    let (_, message_service) = services(stub.clone());
    let chat_id = chat::Id("ig_777".into());

    let sent = message_service
        .send(&token(), &chat_id, Outgoing::Text("hello".into()))
        .await
        .unwrap();

    assert_eq!(sent.id.as_str(), "mid-1");

    let timeline = message_service.timeline(&chat_id).await;
    assert_eq!(
        timeline
            .iter()
            .filter(|m| m.id.as_str() == "mid-1")
            .count(),
        1
    );
    assert!(timeline.iter().all(|m| !m.id.is_temp()));

    assert_eq!(
        message_service.preview(&chat_id).await.as_deref(),
        Some("hello")
    );

    let sends = stub.recorded_sends();
    assert_eq!(sends.len(), 1);
    assert_eq!(sends[0].0, "ig_777");
    assert_eq!(sends[0].1, json!({"text": "hello"}));
}

#[tokio::test]
async fn failed_send_removes_the_placeholder_and_keeps_the_preview() {
    let stub = Arc::new(
        StubGraph::new(two_party_conversations())
            .with_send(SendBehavior::Fail(400, "(#100) upstream says no")),
    );
    let (_, message_service) = services(stub);
    let chat_id = chat::Id("ig_777".into());

    let result = message_service
        .send(&token(), &chat_id, Outgoing::Text("hello".into()))
        .await;

    assert!(result.is_err());
    assert!(message_service.timeline(&chat_id).await.is_empty());
    assert_eq!(message_service.preview(&chat_id).await, None);
}

#[tokio::test]
async fn send_to_conversation_id_targets_the_resolved_participant() {
    let stub = Arc::new(StubGraph::new(two_party_conversations()));
    let (_, message_service) = services(stub.clone());

    message_service
        .send(
            &token(),
            &chat::Id("t-1".into()),
            Outgoing::Image("https://x/pic.jpg".into()),
        )
        .await
        .unwrap();

    let sends = stub.recorded_sends();
    assert_eq!(sends[0].0, "ig_777");
    assert_eq!(
        sends[0].1,
        json!({"attachment": {"type": "image", "payload": {"url": "https://x/pic.jpg"}}})
    );
}

#[tokio::test]
async fn listed_image_attachment_is_classified() {
    let stub = Arc::new(StubGraph::new(json!([])).with_messages(json!([{
        "id": "m-1",
        "from": {"id": "ig_777", "username": "friend"},
        "created_time": "2025-05-01T10:00:00+0000",
        "attachments": {
            "data": [{"mime_type": "image/jpeg", "url": "https://x/img.jpg"}]
        }
    }])));
    let (_, message_service) = services(stub);
    let chat_id = chat::Id("t-1".into());

    let messages = message_service.find_by_chat(&token(), &chat_id).await.unwrap();

    assert_eq!(messages.len(), 1);
    match &messages[0].content {
        Content::Media { attachments } => {
            assert_eq!(attachments[0].kind, Kind::Image);
            assert_eq!(attachments[0].payload.url, "https://x/img.jpg");
            assert_eq!(attachments[0].payload.title, "Image");
        }
        Content::Text { .. } => panic!("expected a media message"),
    }

    // the fetch became the chat's current timeline
    assert_eq!(message_service.timeline(&chat_id).await.len(), 1);
}

#[tokio::test]
async fn url_less_attachment_degrades_to_a_file() {
    let stub = Arc::new(StubGraph::new(json!([])).with_messages(json!([{
        "id": "m-2",
        "from": {"id": "ig_777"},
        "attachments": {"data": [{"name": "mystery blob"}]}
    }])));
    let (_, message_service) = services(stub);

    let messages = message_service
        .find_by_chat(&token(), &chat::Id("t-1".into()))
        .await
        .unwrap();

    match &messages[0].content {
        Content::Media { attachments } => {
            assert_eq!(attachments[0].kind, Kind::File);
            assert_eq!(attachments[0].payload.url, "");
        }
        Content::Text { .. } => panic!("expected a media message"),
    }
}

#[tokio::test]
async fn reaction_rides_the_send_contract() {
    let stub = Arc::new(StubGraph::new(two_party_conversations()));
    let (_, message_service) = services(stub.clone());

    message_service
        .react(
            &token(),
            &chat::Id("t-1".into()),
            &pilot::message::Id("mid-9".into()),
            "❤️",
        )
        .await
        .unwrap();

    let sends = stub.recorded_sends();
    assert_eq!(sends[0].0, "ig_777");
    assert_eq!(
        sends[0].1,
        json!({"reaction": {"mid": "mid-9", "action": "react", "emoji": "❤️"}})
    );
}
