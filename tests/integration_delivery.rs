//! Delivery client integration tests
//!
//! Covers the persist-then-notify ordering, conversation bucketing,
//! duplicate suppression, attachment merging and reconciliation, plus
//! the HTTP gateway against a wiremock server.

mod common;

use assert_matches::assert_matches;
use common::{attachment, dm, dm_frame, FailingSender, MockGateway, RecordingSender};
use huddle::client::gateway::{GatewayError, HttpPersistenceGateway, PersistenceGateway};
use huddle::client::{ConnectionState, DeliveryClient};
use huddle::shared::Envelope;
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn connected_client(
    user_id: &str,
    gateway: MockGateway,
) -> (DeliveryClient<MockGateway, RecordingSender>, RecordingSender) {
    let sender = RecordingSender::new();
    let mut client = DeliveryClient::new(user_id, gateway);
    client.mark_connecting();
    client.mark_connected(sender.clone());
    (client, sender)
}

/// Happy path: the durable write succeeds, the message lands in local
/// state under the receiver's key, and exactly one dm frame is emitted.
#[tokio::test]
async fn send_persists_then_notifies() {
    let (mut client, sender) = connected_client("u1", MockGateway::new());

    let message = client.send_direct_message("u2", "w1", "hello").await.unwrap();
    assert_eq!(message.id, "m1");
    assert_eq!(message.sender_id, "u1");

    // local append under the conversation key
    let bucket = client.store().messages_with("u2");
    assert_eq!(bucket.len(), 1);
    assert_eq!(bucket[0].id, "m1");

    // exactly one frame, carrying the persisted id
    let frames = sender.sent_frames();
    assert_eq!(frames.len(), 1);
    match Envelope::decode(&frames[0]).unwrap() {
        Envelope::Dm(dm) => assert_eq!(dm.id, "m1"),
        other => panic!("unexpected envelope {:?}", other),
    }
}

/// Scenario C: the create endpoint fails; no envelope is ever sent and
/// nothing is appended locally.
#[tokio::test]
async fn failed_persist_emits_nothing() {
    let (mut client, sender) = connected_client("u1", MockGateway::failing());

    let result = client.send_direct_message("u2", "w1", "hello").await;
    assert_matches!(result, Err(GatewayError::Status { status: 500 }));

    assert!(sender.sent_frames().is_empty());
    assert!(client.store().is_empty());
}

/// While disconnected, a successful persist still appends locally but no
/// frame goes out.
#[tokio::test]
async fn disconnected_send_skips_notification() {
    let mut client: DeliveryClient<_, RecordingSender> =
        DeliveryClient::new("u1", MockGateway::new());

    let message = client.send_direct_message("u2", "w1", "hello").await.unwrap();
    assert_eq!(message.id, "m1");
    assert_eq!(client.store().messages_with("u2").len(), 1);
    assert_eq!(client.connection_state(), ConnectionState::Disconnected);
}

/// A realtime send failure degrades the channel but keeps the persisted
/// message.
#[tokio::test]
async fn send_failure_degrades_to_disconnected() {
    let mut client = DeliveryClient::new("u1", MockGateway::new());
    client.mark_connecting();
    client.mark_connected(FailingSender);

    let result = client.send_direct_message("u2", "w1", "hello").await;
    assert!(result.is_ok());
    assert_eq!(client.connection_state(), ConnectionState::Disconnected);
    assert_eq!(client.store().messages_with("u2").len(), 1);
}

/// Scenario E: user u2 receives a dm from u1 and buckets it under "u1".
#[tokio::test]
async fn inbound_dm_buckets_under_conversation_key() {
    let (mut client, _sender) = connected_client("u2", MockGateway::new());

    let applied = client
        .handle_frame(&dm_frame("m1", "u1", "u2", "hi"))
        .unwrap();
    assert!(applied);

    let bucket = client.store().messages_with("u1");
    assert_eq!(bucket.len(), 1);
    assert_eq!(bucket[0].content, "hi");
    assert!(client.store().messages_with("u2").is_empty());
}

/// A replayed envelope with an id already present is not applied twice.
#[tokio::test]
async fn replayed_envelope_is_deduplicated() {
    let (mut client, _sender) = connected_client("u2", MockGateway::new());

    assert!(client.handle_frame(&dm_frame("m1", "u1", "u2", "hi")).unwrap());
    assert!(!client.handle_frame(&dm_frame("m1", "u1", "u2", "hi")).unwrap());
    assert_eq!(client.store().messages_with("u1").len(), 1);
}

/// Malformed frames are dropped without touching conversation state.
#[tokio::test]
async fn malformed_frame_is_dropped() {
    let (mut client, _sender) = connected_client("u2", MockGateway::new());

    assert!(client.handle_frame("not json").is_err());
    assert!(client.handle_frame(r#"{"type":"dm"}"#).is_err());
    assert!(client.store().is_empty());
}

/// Unknown kinds are ignored, not errors.
#[tokio::test]
async fn unknown_kind_frame_is_ignored() {
    let (mut client, _sender) = connected_client("u2", MockGateway::new());

    let applied = client
        .handle_frame(r#"{"type":"presence","message":{"user":"u1"}}"#)
        .unwrap();
    assert!(!applied);
    assert!(client.store().is_empty());
}

/// Attachment upload merges into the matching message and emits nothing
/// on the realtime channel.
#[tokio::test]
async fn attachment_merge_is_local_only() {
    let gateway = MockGateway::new();
    *gateway.upload_result.lock().unwrap() = vec![attachment("a1", "m1")];
    let (mut client, sender) = connected_client("u2", gateway);

    client
        .handle_frame(&dm_frame("m1", "u1", "u2", "hi"))
        .unwrap();
    let uploaded = client.attach_files("u1", "m1", Vec::new()).await.unwrap();
    assert_eq!(uploaded.len(), 1);

    let bucket = client.store().messages_with("u1");
    let attachments = bucket[0].attachments.as_ref().unwrap();
    assert_eq!(attachments[0].id, "a1");
    // nothing re-broadcast
    assert!(sender.sent_frames().is_empty());
}

/// Reconciliation replaces buffered state with the gateway's list.
#[tokio::test]
async fn reconcile_replaces_buffered_state() {
    let gateway = MockGateway::with_history(vec![
        dm("m1", "u1", "u2", "hi"),
        dm("m2", "u2", "u1", "hello"),
    ]);
    let (mut client, _sender) = connected_client("u2", gateway);

    // buffered realtime state that the refetch supersedes
    client
        .handle_frame(&dm_frame("m9", "u1", "u2", "stale"))
        .unwrap();

    let count = client.reconcile_conversation("u1").await.unwrap();
    assert_eq!(count, 2);
    let ids: Vec<&str> = client
        .store()
        .messages_with("u1")
        .iter()
        .map(|m| m.id.as_str())
        .collect();
    assert_eq!(ids, vec!["m1", "m2"]);
}

/// HTTP gateway: create posts the camelCase body and returns the
/// generated id.
#[tokio::test]
async fn http_gateway_creates_direct_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/messages/dm"))
        .and(body_json(serde_json::json!({
            "workspaceId": "w1",
            "senderId": "u1",
            "receiverId": "u2",
            "content": "hello",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": "m42",
        })))
        .mount(&server)
        .await;

    let gateway = HttpPersistenceGateway::new(reqwest::Client::new(), server.uri());
    let id = gateway
        .create_direct_message("u1", "u2", "w1", "hello")
        .await
        .unwrap();
    assert_eq!(id, "m42");
}

/// HTTP gateway: a rejected write surfaces as a status error.
#[tokio::test]
async fn http_gateway_surfaces_rejected_write() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/messages/dm"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let gateway = HttpPersistenceGateway::new(reqwest::Client::new(), server.uri());
    let result = gateway.create_direct_message("u1", "u2", "w1", "hello").await;
    assert_matches!(result, Err(GatewayError::Status { status: 500 }));
}

/// HTTP gateway: history comes back ascending as sent by the server.
#[tokio::test]
async fn http_gateway_lists_history() {
    let server = MockServer::start().await;
    let history = vec![dm("m1", "u1", "u2", "hi"), dm("m2", "u2", "u1", "hello")];
    Mock::given(method("GET"))
        .and(path("/api/messages/between/u1/u2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&history))
        .mount(&server)
        .await;

    let gateway = HttpPersistenceGateway::new(reqwest::Client::new(), server.uri());
    let fetched = gateway.list_messages_between("u1", "u2").await.unwrap();
    assert_eq!(fetched, history);
}

/// End-to-end over the traits: a message sent by u1's client is applied
/// by u2's client exactly as relayed.
#[tokio::test]
async fn sent_frame_applies_cleanly_at_the_peer() {
    let (mut alice, alice_sender) = connected_client("u1", MockGateway::new());
    let (mut bob, _bob_sender) = connected_client("u2", MockGateway::new());

    alice.send_direct_message("u2", "w1", "lunch?").await.unwrap();
    let frame = alice_sender.sent_frames().pop().unwrap();

    assert!(bob.handle_frame(&frame).unwrap());
    let bucket = bob.store().messages_with("u1");
    assert_eq!(bucket.len(), 1);
    assert_eq!(bucket[0].content, "lunch?");
    assert_eq!(bucket[0].id, alice.store().messages_with("u2")[0].id);
}
