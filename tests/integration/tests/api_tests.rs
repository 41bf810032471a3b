//! API Integration Tests
//!
//! Each test spins up a server on the in-memory store and an ephemeral port,
//! so no external services are required.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use chrono::{Duration, Utc};
use integration_tests::{assert_json, assert_status, fixtures::*, TestServer, USER_HEADER};
use reqwest::header::HeaderValue;
use reqwest::StatusCode;
use serde_json::json;

async fn join(server: &TestServer, name: &str) {
    let response = server
        .post("/participants", &JoinRequest::named(name))
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

async fn messages_as(server: &TestServer, user: &str, query: &str) -> Vec<MessageResponse> {
    let response = server
        .get_as(&format!("/messages{query}"), user)
        .await
        .expect("Request failed");
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["backend"], "memory");
}

// ============================================================================
// Participant Tests
// ============================================================================

#[tokio::test]
async fn test_join_chat_and_read_back() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/participants", &JoinRequest::named("Ana"))
        .await
        .expect("Request failed");
    let joined: ParticipantResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(joined.name, "Ana");

    let response = server
        .post("/participants", &JoinRequest::named("Ana"))
        .await
        .expect("Request failed");
    let error: ErrorBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.error.code, "PARTICIPANT_ALREADY_EXISTS");

    let response = server
        .post_as("/messages", "Ana", &MessageRequest::broadcast("hi"))
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let log = messages_as(&server, "Ana", "").await;
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].from, "Ana");
    assert_eq!(log[0].text, "joined");
    assert_eq!(log[0].kind, "status");
    assert_eq!(log[1].text, "hi");
    assert_eq!(log[1].to, "Todos");
    assert_eq!(log[1].kind, "message");
    assert_eq!(log[1].time.len(), "HH:MM:SS".len());
}

#[tokio::test]
async fn test_list_participants_reports_last_seen() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = JoinRequest::unique();
    join(&server, &request.name).await;

    let response = server.get("/participants").await.expect("Request failed");
    let participants: Vec<ParticipantResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();

    let entry = participants
        .iter()
        .find(|p| p.name == request.name)
        .expect("participant listed");
    assert!(entry.last_seen > 0);
}

#[tokio::test]
async fn test_join_rejects_blank_name() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/participants", &JoinRequest::named("   "))
        .await
        .expect("Request failed");
    let error: ErrorBody = assert_json(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();
    assert_eq!(error.error.code, "VALIDATION_ERROR");

    let response = server.get("/participants").await.expect("Request failed");
    let participants: Vec<ParticipantResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert!(participants.is_empty());
}

#[tokio::test]
async fn test_join_rejects_overlong_name() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/participants", &JoinRequest::named(&"a".repeat(101)))
        .await
        .expect("Request failed");
    let error: ErrorBody = assert_json(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();
    assert_eq!(error.error.code, "VALIDATION_ERROR");

    let response = server
        .post("/participants", &JoinRequest::named(&"a".repeat(100)))
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

#[tokio::test]
async fn test_join_rejects_malformed_body() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/participants", &json!({ "nome": "Ana" }))
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();
}

// ============================================================================
// Message Tests
// ============================================================================

#[tokio::test]
async fn test_send_rejects_unknown_type_without_logging() {
    let server = TestServer::start().await.expect("Failed to start server");
    join(&server, "Ana").await;

    let response = server
        .post_as(
            "/messages",
            "Ana",
            &MessageRequest::broadcast("hi").with_type("shout"),
        )
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();

    let response = server
        .post_as(
            "/messages",
            "Ana",
            &MessageRequest::broadcast("hi").with_type("status"),
        )
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();

    let log = messages_as(&server, "Ana", "").await;
    assert_eq!(log.len(), 1, "only the arrival event is logged");
}

#[tokio::test]
async fn test_send_rejects_blank_fields() {
    let server = TestServer::start().await.expect("Failed to start server");
    join(&server, "Ana").await;

    let response = server
        .post_as("/messages", "Ana", &MessageRequest::broadcast(""))
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();

    let response = server
        .post_as("/messages", "Ana", &MessageRequest::private(" ", "hi"))
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_send_requires_user_header() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/messages", &MessageRequest::broadcast("hi"))
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_send_rejects_unknown_sender() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_as("/messages", "Ghost", &MessageRequest::broadcast("boo"))
        .await
        .expect("Request failed");
    let error: ErrorBody = assert_json(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();
    assert_eq!(error.error.code, "UNKNOWN_SENDER");

    let response = server.get("/messages").await.expect("Request failed");
    let log: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(log.is_empty());
}

#[tokio::test]
async fn test_private_messages_are_scoped() {
    let server = TestServer::start().await.expect("Failed to start server");
    join(&server, "Ana").await;
    join(&server, "Bia").await;
    join(&server, "Caio").await;

    let response = server
        .post_as("/messages", "Ana", &MessageRequest::private("Bia", "psst"))
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let sees_secret = |log: &[MessageResponse]| log.iter().any(|m| m.text == "psst");

    assert!(sees_secret(&messages_as(&server, "Ana", "").await));
    assert!(sees_secret(&messages_as(&server, "Bia", "").await));
    assert!(!sees_secret(&messages_as(&server, "Caio", "").await));

    let response = server.get("/messages").await.expect("Request failed");
    let anonymous: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!sees_secret(&anonymous));
    assert_eq!(anonymous.len(), 3);
}

#[tokio::test]
async fn test_message_limit() {
    let server = TestServer::start().await.expect("Failed to start server");
    join(&server, "Ana").await;
    for text in ["one", "two", "three"] {
        let response = server
            .post_as("/messages", "Ana", &MessageRequest::broadcast(text))
            .await
            .expect("Request failed");
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let latest = messages_as(&server, "Ana", "?limit=2").await;
    let texts: Vec<&str> = latest.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["two", "three"]);

    assert_eq!(messages_as(&server, "Ana", "?limit=0").await.len(), 4);
    assert_eq!(messages_as(&server, "Ana", "?limit=abc").await.len(), 4);
    assert_eq!(messages_as(&server, "Ana", "?limit=-3").await.len(), 4);
    assert_eq!(messages_as(&server, "Ana", "?limit=100").await.len(), 4);
}

// ============================================================================
// Status Tests
// ============================================================================

#[tokio::test]
async fn test_status_heartbeat() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_empty_as("/status", "Ghost")
        .await
        .expect("Request failed");
    let error: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.error.code, "UNKNOWN_PARTICIPANT");

    join(&server, "Ana").await;
    let response = server
        .post_empty_as("/status", "Ana")
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Eviction Tests
// ============================================================================

#[tokio::test]
async fn test_idle_participant_is_evicted() {
    let server = TestServer::start().await.expect("Failed to start server");
    join(&server, "Ana").await;

    let evicted = server
        .sweeper()
        .sweep_at(Utc::now() + Duration::seconds(11))
        .await
        .expect("sweep failed");
    assert_eq!(evicted.len(), 1);

    let response = server.get("/participants").await.expect("Request failed");
    let participants: Vec<ParticipantResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert!(participants.is_empty());

    let response = server.get("/messages").await.expect("Request failed");
    let log: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let last = log.last().expect("departure logged");
    assert_eq!(last.from, "Ana");
    assert_eq!(last.text, "left");
    assert_eq!(last.kind, "status");

    let response = server
        .post_empty_as("/status", "Ana")
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // The name is free again
    join(&server, "Ana").await;
}

#[tokio::test]
async fn test_heartbeat_keeps_participant_present() {
    let server = TestServer::start().await.expect("Failed to start server");
    join(&server, "Ana").await;

    let evicted = server
        .sweeper()
        .sweep_at(Utc::now() + Duration::seconds(5))
        .await
        .expect("sweep failed");
    assert!(evicted.is_empty());

    let response = server.get("/participants").await.expect("Request failed");
    let participants: Vec<ParticipantResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(participants.len(), 1);
}

// ============================================================================
// Identity Header Tests
// ============================================================================

#[tokio::test]
async fn test_user_header_carries_utf8_names() {
    let server = TestServer::start().await.expect("Failed to start server");
    join(&server, "João").await;

    let user = HeaderValue::from_bytes("João".as_bytes()).unwrap();
    let response = server
        .client
        .post(format!("{}/messages", server.base_url()))
        .header(USER_HEADER, user.clone())
        .json(&MessageRequest::broadcast("olá"))
        .send()
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .client
        .post(format!("{}/status", server.base_url()))
        .header(USER_HEADER, user)
        .send()
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_user_header_rejects_invalid_utf8() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .client
        .post(format!("{}/status", server.base_url()))
        .header(USER_HEADER, HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap())
        .send()
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();
}
