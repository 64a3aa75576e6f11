//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, API_PORT, MAIL_SERVER_TOKEN,
//!   MAIL_FROM_ADDRESS, MAIL_INBOUND_DOMAIN
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let health: HealthBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Inbound Webhook Tests
// ============================================================================

#[tokio::test]
async fn test_webhook_rejects_missing_from() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut payload = InboundEmailPayload::to_conversation(1, "someone@example.com", "hi");
    payload.from = None;

    let response = server
        .post("/api/v1/email/inbound", &payload)
        .await
        .expect("Request failed");
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "MISSING_FIELD");
}

#[tokio::test]
async fn test_webhook_rejects_unroutable_address() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut payload = InboundEmailPayload::to_conversation(1, "someone@example.com", "hi");
    // A plain mailbox with no conversation shape
    payload.to = Some("support@example.com".to_string());

    let response = server
        .post("/api/v1/email/inbound", &payload)
        .await
        .expect("Request failed");
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "UNROUTABLE_REPLY_ADDRESS");
}

#[tokio::test]
async fn test_webhook_unknown_conversation_is_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let payload =
        InboundEmailPayload::to_conversation(9_999_999_999, "someone@example.com", "hello");

    let response = server
        .post("/api/v1/email/inbound", &payload)
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Reply Form Tests
// ============================================================================

#[tokio::test]
async fn test_reply_form_requires_sender_header() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let form = ReplyForm {
        conversation_id: 1,
        message: "hello".to_string(),
    };

    let response = server
        .post_form("/api/v1/conversations/reply", None, &form)
        .await
        .expect("Request failed");
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "MISSING_FIELD");
}

#[tokio::test]
async fn test_reply_form_rejects_overlong_message() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let form = ReplyForm {
        conversation_id: 1,
        message: "a".repeat(5001),
    };

    let response = server
        .post_form(
            "/api/v1/conversations/reply",
            Some("buyer@example.com"),
            &form,
        )
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_reply_form_rejects_malformed_conversation_id() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_form(
            "/api/v1/conversations/reply",
            Some("buyer@example.com"),
            &[("conversation_id", "not-a-number"), ("message", "hello")],
        )
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Conversation Listing Tests
// ============================================================================

#[tokio::test]
async fn test_get_messages_rejects_bad_path() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get("/api/v1/conversations/abc/messages")
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_get_messages_rejects_bad_cursor() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get("/api/v1/conversations/1/messages?before=nope")
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_get_messages_unknown_conversation_is_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .get("/api/v1/conversations/9999999999/messages")
        .await
        .expect("Request failed");
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}
