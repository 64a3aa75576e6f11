//! Inbound processing pipeline tests
//!
//! Exercises the webhook and reply-form flows end to end against in-memory
//! repository and gateway implementations.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use lendline_core::entities::{
    Conversation, FinancingRequest, Lender, Message, NewMessage, SenderType, User,
};
use lendline_core::traits::{
    ConversationRepository, FinancingRequestRepository, LenderRepository, MessageQuery,
    MessageRepository, NotificationGateway, OutboundEmail, RepoResult, UserRepository,
};
use lendline_core::{DomainError, ReplyAddressCodec};
use lendline_service::dto::requests::{InboundEmailRequest, ReplyFormRequest};
use lendline_service::{InboundMessageService, ServiceContextBuilder, ServiceContext};

// ============================================================================
// In-memory fakes
// ============================================================================

#[derive(Default)]
struct MemoryConversationRepo {
    conversations: Mutex<HashMap<i64, Conversation>>,
    find_calls: AtomicUsize,
    record_calls: Mutex<Vec<(i64, String)>>,
}

#[async_trait]
impl ConversationRepository for MemoryConversationRepo {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Conversation>> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.conversations.lock().unwrap().get(&id).cloned())
    }

    async fn record_last_message(
        &self,
        id: i64,
        at: DateTime<Utc>,
        preview: &str,
    ) -> RepoResult<()> {
        let mut conversations = self.conversations.lock().unwrap();
        let conversation = conversations
            .get_mut(&id)
            .ok_or(DomainError::ConversationNotFound(id))?;
        conversation.last_message_at = Some(at);
        conversation.last_message_preview = Some(preview.to_string());
        self.record_calls
            .lock()
            .unwrap()
            .push((id, preview.to_string()));
        Ok(())
    }
}

#[derive(Default)]
struct MemoryMessageRepo {
    messages: Mutex<Vec<Message>>,
    next_id: AtomicI64,
    fail_create: AtomicBool,
}

#[async_trait]
impl MessageRepository for MemoryMessageRepo {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Message>> {
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn find_by_conversation(
        &self,
        conversation_id: i64,
        query: MessageQuery,
    ) -> RepoResult<Vec<Message>> {
        let messages = self.messages.lock().unwrap();
        let mut result: Vec<Message> = messages
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .cloned()
            .collect();
        result.truncate(query.limit.max(1) as usize);
        Ok(result)
    }

    async fn find_by_email_message_id(
        &self,
        conversation_id: i64,
        email_message_id: &str,
    ) -> RepoResult<Option<Message>> {
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .find(|m| {
                m.conversation_id == conversation_id
                    && m.email_message_id.as_deref() == Some(email_message_id)
            })
            .cloned())
    }

    async fn create(&self, message: &NewMessage) -> RepoResult<Message> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("insert failed".to_string()));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let created = Message {
            id,
            conversation_id: message.conversation_id,
            sender_type: message.sender_type,
            sender_id: message.sender_id,
            sender_email: message.sender_email.clone(),
            message_text: message.message_text.clone(),
            message_html: message.message_html.clone(),
            is_email_origin: message.is_email_origin,
            email_message_id: message.email_message_id.clone(),
            is_read: false,
            created_at: Utc::now(),
        };
        self.messages.lock().unwrap().push(created.clone());
        Ok(created)
    }
}

#[derive(Default)]
struct MemoryLenderRepo {
    lenders: Mutex<HashMap<i64, Lender>>,
}

#[async_trait]
impl LenderRepository for MemoryLenderRepo {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Lender>> {
        Ok(self.lenders.lock().unwrap().get(&id).cloned())
    }
}

#[derive(Default)]
struct MemoryUserRepo {
    users: Mutex<HashMap<i64, User>>,
}

#[async_trait]
impl UserRepository for MemoryUserRepo {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }
}

#[derive(Default)]
struct MemoryFinancingRequestRepo {
    requests: Mutex<HashMap<i64, FinancingRequest>>,
}

#[async_trait]
impl FinancingRequestRepository for MemoryFinancingRequestRepo {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<FinancingRequest>> {
        Ok(self.requests.lock().unwrap().get(&id).cloned())
    }
}

#[derive(Default)]
struct MemoryGateway {
    sent: Mutex<Vec<OutboundEmail>>,
    fail: AtomicBool,
}

#[async_trait]
impl NotificationGateway for MemoryGateway {
    async fn send(&self, email: &OutboundEmail) -> Result<(), DomainError> {
        self.sent.lock().unwrap().push(email.clone());
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::MailError("provider unavailable".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// Fixture
// ============================================================================

const INBOUND_DOMAIN: &str = "inbound.example.com";

struct Fixture {
    ctx: ServiceContext,
    conversations: Arc<MemoryConversationRepo>,
    messages: Arc<MemoryMessageRepo>,
    gateway: Arc<MemoryGateway>,
}

/// Conversation 42: lender 3 (lender@x.com) and registered buyer 7
/// (buyer@x.com) on financing request 10
fn fixture() -> Fixture {
    fixture_with(|_| {})
}

fn fixture_with(customize: impl FnOnce(&mut FinancingRequest)) -> Fixture {
    let conversations = Arc::new(MemoryConversationRepo::default());
    let messages = Arc::new(MemoryMessageRepo::default());
    let lenders = Arc::new(MemoryLenderRepo::default());
    let users = Arc::new(MemoryUserRepo::default());
    let requests = Arc::new(MemoryFinancingRequestRepo::default());
    let gateway = Arc::new(MemoryGateway::default());

    conversations.conversations.lock().unwrap().insert(
        42,
        Conversation {
            id: 42,
            financing_request_id: 10,
            lender_id: 3,
            property_type: "condo".to_string(),
            loan_amount: 450_000,
            last_message_at: None,
            last_message_preview: None,
            created_at: Utc::now(),
        },
    );

    lenders.lenders.lock().unwrap().insert(
        3,
        Lender {
            id: 3,
            email: "lender@x.com".to_string(),
            name: "Acme Lending".to_string(),
        },
    );

    users.users.lock().unwrap().insert(
        7,
        User {
            id: 7,
            email: "buyer@x.com".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            created_at: Utc::now(),
        },
    );

    let mut request = FinancingRequest {
        id: 10,
        user_id: Some(7),
        contact_email: None,
        property_type: "condo".to_string(),
        loan_amount: 450_000,
        created_at: Utc::now(),
    };
    customize(&mut request);
    requests.requests.lock().unwrap().insert(10, request);

    let ctx = ServiceContextBuilder::new()
        .conversation_repo(conversations.clone())
        .message_repo(messages.clone())
        .lender_repo(lenders)
        .user_repo(users)
        .financing_request_repo(requests)
        .notification_gateway(gateway.clone())
        .reply_codec(Arc::new(ReplyAddressCodec::new(INBOUND_DOMAIN)))
        .build()
        .expect("context builds");

    Fixture {
        ctx,
        conversations,
        messages,
        gateway,
    }
}

fn webhook(from: &str, to: &str, text: &str) -> InboundEmailRequest {
    InboundEmailRequest {
        from: Some(from.to_string()),
        to: Some(to.to_string()),
        subject: Some("Re: Your condo financing request".to_string()),
        text: Some(text.to_string()),
        html: None,
        message_id: None,
    }
}

fn status_of(err: &lendline_service::ServiceError) -> u16 {
    err.status_code()
}

// ============================================================================
// Webhook flow
// ============================================================================

#[tokio::test]
async fn test_lender_reply_is_persisted_and_buyer_notified() {
    let fixture = fixture();
    let service = InboundMessageService::new(&fixture.ctx);

    let response = service
        .process_webhook(webhook(
            // Case variation on the stored lender address
            "Lender@X.com",
            "conv_42_ab12cd34ab12cd34@inbound.example.com",
            "Thanks, sounds good.",
        ))
        .await
        .expect("webhook succeeds");

    assert_eq!(response.sender_type, "lender");
    assert_eq!(response.conversation_id, "42");
    assert!(response.notified);
    assert!(!response.duplicate);

    let messages = fixture.messages.messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    let message = &messages[0];
    assert_eq!(message.sender_type, SenderType::Lender);
    assert_eq!(message.sender_id, Some(3));
    assert_eq!(message.message_text, "Thanks, sounds good.");
    assert!(message.is_email_origin);
    assert!(!message.is_read);

    // Exactly one notification, addressed to the buyer, with a fresh reply
    // address routing back to the same conversation
    let sent = fixture.gateway.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "buyer@x.com");
    let codec = ReplyAddressCodec::new(INBOUND_DOMAIN);
    assert_eq!(codec.decode(&sent[0].reply_to), Some(42));
}

#[tokio::test]
async fn test_buyer_reply_notifies_lender() {
    let fixture = fixture();
    let service = InboundMessageService::new(&fixture.ctx);

    let response = service
        .process_webhook(webhook(
            "buyer@x.com",
            "conv_42_0011223344556677@inbound.example.com",
            "Can we close next month?",
        ))
        .await
        .expect("webhook succeeds");

    assert_eq!(response.sender_type, "buyer");

    let sent = fixture.gateway.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "lender@x.com");
}

#[tokio::test]
async fn test_notification_failure_does_not_fail_the_request() {
    let fixture = fixture();
    fixture.gateway.fail.store(true, Ordering::SeqCst);
    let service = InboundMessageService::new(&fixture.ctx);

    let response = service
        .process_webhook(webhook(
            "lender@x.com",
            "conv_42_ab12cd34ab12cd34@inbound.example.com",
            "Thanks, sounds good.",
        ))
        .await
        .expect("persistence succeeded, so the request succeeds");

    assert!(!response.notified);
    // The message id refers to a durably stored row
    let stored = fixture.messages.messages.lock().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id.to_string(), response.message_id);
    // The send was attempted exactly once
    assert_eq!(fixture.gateway.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_stranger_is_rejected_without_persisting() {
    let fixture = fixture();
    let service = InboundMessageService::new(&fixture.ctx);

    let err = service
        .process_webhook(webhook(
            "stranger@x.com",
            "conv_42_ab12cd34ab12cd34@inbound.example.com",
            "Let me in",
        ))
        .await
        .expect_err("unknown sender is rejected");

    assert_eq!(status_of(&err), 403);
    assert!(fixture.messages.messages.lock().unwrap().is_empty());
    assert!(fixture.gateway.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_from_or_to_is_rejected() {
    let fixture = fixture();
    let service = InboundMessageService::new(&fixture.ctx);

    let mut request = webhook("lender@x.com", "conv_42_ab@inbound.example.com", "hi");
    request.from = None;
    let err = service.process_webhook(request).await.expect_err("missing from");
    assert_eq!(status_of(&err), 400);

    let mut request = webhook("lender@x.com", "conv_42_ab@inbound.example.com", "hi");
    request.to = Some("   ".to_string());
    let err = service.process_webhook(request).await.expect_err("blank to");
    assert_eq!(status_of(&err), 400);
}

#[tokio::test]
async fn test_unroutable_address_is_rejected() {
    let fixture = fixture();
    let service = InboundMessageService::new(&fixture.ctx);

    let err = service
        .process_webhook(webhook("lender@x.com", "support@example.com", "hi"))
        .await
        .expect_err("address without conversation shape");

    assert_eq!(status_of(&err), 400);
    assert_eq!(err.error_code(), "UNROUTABLE_REPLY_ADDRESS");
    assert!(fixture.messages.messages.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_conversation_is_not_found() {
    let fixture = fixture();
    let service = InboundMessageService::new(&fixture.ctx);

    let err = service
        .process_webhook(webhook(
            "lender@x.com",
            "conv_999_ab12cd34ab12cd34@inbound.example.com",
            "hi",
        ))
        .await
        .expect_err("conversation 999 does not exist");

    assert_eq!(status_of(&err), 404);
}

#[tokio::test]
async fn test_quoted_reply_content_is_stripped() {
    let fixture = fixture();
    let service = InboundMessageService::new(&fixture.ctx);

    service
        .process_webhook(webhook(
            "lender@x.com",
            "conv_42_ab12cd34ab12cd34@inbound.example.com",
            "Hi there\nOn Jan 1 John wrote:\n> old text",
        ))
        .await
        .expect("webhook succeeds");

    let messages = fixture.messages.messages.lock().unwrap();
    assert_eq!(messages[0].message_text, "Hi there");
}

#[tokio::test]
async fn test_html_only_email_falls_back_to_extracted_text() {
    let fixture = fixture();
    let service = InboundMessageService::new(&fixture.ctx);

    let mut request = webhook(
        "lender@x.com",
        "conv_42_ab12cd34ab12cd34@inbound.example.com",
        "",
    );
    request.text = None;
    request.html = Some("<p>Approved<br>Call me</p><blockquote>old</blockquote>".to_string());

    service.process_webhook(request).await.expect("webhook succeeds");

    let messages = fixture.messages.messages.lock().unwrap();
    assert_eq!(messages[0].message_text, "Approved\nCall me");
    assert_eq!(messages[0].message_html.as_deref(), Some("<p>Approved<br>Call me</p>"));
}

#[tokio::test]
async fn test_guest_buyer_resolves_via_contact_email() {
    let fixture = fixture_with(|request| {
        request.user_id = None;
        request.contact_email = Some("guest@x.com".to_string());
    });
    let service = InboundMessageService::new(&fixture.ctx);

    let response = service
        .process_webhook(webhook(
            "guest@x.com",
            "conv_42_ab12cd34ab12cd34@inbound.example.com",
            "Still interested!",
        ))
        .await
        .expect("guest buyer is a participant");

    assert_eq!(response.sender_type, "buyer");
    let messages = fixture.messages.messages.lock().unwrap();
    assert_eq!(messages[0].sender_id, None);
}

#[tokio::test]
async fn test_duplicate_webhook_delivery_is_idempotent() {
    let fixture = fixture();
    let service = InboundMessageService::new(&fixture.ctx);

    let mut request = webhook(
        "lender@x.com",
        "conv_42_ab12cd34ab12cd34@inbound.example.com",
        "Thanks, sounds good.",
    );
    request.message_id = Some("<msg-1@provider>".to_string());

    let first = service
        .process_webhook(request.clone())
        .await
        .expect("first delivery succeeds");
    let second = service
        .process_webhook(request)
        .await
        .expect("redelivery succeeds");

    assert!(!first.duplicate);
    assert!(second.duplicate);
    assert_eq!(first.message_id, second.message_id);
    assert_eq!(fixture.messages.messages.lock().unwrap().len(), 1);
    // Only the first delivery attempted a notification
    assert_eq!(fixture.gateway.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_persistence_failure_aborts_before_notification() {
    let fixture = fixture();
    fixture.messages.fail_create.store(true, Ordering::SeqCst);
    let service = InboundMessageService::new(&fixture.ctx);

    let err = service
        .process_webhook(webhook(
            "lender@x.com",
            "conv_42_ab12cd34ab12cd34@inbound.example.com",
            "hi",
        ))
        .await
        .expect_err("datastore write error is fatal");

    assert_eq!(status_of(&err), 500);
    assert!(fixture.gateway.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_conversation_preview_is_recorded() {
    let fixture = fixture();
    let service = InboundMessageService::new(&fixture.ctx);

    let long_message = "a".repeat(250);
    service
        .process_webhook(webhook(
            "lender@x.com",
            "conv_42_ab12cd34ab12cd34@inbound.example.com",
            &long_message,
        ))
        .await
        .expect("webhook succeeds");

    let record_calls = fixture.conversations.record_calls.lock().unwrap();
    assert_eq!(record_calls.len(), 1);
    assert_eq!(record_calls[0].0, 42);
    assert_eq!(record_calls[0].1.len(), Conversation::PREVIEW_LEN);
}

// ============================================================================
// Reply form flow
// ============================================================================

#[tokio::test]
async fn test_reply_form_persists_buyer_message() {
    let fixture = fixture();
    let service = InboundMessageService::new(&fixture.ctx);

    let response = service
        .process_reply_form(
            ReplyFormRequest {
                conversation_id: 42,
                message: "  Works for me.  ".to_string(),
            },
            Some("buyer@x.com"),
        )
        .await
        .expect("reply form succeeds");

    assert_eq!(response.sender_type, "buyer");
    assert!(response.notified);

    let messages = fixture.messages.messages.lock().unwrap();
    assert_eq!(messages[0].message_text, "Works for me.");
    assert!(!messages[0].is_email_origin);
    assert!(messages[0].email_message_id.is_none());
}

#[tokio::test]
async fn test_reply_form_missing_sender_header_is_rejected() {
    let fixture = fixture();
    let service = InboundMessageService::new(&fixture.ctx);

    let err = service
        .process_reply_form(
            ReplyFormRequest {
                conversation_id: 42,
                message: "hello".to_string(),
            },
            None,
        )
        .await
        .expect_err("header is required");

    assert_eq!(status_of(&err), 400);
}

#[tokio::test]
async fn test_overlong_reply_is_rejected_before_any_datastore_access() {
    let fixture = fixture();
    let service = InboundMessageService::new(&fixture.ctx);

    let err = service
        .process_reply_form(
            ReplyFormRequest {
                conversation_id: 42,
                message: "a".repeat(5001),
            },
            Some("buyer@x.com"),
        )
        .await
        .expect_err("5001 characters is over the cap");

    assert_eq!(status_of(&err), 400);
    assert_eq!(err.error_code(), "MESSAGE_TOO_LONG");
    // Rejected before the conversation was even looked up
    assert_eq!(fixture.conversations.find_calls.load(Ordering::SeqCst), 0);
    assert!(fixture.messages.messages.lock().unwrap().is_empty());
}
