//! # lendline-core
//!
//! Domain layer containing entities, value objects, repository traits, and the
//! email content sanitizers. This crate has zero dependencies on infrastructure
//! (database, web framework, mail provider, etc.).

pub mod entities;
pub mod error;
pub mod sanitize;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Conversation, FinancingRequest, Lender, Message, NewMessage, SenderType, User,
};
pub use error::DomainError;
pub use sanitize::{clean_reply_content, extract_text_from_html, CleanedContent};
pub use traits::{
    ConversationRepository, FinancingRequestRepository, LenderRepository, MessageQuery,
    MessageRepository, NotificationGateway, OutboundEmail, RepoResult, UserRepository,
};
pub use value_objects::{extract_email_address, ReplyAddressCodec};
