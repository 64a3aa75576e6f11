//! Application services

pub mod context;
pub mod conversation;
pub mod error;
pub mod inbound;
pub mod notification;
pub mod resolver;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use conversation::ConversationService;
pub use error::{ServiceError, ServiceResult};
pub use inbound::InboundMessageService;
pub use notification::NotificationService;
pub use resolver::{ResolvedParties, SenderResolver};
