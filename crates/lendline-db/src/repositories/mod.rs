//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in
//! lendline-core. Each repository handles database operations for a specific
//! domain entity.

mod conversation;
mod error;
mod financing_request;
mod lender;
mod message;
mod user;

pub use conversation::PgConversationRepository;
pub use financing_request::PgFinancingRequestRepository;
pub use lender::PgLenderRepository;
pub use message::PgMessageRepository;
pub use user::PgUserRepository;
