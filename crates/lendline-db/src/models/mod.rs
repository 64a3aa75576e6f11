//! Database models - SQLx-compatible structs for PostgreSQL tables

mod conversation;
mod financing_request;
mod lender;
mod message;
mod user;

pub use conversation::ConversationModel;
pub use financing_request::FinancingRequestModel;
pub use lender::LenderModel;
pub use message::MessageModel;
pub use user::UserModel;
