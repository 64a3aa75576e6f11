//! Domain entities

pub mod conversation;
pub mod message;
pub mod party;

pub use conversation::Conversation;
pub use message::{Message, NewMessage, SenderType};
pub use party::{FinancingRequest, Lender, User};
