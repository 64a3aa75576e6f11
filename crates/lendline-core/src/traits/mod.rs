//! Domain traits (ports) for infrastructure implementations

pub mod notification;
pub mod repositories;

pub use notification::{NotificationGateway, OutboundEmail};
pub use repositories::{
    ConversationRepository, FinancingRequestRepository, LenderRepository, MessageQuery,
    MessageRepository, RepoResult, UserRepository,
};
