//! Data transfer objects for the application layer

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{InboundEmailRequest, ReplyFormRequest};
pub use responses::{
    HealthResponse, InboundMessageResponse, MessageResponse, ReadinessResponse,
};
