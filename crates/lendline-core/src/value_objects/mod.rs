//! Value objects

pub mod email;
pub mod reply_address;

pub use email::extract_email_address;
pub use reply_address::ReplyAddressCodec;
