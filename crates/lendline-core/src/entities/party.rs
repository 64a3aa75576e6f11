//! Party entities - the people on either side of a conversation

use chrono::{DateTime, Utc};

/// Lender entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lender {
    pub id: i64,
    pub email: String,
    pub name: String,
}

/// Registered buyer account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Display name used in notification copy
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let trimmed = name.trim();
        if trimmed.is_empty() {
            self.email.clone()
        } else {
            trimmed.to_string()
        }
    }
}

/// Financing request entity
///
/// A request may be submitted by a guest before registering an account, in
/// which case `user_id` is absent and `contact_email` carries the only
/// reachable address for the buyer side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinancingRequest {
    pub id: i64,
    pub user_id: Option<i64>,
    pub contact_email: Option<String>,
    pub property_type: String,
    pub loan_amount: i64,
    pub created_at: DateTime<Utc>,
}

impl FinancingRequest {
    /// Check if the request is tied to a registered account
    #[inline]
    pub fn has_registered_user(&self) -> bool {
        self.user_id.is_some()
    }
}
