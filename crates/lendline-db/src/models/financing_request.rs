//! Financing request database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for financing_requests table
#[derive(Debug, Clone, FromRow)]
pub struct FinancingRequestModel {
    pub id: i64,
    pub user_id: Option<i64>,
    pub contact_email: Option<String>,
    pub property_type: String,
    pub loan_amount: i64,
    pub created_at: DateTime<Utc>,
}

impl FinancingRequestModel {
    /// Check if the request was submitted by a registered account
    #[inline]
    pub fn has_registered_user(&self) -> bool {
        self.user_id.is_some()
    }
}
