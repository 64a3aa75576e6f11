//! Lender database model

use sqlx::FromRow;

/// Database model for lenders table
#[derive(Debug, Clone, FromRow)]
pub struct LenderModel {
    pub id: i64,
    pub email: String,
    pub name: String,
}
