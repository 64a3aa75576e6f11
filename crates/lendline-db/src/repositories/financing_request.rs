//! PostgreSQL implementation of FinancingRequestRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use lendline_core::entities::FinancingRequest;
use lendline_core::traits::{FinancingRequestRepository, RepoResult};

use crate::models::FinancingRequestModel;

use super::error::map_db_error;

/// PostgreSQL implementation of FinancingRequestRepository
#[derive(Clone)]
pub struct PgFinancingRequestRepository {
    pool: PgPool,
}

impl PgFinancingRequestRepository {
    /// Create a new PgFinancingRequestRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FinancingRequestRepository for PgFinancingRequestRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<FinancingRequest>> {
        let result = sqlx::query_as::<_, FinancingRequestModel>(
            r#"
            SELECT id, user_id, contact_email, property_type, loan_amount, created_at
            FROM financing_requests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(FinancingRequest::from))
    }
}
