//! PostgreSQL implementation of LenderRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use lendline_core::entities::Lender;
use lendline_core::traits::{LenderRepository, RepoResult};

use crate::models::LenderModel;

use super::error::map_db_error;

/// PostgreSQL implementation of LenderRepository
#[derive(Clone)]
pub struct PgLenderRepository {
    pool: PgPool,
}

impl PgLenderRepository {
    /// Create a new PgLenderRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LenderRepository for PgLenderRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Lender>> {
        let result = sqlx::query_as::<_, LenderModel>(
            r#"
            SELECT id, email, name
            FROM lenders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Lender::from))
    }
}
