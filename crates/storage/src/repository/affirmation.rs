use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::affirmation::{CreateAffirmationRequest, UpdateAffirmationRequest};
use crate::dto::common::PaginationParams;
use crate::error::{Result, StorageError};
use crate::models::Affirmation;
use crate::services::daily_affirmation::AffirmationLookup;

/// Repository for Affirmation database operations
pub struct AffirmationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AffirmationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List affirmations, latest date first
    pub async fn list(
        &self,
        active_only: bool,
        pagination: PaginationParams,
    ) -> Result<(Vec<Affirmation>, i64)> {
        let total_items = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM affirmations WHERE is_active OR NOT $1",
        )
        .bind(active_only)
        .fetch_one(self.pool)
        .await?;

        let affirmations = sqlx::query_as::<_, Affirmation>(
            r#"
            SELECT affirmation_id, content, author, date, is_active,
                   created_by, created_at, updated_at
            FROM affirmations
            WHERE is_active OR NOT $1
            ORDER BY date DESC, created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(active_only)
        .bind(pagination.limit() as i64)
        .bind(pagination.offset())
        .fetch_all(self.pool)
        .await?;

        Ok((affirmations, total_items))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Affirmation> {
        let affirmation = sqlx::query_as::<_, Affirmation>(
            r#"
            SELECT affirmation_id, content, author, date, is_active,
                   created_by, created_at, updated_at
            FROM affirmations
            WHERE affirmation_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(affirmation)
    }

    pub async fn create(&self, req: &CreateAffirmationRequest, actor: &str) -> Result<Affirmation> {
        let affirmation = sqlx::query_as::<_, Affirmation>(
            r#"
            INSERT INTO affirmations (content, author, date, is_active, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING affirmation_id, content, author, date, is_active,
                      created_by, created_at, updated_at
            "#,
        )
        .bind(req.content.trim())
        .bind(req.author.as_deref().map(str::trim).filter(|a| !a.is_empty()))
        .bind(req.date)
        .bind(req.is_active)
        .bind(actor)
        .fetch_one(self.pool)
        .await?;

        Ok(affirmation)
    }

    pub async fn update(
        &self,
        existing: &Affirmation,
        req: &UpdateAffirmationRequest,
    ) -> Result<Affirmation> {
        let content = req
            .content
            .as_deref()
            .map(str::trim)
            .unwrap_or(existing.content.as_str());
        let author = match req.author.as_deref().map(str::trim) {
            Some("") => None,
            Some(author) => Some(author),
            None => existing.author.as_deref(),
        };
        let date = req.date.unwrap_or(existing.date);
        let is_active = req.is_active.unwrap_or(existing.is_active);

        let affirmation = sqlx::query_as::<_, Affirmation>(
            r#"
            UPDATE affirmations
            SET
                content = $2,
                author = $3,
                date = $4,
                is_active = $5,
                updated_at = NOW()
            WHERE affirmation_id = $1
            RETURNING affirmation_id, content, author, date, is_active,
                      created_by, created_at, updated_at
            "#,
        )
        .bind(existing.affirmation_id)
        .bind(content)
        .bind(author)
        .bind(date)
        .bind(is_active)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(affirmation)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM affirmations WHERE affirmation_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl<'a> AffirmationLookup for AffirmationRepository<'a> {
    async fn active_on(&self, date: NaiveDate) -> Result<Option<Affirmation>> {
        let affirmation = sqlx::query_as::<_, Affirmation>(
            r#"
            SELECT affirmation_id, content, author, date, is_active,
                   created_by, created_at, updated_at
            FROM affirmations
            WHERE is_active AND date = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(date)
        .fetch_optional(self.pool)
        .await?;

        Ok(affirmation)
    }

    async fn latest_active_until(&self, on_or_before: NaiveDate) -> Result<Option<Affirmation>> {
        let affirmation = sqlx::query_as::<_, Affirmation>(
            r#"
            SELECT affirmation_id, content, author, date, is_active,
                   created_by, created_at, updated_at
            FROM affirmations
            WHERE is_active AND date <= $1
            ORDER BY date DESC, created_at DESC
            LIMIT 1
            "#,
        )
        .bind(on_or_before)
        .fetch_optional(self.pool)
        .await?;

        Ok(affirmation)
    }
}
