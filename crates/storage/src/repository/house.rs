use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::house::{CreateHouseRequest, UpdateHouseRequest};
use crate::error::{Result, StorageError};
use crate::models::House;

/// Repository for House database operations
pub struct HouseRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> HouseRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List houses in display order
    pub async fn list(&self, include_inactive: bool) -> Result<Vec<House>> {
        let houses = sqlx::query_as::<_, House>(
            r#"
            SELECT house_id, name, slug, color, display_order, is_active,
                   created_by, created_seq, created_at, updated_at
            FROM houses
            WHERE is_active OR $1
            ORDER BY display_order, name
            "#,
        )
        .bind(include_inactive)
        .fetch_all(self.pool)
        .await?;

        Ok(houses)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<House> {
        let house = sqlx::query_as::<_, House>(
            r#"
            SELECT house_id, name, slug, color, display_order, is_active,
                   created_by, created_seq, created_at, updated_at
            FROM houses
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(house)
    }

    /// Case-insensitive lookup by name on an open connection
    pub async fn find_by_name_in(conn: &mut PgConnection, name: &str) -> Result<Option<House>> {
        let house = sqlx::query_as::<_, House>(
            r#"
            SELECT house_id, name, slug, color, display_order, is_active,
                   created_by, created_seq, created_at, updated_at
            FROM houses
            WHERE lower(name) = lower($1)
            "#,
        )
        .bind(name.trim())
        .fetch_optional(&mut *conn)
        .await?;

        Ok(house)
    }

    /// Create a new house, stamping `actor` as its creator
    pub async fn create(&self, req: &CreateHouseRequest, actor: &str) -> Result<House> {
        let mut tx = self.pool.begin().await?;
        let house = Self::create_in(&mut tx, req, actor).await?;
        tx.commit().await?;

        Ok(house)
    }

    /// Create a house on an open connection (usually inside a transaction)
    pub async fn create_in(
        conn: &mut PgConnection,
        req: &CreateHouseRequest,
        actor: &str,
    ) -> Result<House> {
        let name = req.name.trim();
        let slug = generate_unique_slug(conn, name, None).await?;

        let house = sqlx::query_as::<_, House>(
            r#"
            INSERT INTO houses (name, slug, color, display_order, is_active, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING house_id, name, slug, color, display_order, is_active,
                      created_by, created_seq, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(&slug)
        .bind(req.color.to_uppercase())
        .bind(req.display_order)
        .bind(req.is_active)
        .bind(actor)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| StorageError::from(e).on_unique_violation("House name already exists"))?;

        Ok(house)
    }

    /// Update an existing house. A new name also produces a new slug.
    pub async fn update(&self, existing: &House, req: &UpdateHouseRequest) -> Result<House> {
        let mut tx = self.pool.begin().await?;

        let name = req
            .name
            .as_deref()
            .map(str::trim)
            .unwrap_or(existing.name.as_str());
        let slug = if name != existing.name {
            generate_unique_slug(&mut tx, name, Some(existing.house_id)).await?
        } else {
            existing.slug.clone()
        };
        let color = req
            .color
            .as_deref()
            .map(str::to_uppercase)
            .unwrap_or_else(|| existing.color.clone());
        let display_order = req.display_order.unwrap_or(existing.display_order);
        let is_active = req.is_active.unwrap_or(existing.is_active);

        let house = sqlx::query_as::<_, House>(
            r#"
            UPDATE houses
            SET
                name = $2,
                slug = $3,
                color = $4,
                display_order = $5,
                is_active = $6,
                updated_at = NOW()
            WHERE house_id = $1
            RETURNING house_id, name, slug, color, display_order, is_active,
                      created_by, created_seq, created_at, updated_at
            "#,
        )
        .bind(existing.house_id)
        .bind(name)
        .bind(&slug)
        .bind(&color)
        .bind(display_order)
        .bind(is_active)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| StorageError::from(e).on_unique_violation("House name already exists"))?
        .ok_or(StorageError::NotFound)?;

        tx.commit().await?;

        Ok(house)
    }

    /// Delete a house. Fails while ledger entries still reference it.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM houses
            WHERE house_id = $1
            "#,
        )
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| {
            StorageError::from(e).on_foreign_key_violation(
                "House still has point entries; revoke them or deactivate the house instead",
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

/// Turns a display name into a URL slug: `St. Xavier's House` becomes `st-xaviers-house`.
pub fn slugify(name: &str) -> String {
    let slug = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() || c == '_' { '-' } else { c })
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<&str>>()
        .join("-");

    if slug.is_empty() {
        "house".to_string()
    } else {
        slug
    }
}

/// Slug for `name` that no other house uses, suffixed `-2`, `-3`, ... when taken.
async fn generate_unique_slug(
    conn: &mut PgConnection,
    name: &str,
    exclude: Option<Uuid>,
) -> Result<String> {
    let base_slug = slugify(name);
    let mut final_slug = base_slug.clone();
    let mut counter = 2;

    while sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM houses WHERE slug = $1 AND house_id IS DISTINCT FROM $2)",
    )
    .bind(&final_slug)
    .bind(exclude)
    .fetch_one(&mut *conn)
    .await?
    {
        final_slug = format!("{}-{}", base_slug, counter);
        counter += 1;
    }

    Ok(final_slug)
}
