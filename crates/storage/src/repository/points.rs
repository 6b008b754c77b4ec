use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::common::PaginationParams;
use crate::dto::points::{AwardPointsRequest, HouseSummary, PointEntryResponse, PointEntryRow};
use crate::error::{Result, StorageError};
use crate::models::{AcademicYear, PointCategory, PointEntry};

/// Resolved filters for a ledger listing
#[derive(Debug, Clone, Default)]
pub struct LedgerQuery {
    pub house_id: Option<Uuid>,
    pub category: Option<PointCategory>,
    pub academic_year: Option<AcademicYear>,
    pub pagination: PaginationParams,
}

/// Repository for the house points ledger
pub struct PointsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PointsRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Append a ledger entry booked by `actor`
    pub async fn award(&self, req: &AwardPointsRequest, actor: &str) -> Result<PointEntryResponse> {
        let mut tx = self.pool.begin().await?;
        let entry = Self::award_in(&mut tx, req, actor).await?;
        tx.commit().await?;

        Ok(entry)
    }

    /// Append a ledger entry on an open connection.
    ///
    /// The house row is locked `FOR SHARE` so it cannot be deleted between the
    /// existence check and the insert.
    pub async fn award_in(
        conn: &mut PgConnection,
        req: &AwardPointsRequest,
        actor: &str,
    ) -> Result<PointEntryResponse> {
        let house = sqlx::query_as::<_, (Uuid, String, String, String)>(
            r#"
            SELECT house_id, name, slug, color
            FROM houses
            WHERE house_id = $1
            FOR SHARE
            "#,
        )
        .bind(req.house_id)
        .fetch_optional(&mut *conn)
        .await?
        .map(|(house_id, name, slug, color)| HouseSummary {
            house_id,
            name,
            slug,
            color,
        })
        .ok_or_else(|| {
            StorageError::InvalidReference(format!("House {} does not exist", req.house_id))
        })?;

        let entry = sqlx::query_as::<_, PointEntry>(
            r#"
            INSERT INTO point_entries (house_id, category, points, event_name, event_date, remarks, awarded_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING entry_id, house_id, category, points, event_name, event_date,
                      remarks, awarded_by, created_at
            "#,
        )
        .bind(req.house_id)
        .bind(req.category)
        .bind(req.points)
        .bind(req.event_name.trim())
        .bind(req.event_date)
        .bind(req.remarks.as_deref().map(str::trim).filter(|r| !r.is_empty()))
        .bind(actor)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            let err = StorageError::from(e);
            if err.is_foreign_key_violation() {
                StorageError::InvalidReference(format!("House {} does not exist", req.house_id))
            } else {
                err
            }
        })?;

        Ok(PointEntryResponse {
            entry_id: entry.entry_id,
            house,
            category: entry.category,
            points: entry.points,
            event_name: entry.event_name,
            event_date: entry.event_date,
            remarks: entry.remarks,
            awarded_by: entry.awarded_by,
            created_at: entry.created_at,
        })
    }

    pub async fn find_by_id(&self, entry_id: Uuid) -> Result<PointEntryResponse> {
        let row = sqlx::query_as::<_, PointEntryRow>(
            r#"
            SELECT pe.entry_id, pe.house_id, h.name AS house_name, h.slug AS house_slug,
                   h.color AS house_color, pe.category, pe.points, pe.event_name,
                   pe.event_date, pe.remarks, pe.awarded_by, pe.created_at
            FROM point_entries pe
            INNER JOIN houses h ON h.house_id = pe.house_id
            WHERE pe.entry_id = $1
            "#,
        )
        .bind(entry_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(row.into())
    }

    /// List ledger entries, newest event first
    pub async fn list(&self, query: &LedgerQuery) -> Result<(Vec<PointEntryResponse>, i64)> {
        let mut count_query = QueryBuilder::new(
            r#"
            SELECT COUNT(*)
            FROM point_entries pe
            WHERE 1=1
            "#,
        );
        push_filters(&mut count_query, query);

        let total_items = count_query
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut list_query = QueryBuilder::new(
            r#"
            SELECT pe.entry_id, pe.house_id, h.name AS house_name, h.slug AS house_slug,
                   h.color AS house_color, pe.category, pe.points, pe.event_name,
                   pe.event_date, pe.remarks, pe.awarded_by, pe.created_at
            FROM point_entries pe
            INNER JOIN houses h ON h.house_id = pe.house_id
            WHERE 1=1
            "#,
        );
        push_filters(&mut list_query, query);
        list_query.push(" ORDER BY pe.event_date DESC, pe.created_at DESC LIMIT ");
        list_query.push_bind(query.pagination.limit() as i64);
        list_query.push(" OFFSET ");
        list_query.push_bind(query.pagination.offset());

        let rows: Vec<PointEntryRow> = list_query.build_query_as().fetch_all(self.pool).await?;

        Ok((rows.into_iter().map(PointEntryResponse::from).collect(), total_items))
    }

    /// Hard-delete a ledger entry and return what was removed
    pub async fn revoke(&self, entry_id: Uuid) -> Result<PointEntry> {
        let entry = sqlx::query_as::<_, PointEntry>(
            r#"
            DELETE FROM point_entries
            WHERE entry_id = $1
            RETURNING entry_id, house_id, category, points, event_name, event_date,
                      remarks, awarded_by, created_at
            "#,
        )
        .bind(entry_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(entry)
    }
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &LedgerQuery) {
    if let Some(house_id) = query.house_id {
        builder.push(" AND pe.house_id = ");
        builder.push_bind(house_id);
    }

    if let Some(category) = query.category {
        builder.push(" AND pe.category = ");
        builder.push_bind(category);
    }

    if let Some(year) = query.academic_year {
        builder.push(" AND pe.event_date >= ");
        builder.push_bind(year.start_date());
        builder.push(" AND pe.event_date < ");
        builder.push_bind(year.end_date());
    }
}
