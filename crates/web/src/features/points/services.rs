use sqlx::PgPool;
use school_storage::{
    dto::points::{AwardPointsRequest, PointEntryFilter, PointEntryResponse},
    error::Result,
    repository::{
        house::HouseRepository,
        points::{LedgerQuery, PointsRepository},
    },
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};
use crate::state::SiteSettings;

/// Turn request filters into a ledger query.
///
/// `house_id` takes precedence over the `house` slug in the filter.
pub async fn resolve_ledger_query(
    pool: &PgPool,
    settings: &SiteSettings,
    filter: &PointEntryFilter,
    house_id: Option<Uuid>,
) -> WebResult<LedgerQuery> {
    let pagination = filter.pagination();
    pagination.validate().map_err(WebError::BadRequest)?;

    let academic_year = filter
        .academic_year
        .as_deref()
        .map(|year| settings.academic_year(year))
        .transpose()?;

    let house_id = match (house_id, filter.house.as_deref()) {
        (Some(id), _) => Some(id),
        (None, Some(slug)) => Some(HouseRepository::new(pool).find_by_slug(slug).await?.house_id),
        (None, None) => None,
    };

    Ok(LedgerQuery {
        house_id,
        category: filter.category,
        academic_year,
        pagination,
    })
}

/// List ledger entries
pub async fn list_points(pool: &PgPool, query: &LedgerQuery) -> Result<(Vec<PointEntryResponse>, i64)> {
    let repo = PointsRepository::new(pool);
    repo.list(query).await
}

/// Get one ledger entry
pub async fn get_point_entry(pool: &PgPool, entry_id: Uuid) -> Result<PointEntryResponse> {
    let repo = PointsRepository::new(pool);
    repo.find_by_id(entry_id).await
}

/// Award (or deduct) points on behalf of `actor`
pub async fn award_points(
    pool: &PgPool,
    request: &AwardPointsRequest,
    actor: &str,
) -> Result<PointEntryResponse> {
    let repo = PointsRepository::new(pool);
    let entry = repo.award(request, actor).await?;

    tracing::info!(
        entry_id = %entry.entry_id,
        house = %entry.house.slug,
        category = %entry.category,
        points = entry.points,
        actor = %actor,
        "Points awarded"
    );

    Ok(entry)
}

/// Revoke a ledger entry. The row is removed, so the log line is the only trace left.
pub async fn revoke_points(pool: &PgPool, entry_id: Uuid, actor: &str) -> Result<()> {
    let repo = PointsRepository::new(pool);
    let entry = repo.revoke(entry_id).await?;

    tracing::info!(
        entry_id = %entry.entry_id,
        house_id = %entry.house_id,
        category = %entry.category,
        points = entry.points,
        event_name = %entry.event_name,
        event_date = %entry.event_date,
        awarded_by = %entry.awarded_by,
        actor = %actor,
        "Points revoked"
    );

    Ok(())
}
