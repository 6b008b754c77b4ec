use chrono::{NaiveDate, NaiveDateTime};
use sqlx::PgPool;
use school_storage::{
    dto::{
        affirmation::{CreateAffirmationRequest, UpdateAffirmationRequest},
        common::PaginationParams,
    },
    error::Result,
    models::Affirmation,
    repository::affirmation::AffirmationRepository,
    services::{
        daily_affirmation::{DailyAffirmation, resolve_for_date},
        effective_date::effective_date,
    },
};
use uuid::Uuid;

use crate::state::SiteSettings;

pub async fn list_affirmations(
    pool: &PgPool,
    active_only: bool,
    pagination: PaginationParams,
) -> Result<(Vec<Affirmation>, i64)> {
    let repo = AffirmationRepository::new(pool);
    repo.list(active_only, pagination).await
}

pub async fn get_affirmation(pool: &PgPool, id: Uuid) -> Result<Affirmation> {
    let repo = AffirmationRepository::new(pool);
    repo.find_by_id(id).await
}

/// The affirmation in effect at `now`, with the effective date it was resolved for
pub async fn affirmation_for(
    pool: &PgPool,
    settings: &SiteSettings,
    now: NaiveDateTime,
) -> Result<(NaiveDate, Option<DailyAffirmation>)> {
    let date = effective_date(settings.affirmation_change_time, now);
    let repo = AffirmationRepository::new(pool);
    let found = resolve_for_date(&repo, date).await?;

    Ok((date, found))
}

pub async fn create_affirmation(
    pool: &PgPool,
    request: &CreateAffirmationRequest,
    actor: &str,
) -> Result<Affirmation> {
    let repo = AffirmationRepository::new(pool);
    let affirmation = repo.create(request, actor).await?;

    tracing::info!(
        affirmation_id = %affirmation.affirmation_id,
        date = %affirmation.date,
        actor = %actor,
        "Affirmation created"
    );

    Ok(affirmation)
}

pub async fn update_affirmation(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateAffirmationRequest,
    actor: &str,
) -> Result<Affirmation> {
    let repo = AffirmationRepository::new(pool);
    let existing = repo.find_by_id(id).await?;
    let affirmation = repo.update(&existing, request).await?;

    tracing::info!(affirmation_id = %id, actor = %actor, "Affirmation updated");

    Ok(affirmation)
}

pub async fn delete_affirmation(pool: &PgPool, id: Uuid, actor: &str) -> Result<()> {
    let repo = AffirmationRepository::new(pool);
    repo.delete(id).await?;

    tracing::info!(affirmation_id = %id, actor = %actor, "Affirmation deleted");

    Ok(())
}
