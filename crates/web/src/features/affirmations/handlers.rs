use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Local;
use school_storage::{
    Database,
    dto::{
        affirmation::{
            AffirmationListQuery, AffirmationResponse, CreateAffirmationRequest,
            TodayAffirmationResponse, TodayQuery, UpdateAffirmationRequest,
        },
        common::PaginatedResponse,
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::{WebError, WebResult};
use crate::middleware::auth::Actor;
use crate::state::SiteSettings;

use super::services;

#[utoipa::path(
    get,
    path = "/api/affirmations",
    params(AffirmationListQuery),
    responses(
        (status = 200, description = "Affirmations, latest date first", body = PaginatedResponse<AffirmationResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "affirmations"
)]
pub async fn list_affirmations(
    State(db): State<Database>,
    Query(query): Query<AffirmationListQuery>,
) -> WebResult<Response> {
    let pagination = query.pagination();
    pagination.validate().map_err(WebError::BadRequest)?;

    let (affirmations, total_items) =
        services::list_affirmations(db.pool(), query.active_only, pagination).await?;

    let response = PaginatedResponse::new(affirmations, pagination, total_items)
        .map(AffirmationResponse::from);

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/affirmations/today",
    params(TodayQuery),
    responses(
        (status = 200, description = "Affirmation for the current effective date", body = TodayAffirmationResponse),
        (status = 400, description = "Invalid query parameters"),
        (status = 404, description = "No affirmation dated on or before the effective date")
    ),
    tag = "affirmations"
)]
pub async fn today_affirmation(
    State(db): State<Database>,
    State(settings): State<SiteSettings>,
    Query(query): Query<TodayQuery>,
) -> WebResult<Response> {
    let now = query.at.unwrap_or_else(|| Local::now().naive_local());

    let (effective_date, found) = services::affirmation_for(db.pool(), &settings, now).await?;
    let found = found.ok_or(WebError::NotFound)?;

    Ok(Json(TodayAffirmationResponse {
        effective_date,
        exact_match: found.exact_match,
        affirmation: AffirmationResponse::from(found.affirmation),
    })
    .into_response())
}

#[utoipa::path(
    get,
    path = "/api/affirmations/{affirmation_id}",
    params(
        ("affirmation_id" = Uuid, Path, description = "Affirmation id")
    ),
    responses(
        (status = 200, description = "Affirmation found", body = AffirmationResponse),
        (status = 404, description = "Affirmation not found")
    ),
    tag = "affirmations"
)]
pub async fn get_affirmation(
    State(db): State<Database>,
    Path(affirmation_id): Path<Uuid>,
) -> WebResult<Response> {
    let affirmation = services::get_affirmation(db.pool(), affirmation_id).await?;

    Ok(Json(AffirmationResponse::from(affirmation)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/affirmations",
    request_body = CreateAffirmationRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Affirmation created", body = AffirmationResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "affirmations"
)]
pub async fn create_affirmation(
    State(db): State<Database>,
    Extension(actor): Extension<Actor>,
    Json(req): Json<CreateAffirmationRequest>,
) -> WebResult<Response> {
    req.validate()?;

    let affirmation = services::create_affirmation(db.pool(), &req, &actor.id).await?;

    Ok((StatusCode::CREATED, Json(AffirmationResponse::from(affirmation))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/affirmations/{affirmation_id}",
    params(
        ("affirmation_id" = Uuid, Path, description = "Affirmation id")
    ),
    request_body = UpdateAffirmationRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Affirmation updated", body = AffirmationResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Affirmation not found")
    ),
    tag = "affirmations"
)]
pub async fn update_affirmation(
    State(db): State<Database>,
    Extension(actor): Extension<Actor>,
    Path(affirmation_id): Path<Uuid>,
    Json(req): Json<UpdateAffirmationRequest>,
) -> WebResult<Response> {
    req.validate()?;

    let affirmation =
        services::update_affirmation(db.pool(), affirmation_id, &req, &actor.id).await?;

    Ok(Json(AffirmationResponse::from(affirmation)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/affirmations/{affirmation_id}",
    params(
        ("affirmation_id" = Uuid, Path, description = "Affirmation id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Affirmation deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Affirmation not found")
    ),
    tag = "affirmations"
)]
pub async fn delete_affirmation(
    State(db): State<Database>,
    Extension(actor): Extension<Actor>,
    Path(affirmation_id): Path<Uuid>,
) -> WebResult<Response> {
    services::delete_affirmation(db.pool(), affirmation_id, &actor.id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
