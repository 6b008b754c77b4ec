use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use school_storage::{
    Database,
    dto::{
        common::PaginatedResponse,
        points::{AwardPointsRequest, PointEntryFilter, PointEntryResponse},
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebResult;
use crate::middleware::auth::Actor;
use crate::state::SiteSettings;

use super::services;

#[utoipa::path(
    get,
    path = "/api/points",
    params(PointEntryFilter),
    responses(
        (status = 200, description = "Ledger entries, newest event first", body = PaginatedResponse<PointEntryResponse>),
        (status = 400, description = "Invalid query parameters"),
        (status = 404, description = "House not found")
    ),
    tag = "points"
)]
pub async fn list_points(
    State(db): State<Database>,
    State(settings): State<SiteSettings>,
    Query(filter): Query<PointEntryFilter>,
) -> WebResult<Response> {
    let query = services::resolve_ledger_query(db.pool(), &settings, &filter, None).await?;
    let (entries, total_items) = services::list_points(db.pool(), &query).await?;

    Ok(Json(PaginatedResponse::new(entries, query.pagination, total_items)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/points/{entry_id}",
    params(
        ("entry_id" = Uuid, Path, description = "Ledger entry id")
    ),
    responses(
        (status = 200, description = "Ledger entry found", body = PointEntryResponse),
        (status = 404, description = "Ledger entry not found")
    ),
    tag = "points"
)]
pub async fn get_point_entry(
    State(db): State<Database>,
    Path(entry_id): Path<Uuid>,
) -> WebResult<Response> {
    let entry = services::get_point_entry(db.pool(), entry_id).await?;

    Ok(Json(entry).into_response())
}

#[utoipa::path(
    post,
    path = "/api/points",
    request_body = AwardPointsRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Points awarded", body = PointEntryResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "House does not exist")
    ),
    tag = "points"
)]
pub async fn award_points(
    State(db): State<Database>,
    Extension(actor): Extension<Actor>,
    Json(req): Json<AwardPointsRequest>,
) -> WebResult<Response> {
    req.validate()?;

    let entry = services::award_points(db.pool(), &req, &actor.id).await?;

    Ok((StatusCode::CREATED, Json(entry)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/points/{entry_id}",
    params(
        ("entry_id" = Uuid, Path, description = "Ledger entry id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Entry revoked; house totals drop its points"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Ledger entry not found")
    ),
    tag = "points"
)]
pub async fn revoke_points(
    State(db): State<Database>,
    Extension(actor): Extension<Actor>,
    Path(entry_id): Path<Uuid>,
) -> WebResult<Response> {
    services::revoke_points(db.pool(), entry_id, &actor.id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
