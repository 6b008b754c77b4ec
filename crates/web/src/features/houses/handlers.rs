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
        house::{CreateHouseRequest, HouseListQuery, HouseResponse, UpdateHouseRequest},
        points::{PointEntryFilter, PointEntryResponse},
    },
};
use validator::Validate;

use crate::error::WebResult;
use crate::features::points::services as points;
use crate::middleware::auth::Actor;
use crate::state::SiteSettings;

use super::services;

#[utoipa::path(
    get,
    path = "/api/houses",
    params(HouseListQuery),
    responses(
        (status = 200, description = "Houses in display order", body = Vec<HouseResponse>)
    ),
    tag = "houses"
)]
pub async fn list_houses(
    State(db): State<Database>,
    Query(query): Query<HouseListQuery>,
) -> WebResult<Json<Vec<HouseResponse>>> {
    let houses = services::list_houses(db.pool(), query.include_inactive).await?;

    let response: Vec<HouseResponse> = houses.into_iter().map(HouseResponse::from).collect();

    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/houses/{slug}",
    params(
        ("slug" = String, Path, description = "House slug")
    ),
    responses(
        (status = 200, description = "House found", body = HouseResponse),
        (status = 404, description = "House not found")
    ),
    tag = "houses"
)]
pub async fn get_house(
    State(db): State<Database>,
    Path(slug): Path<String>,
) -> WebResult<Response> {
    let house = services::get_house_by_slug(db.pool(), &slug).await?;

    Ok(Json(HouseResponse::from(house)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/houses/{slug}/points",
    params(
        ("slug" = String, Path, description = "House slug"),
        PointEntryFilter
    ),
    responses(
        (status = 200, description = "Ledger entries of the house", body = PaginatedResponse<PointEntryResponse>),
        (status = 400, description = "Invalid query parameters"),
        (status = 404, description = "House not found")
    ),
    tag = "houses"
)]
pub async fn list_house_points(
    State(db): State<Database>,
    State(settings): State<SiteSettings>,
    Path(slug): Path<String>,
    Query(filter): Query<PointEntryFilter>,
) -> WebResult<Response> {
    let house = services::get_house_by_slug(db.pool(), &slug).await?;

    let query =
        points::resolve_ledger_query(db.pool(), &settings, &filter, Some(house.house_id)).await?;
    let (entries, total_items) = points::list_points(db.pool(), &query).await?;

    Ok(Json(PaginatedResponse::new(entries, query.pagination, total_items)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/houses",
    request_body = CreateHouseRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "House created successfully", body = HouseResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "House name already exists")
    ),
    tag = "houses"
)]
pub async fn create_house(
    State(db): State<Database>,
    Extension(actor): Extension<Actor>,
    Json(req): Json<CreateHouseRequest>,
) -> WebResult<Response> {
    req.validate()?;

    let house = services::create_house(db.pool(), &req, &actor.id).await?;

    Ok((StatusCode::CREATED, Json(HouseResponse::from(house))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/houses/{slug}",
    params(
        ("slug" = String, Path, description = "House slug")
    ),
    request_body = UpdateHouseRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "House updated successfully", body = HouseResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "House not found"),
        (status = 409, description = "House name already exists")
    ),
    tag = "houses"
)]
pub async fn update_house(
    State(db): State<Database>,
    Extension(actor): Extension<Actor>,
    Path(slug): Path<String>,
    Json(update_req): Json<UpdateHouseRequest>,
) -> WebResult<Response> {
    update_req.validate()?;

    let updated = services::update_house(db.pool(), &slug, &update_req, &actor.id).await?;

    Ok(Json(HouseResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/houses/{slug}",
    params(
        ("slug" = String, Path, description = "House slug")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "House deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "House not found"),
        (status = 409, description = "House still has point entries")
    ),
    tag = "houses"
)]
pub async fn delete_house(
    State(db): State<Database>,
    Extension(actor): Extension<Actor>,
    Path(slug): Path<String>,
) -> WebResult<Response> {
    services::delete_house(db.pool(), &slug, &actor.id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
