use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use school_storage::{
    Database,
    dto::leaderboard::{LeaderboardFilter, LeaderboardResponse},
};

use crate::error::WebResult;
use crate::state::SiteSettings;

use super::services;

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    params(LeaderboardFilter),
    responses(
        (status = 200, description = "Houses ranked by summed points", body = LeaderboardResponse),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard(
    State(db): State<Database>,
    State(settings): State<SiteSettings>,
    Query(filter): Query<LeaderboardFilter>,
) -> WebResult<Response> {
    let academic_year = settings.academic_year_or_current(filter.academic_year.as_deref())?;

    let leaderboard = services::get_leaderboard(db.pool(), academic_year, filter.category).await?;

    Ok(Json(leaderboard).into_response())
}
