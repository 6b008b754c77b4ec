use sqlx::PgPool;
use school_storage::{
    dto::leaderboard::LeaderboardResponse,
    error::Result,
    models::{AcademicYear, PointCategory},
    repository::leaderboard::LeaderboardRepository,
};

/// House standings for one academic year
pub async fn get_leaderboard(
    pool: &PgPool,
    academic_year: AcademicYear,
    category: Option<PointCategory>,
) -> Result<LeaderboardResponse> {
    let repo = LeaderboardRepository::new(pool);
    let standings = repo.standings(academic_year, category).await?;

    Ok(LeaderboardResponse {
        academic_year: academic_year.to_string(),
        category,
        standings,
    })
}
