use anyhow::Context;
use axum::Router;
use school_storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;
mod routes;
mod state;

use config::Config;
use features::{affirmations, houses, leaderboard, points};
use middleware::auth::ApiKeys;
use state::{AppState, SiteSettings};

#[derive(OpenApi)]
#[openapi(
    paths(
        houses::handlers::list_houses,
        houses::handlers::get_house,
        houses::handlers::list_house_points,
        houses::handlers::create_house,
        houses::handlers::update_house,
        houses::handlers::delete_house,
        points::handlers::list_points,
        points::handlers::get_point_entry,
        points::handlers::award_points,
        points::handlers::revoke_points,
        leaderboard::handlers::get_leaderboard,
        affirmations::handlers::list_affirmations,
        affirmations::handlers::today_affirmation,
        affirmations::handlers::get_affirmation,
        affirmations::handlers::create_affirmation,
        affirmations::handlers::update_affirmation,
        affirmations::handlers::delete_affirmation,
    ),
    components(
        schemas(
            school_storage::dto::house::CreateHouseRequest,
            school_storage::dto::house::UpdateHouseRequest,
            school_storage::dto::house::HouseResponse,
            school_storage::dto::points::AwardPointsRequest,
            school_storage::dto::points::PointEntryResponse,
            school_storage::dto::points::HouseSummary,
            school_storage::dto::leaderboard::LeaderboardResponse,
            school_storage::dto::leaderboard::LeaderboardStanding,
            school_storage::dto::leaderboard::CategoryTotals,
            school_storage::dto::affirmation::CreateAffirmationRequest,
            school_storage::dto::affirmation::UpdateAffirmationRequest,
            school_storage::dto::affirmation::AffirmationResponse,
            school_storage::dto::affirmation::TodayAffirmationResponse,
            school_storage::dto::common::PaginationMeta,
            school_storage::models::PointCategory,
        )
    ),
    tags(
        (name = "houses", description = "Houses and their ledger entries"),
        (name = "points", description = "House points ledger"),
        (name = "leaderboard", description = "House standings"),
        (name = "affirmations", description = "Daily affirmations"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting school site API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!(
        change_time = %config.affirmation_change_time,
        academic_year_start_month = config.academic_year_start_month,
        "Configuration loaded successfully"
    );

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    if api_keys.is_empty() {
        tracing::warn!("API_KEYS is empty; admin routes will reject every request");
    }

    let state = AppState {
        db,
        settings: SiteSettings {
            affirmation_change_time: config.affirmation_change_time,
            academic_year_start_month: config.academic_year_start_month,
        },
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", routes::api_routes(api_keys))
        .layer(cors)
        .with_state(state);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_documents_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/api/houses",
            "/api/houses/{slug}",
            "/api/houses/{slug}/points",
            "/api/points",
            "/api/points/{entry_id}",
            "/api/leaderboard",
            "/api/affirmations",
            "/api/affirmations/today",
            "/api/affirmations/{affirmation_id}",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
