use axum::Router;

use crate::features::{affirmations, houses, leaderboard, points};
use crate::middleware::auth::ApiKeys;
use crate::state::AppState;

pub fn api_routes(api_keys: ApiKeys) -> Router<AppState> {
    Router::new()
        .nest("/houses", houses::routes::routes(api_keys.clone()))
        .nest("/points", points::routes::routes(api_keys.clone()))
        .nest("/leaderboard", leaderboard::routes::routes())
        .nest("/affirmations", affirmations::routes::routes(api_keys))
}
