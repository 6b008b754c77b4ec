use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use super::handlers::{
    create_affirmation, delete_affirmation, get_affirmation, list_affirmations,
    today_affirmation, update_affirmation,
};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_affirmation))
        .route("/:affirmation_id", put(update_affirmation))
        .route("/:affirmation_id", delete(delete_affirmation))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_affirmations))
        .route("/today", get(today_affirmation))
        .route("/:affirmation_id", get(get_affirmation))
        .merge(protected)
}
