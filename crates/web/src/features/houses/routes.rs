use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use super::handlers::{
    create_house, delete_house, get_house, list_house_points, list_houses, update_house,
};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_house))
        .route("/:slug", put(update_house))
        .route("/:slug", delete(delete_house))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_houses))
        .route("/:slug", get(get_house))
        .route("/:slug/points", get(list_house_points))
        .merge(protected)
}
