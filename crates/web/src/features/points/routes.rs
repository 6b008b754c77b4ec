use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use super::handlers::{award_points, get_point_entry, list_points, revoke_points};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(award_points))
        .route("/:entry_id", delete(revoke_points))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_points))
        .route("/:entry_id", get(get_point_entry))
        .merge(protected)
}
