use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use storage::Database;

use super::handlers::{
    create_semester, get_current_semester, list_semesters, recalculate_semester, update_semester,
};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_semester))
        .route("/:semester_id", put(update_semester))
        .route("/:semester_id/recalculate", post(recalculate_semester))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_semesters))
        .route("/current", get(get_current_semester))
        .merge(protected)
}
