use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use storage::Database;

use super::handlers::{
    create_club, delete_club, get_club, get_club_detail, list_clubs, update_club,
};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_club))
        .route("/:club_id", put(update_club))
        .route("/:club_id", delete(delete_club))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_clubs))
        .route("/:club_id", get(get_club))
        .route("/:club_id/detail", get(get_club_detail))
        .merge(protected)
}
