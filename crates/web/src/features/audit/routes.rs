use axum::{Router, middleware, routing::get};
use storage::Database;

use super::handlers::list_audit_logs;
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    Router::new()
        .route("/", get(list_audit_logs))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
