use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{export_semester_rankings, get_semester_rankings};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(get_semester_rankings))
        .route("/export", get(export_semester_rankings))
}
