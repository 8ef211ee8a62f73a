use axum::Router;
use storage::Database;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::features::{audit, clubs, events, rankings, semesters};
use crate::middleware::auth::ApiKeys;
use crate::openapi::ApiDoc;

pub fn router(db: Database, api_keys: ApiKeys) -> Router {
    let api = Router::new()
        .nest("/semesters", semesters::routes::routes(api_keys.clone()))
        .nest("/rankings", rankings::routes::routes())
        .nest("/clubs", clubs::routes::routes(api_keys.clone()))
        .nest("/events", events::routes::routes(api_keys.clone()))
        .nest("/audit-logs", audit::routes::routes(api_keys));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(db)
}
