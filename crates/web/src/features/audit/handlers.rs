use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{audit::AuditLogFilter, common::PaginatedResponse},
    models::AuditLog,
};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/audit-logs",
    params(AuditLogFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Audit entries retrieved successfully", body = PaginatedResponse<AuditLog>),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "audit"
)]
pub async fn list_audit_logs(
    State(db): State<Database>,
    Query(filter): Query<AuditLogFilter>,
) -> Result<Response, WebError> {
    filter.validate().map_err(WebError::BadRequest)?;

    let (entries, total_items) = services::list_audit_logs(db.pool(), &filter).await?;

    let response = PaginatedResponse::new(entries, filter.pagination(), total_items);

    Ok(Json(response).into_response())
}
