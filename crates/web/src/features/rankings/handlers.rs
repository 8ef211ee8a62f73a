use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::ranking::{RankingFilter, SemesterRankingResponse},
    services::export,
};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/rankings",
    params(RankingFilter),
    responses(
        (status = 200, description = "Semester leaderboard, ranked clubs first", body = SemesterRankingResponse),
        (status = 404, description = "Semester not found")
    ),
    tag = "rankings"
)]
pub async fn get_semester_rankings(
    State(db): State<Database>,
    Query(filter): Query<RankingFilter>,
) -> Result<Response, WebError> {
    let response = services::semester_rankings(db.pool(), filter.semester_id).await?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/rankings/export",
    params(RankingFilter),
    responses(
        (status = 200, description = "Leaderboard as CSV", content_type = "text/csv", body = String),
        (status = 400, description = "Semester not specified"),
        (status = 404, description = "Semester not found")
    ),
    tag = "rankings"
)]
pub async fn export_semester_rankings(
    State(db): State<Database>,
    Query(filter): Query<RankingFilter>,
) -> Result<Response, WebError> {
    let semester_id = filter
        .semester_id
        .ok_or_else(|| WebError::BadRequest("Semester not specified".to_string()))?;

    let (semester, csv) = services::export_rankings(db.pool(), semester_id).await?;
    tracing::info!(semester = %semester.name, bytes = csv.len(), "Rankings exported");

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}\"",
                export::export_filename(&semester.name)
            ),
        ),
    ];

    Ok((StatusCode::OK, headers, csv).into_response())
}
