use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        ranking::RecalculationSummary,
        semester::{CreateSemesterRequest, UpdateSemesterRequest},
    },
    models::Semester,
    services::Actor,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/semesters",
    responses(
        (status = 200, description = "List all semesters successfully", body = Vec<Semester>)
    ),
    tag = "semesters"
)]
pub async fn list_semesters(State(db): State<Database>) -> Result<Response, WebError> {
    let semesters = services::list_semesters(db.pool()).await?;

    Ok(Json(semesters).into_response())
}

#[utoipa::path(
    get,
    path = "/api/semesters/current",
    responses(
        (status = 200, description = "First active semester, else the most recent one", body = Semester),
        (status = 404, description = "No semester exists yet")
    ),
    tag = "semesters"
)]
pub async fn get_current_semester(State(db): State<Database>) -> Result<Response, WebError> {
    let semester = services::current_semester(db.pool()).await?;

    Ok(Json(semester).into_response())
}

#[utoipa::path(
    post,
    path = "/api/semesters",
    request_body = CreateSemesterRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Semester created successfully", body = Semester),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Semester name already exists")
    ),
    tag = "semesters"
)]
pub async fn create_semester(
    State(db): State<Database>,
    Extension(actor): Extension<Actor>,
    Json(req): Json<CreateSemesterRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let semester = services::create_semester(db.pool(), &actor, &req).await?;

    Ok((StatusCode::CREATED, Json(semester)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/semesters/{semester_id}",
    params(
        ("semester_id" = Uuid, Path, description = "Semester ID")
    ),
    request_body = UpdateSemesterRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Semester updated successfully", body = Semester),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Semester not found"),
        (status = 409, description = "Semester name already exists")
    ),
    tag = "semesters"
)]
pub async fn update_semester(
    State(db): State<Database>,
    Extension(actor): Extension<Actor>,
    Path(semester_id): Path<Uuid>,
    Json(req): Json<UpdateSemesterRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let semester = services::update_semester(db.pool(), &actor, semester_id, &req).await?;

    Ok(Json(semester).into_response())
}

#[utoipa::path(
    post,
    path = "/api/semesters/{semester_id}/recalculate",
    params(
        ("semester_id" = Uuid, Path, description = "Semester ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Every club ranking in the semester rebuilt", body = RecalculationSummary),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Semester not found")
    ),
    tag = "semesters"
)]
pub async fn recalculate_semester(
    State(db): State<Database>,
    Extension(actor): Extension<Actor>,
    Path(semester_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let summary = services::recalculate_semester(db.pool(), &actor, semester_id).await?;

    Ok(Json(summary).into_response())
}
