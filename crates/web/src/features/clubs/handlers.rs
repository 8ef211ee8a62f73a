use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::club::{ClubDetailQuery, ClubDetailResponse, CreateClubRequest, UpdateClubRequest},
    models::Club,
    services::Actor,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/clubs",
    responses(
        (status = 200, description = "List all clubs successfully", body = Vec<Club>)
    ),
    tag = "clubs"
)]
pub async fn list_clubs(State(db): State<Database>) -> Result<Response, WebError> {
    let clubs = services::list_clubs(db.pool()).await?;

    Ok(Json(clubs).into_response())
}

#[utoipa::path(
    get,
    path = "/api/clubs/{club_id}",
    params(
        ("club_id" = Uuid, Path, description = "Club ID")
    ),
    responses(
        (status = 200, description = "Club found", body = Club),
        (status = 404, description = "Club not found")
    ),
    tag = "clubs"
)]
pub async fn get_club(
    State(db): State<Database>,
    Path(club_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let club = services::get_club(db.pool(), club_id).await?;

    Ok(Json(club).into_response())
}

#[utoipa::path(
    get,
    path = "/api/clubs/{club_id}/detail",
    params(
        ("club_id" = Uuid, Path, description = "Club ID"),
        ClubDetailQuery
    ),
    responses(
        (status = 200, description = "Club with its ranking and events for the semester", body = ClubDetailResponse),
        (status = 404, description = "Club or semester not found")
    ),
    tag = "clubs"
)]
pub async fn get_club_detail(
    State(db): State<Database>,
    Path(club_id): Path<Uuid>,
    Query(query): Query<ClubDetailQuery>,
) -> Result<Response, WebError> {
    let detail = services::get_club_detail(db.pool(), club_id, query.semester_id).await?;

    Ok(Json(detail).into_response())
}

#[utoipa::path(
    post,
    path = "/api/clubs",
    request_body = CreateClubRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Club created successfully", body = Club),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Club name or short code already exists")
    ),
    tag = "clubs"
)]
pub async fn create_club(
    State(db): State<Database>,
    Extension(actor): Extension<Actor>,
    Json(req): Json<CreateClubRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let club = services::create_club(db.pool(), &actor, &req).await?;

    Ok((StatusCode::CREATED, Json(club)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/clubs/{club_id}",
    params(
        ("club_id" = Uuid, Path, description = "Club ID")
    ),
    request_body = UpdateClubRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Club updated successfully", body = Club),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Club not found"),
        (status = 409, description = "Club name or short code already exists")
    ),
    tag = "clubs"
)]
pub async fn update_club(
    State(db): State<Database>,
    Extension(actor): Extension<Actor>,
    Path(club_id): Path<Uuid>,
    Json(update_req): Json<UpdateClubRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_club(db.pool(), &actor, club_id, &update_req).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/clubs/{club_id}",
    params(
        ("club_id" = Uuid, Path, description = "Club ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Club deleted with its events and rankings"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Club not found")
    ),
    tag = "clubs"
)]
pub async fn delete_club(
    State(db): State<Database>,
    Extension(actor): Extension<Actor>,
    Path(club_id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_club(db.pool(), &actor, club_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
