use sqlx::PgPool;
use storage::{
    dto::{
        ranking::RecalculationSummary,
        semester::{CreateSemesterRequest, UpdateSemesterRequest},
    },
    error::{Result, StorageError},
    models::Semester,
    repository::semester::SemesterRepository,
    services::{Actor, recalculation},
    store::PgStore,
};
use uuid::Uuid;

/// List all semesters, newest first
pub async fn list_semesters(pool: &PgPool) -> Result<Vec<Semester>> {
    let mut conn = pool.acquire().await?;
    SemesterRepository::new(&mut conn).list().await
}

/// Resolve the semester shown by default
pub async fn current_semester(pool: &PgPool) -> Result<Semester> {
    let mut conn = pool.acquire().await?;
    SemesterRepository::new(&mut conn)
        .current()
        .await?
        .ok_or(StorageError::NotFound)
}

/// Create a semester
pub async fn create_semester(
    pool: &PgPool,
    actor: &Actor,
    request: &CreateSemesterRequest,
) -> Result<Semester> {
    let mut store = PgStore::begin(pool).await?;
    let semester = recalculation::create_semester(&mut store, actor, request).await?;
    store.commit().await?;
    Ok(semester)
}

/// Rename or (de)activate a semester
pub async fn update_semester(
    pool: &PgPool,
    actor: &Actor,
    semester_id: Uuid,
    request: &UpdateSemesterRequest,
) -> Result<Semester> {
    let mut store = PgStore::begin(pool).await?;
    let semester =
        recalculation::update_semester(&mut store, actor, semester_id, request).await?;
    store.commit().await?;
    Ok(semester)
}

/// Rebuild every ranking of a semester
pub async fn recalculate_semester(
    pool: &PgPool,
    actor: &Actor,
    semester_id: Uuid,
) -> Result<RecalculationSummary> {
    let mut store = PgStore::begin(pool).await?;
    let summary = recalculation::recalculate_semester(&mut store, actor, semester_id).await?;
    store.commit().await?;
    Ok(summary)
}
