use sqlx::PgPool;
use storage::{
    dto::ranking::SemesterRankingResponse,
    error::{Result, StorageError},
    models::Semester,
    repository::{ranking::RankingRepository, semester::SemesterRepository},
    services::export,
};
use uuid::Uuid;

/// Leaderboard for a semester, defaulting to the current one
pub async fn semester_rankings(
    pool: &PgPool,
    semester_id: Option<Uuid>,
) -> Result<SemesterRankingResponse> {
    let mut conn = pool.acquire().await?;

    let semester = match semester_id {
        Some(id) => SemesterRepository::new(&mut conn).find_by_id(id).await?,
        None => SemesterRepository::new(&mut conn)
            .current()
            .await?
            .ok_or(StorageError::NotFound)?,
    };

    let rankings = RankingRepository::new(&mut conn)
        .for_semester(semester.semester_id)
        .await?;

    Ok(SemesterRankingResponse { semester, rankings })
}

/// CSV rendering of a semester's leaderboard
pub async fn export_rankings(pool: &PgPool, semester_id: Uuid) -> Result<(Semester, Vec<u8>)> {
    let SemesterRankingResponse { semester, rankings } =
        semester_rankings(pool, Some(semester_id)).await?;

    let csv = export::rankings_csv(&rankings)?;

    Ok((semester, csv))
}
