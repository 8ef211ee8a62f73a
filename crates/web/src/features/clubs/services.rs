use sqlx::PgPool;
use storage::{
    dto::club::{ClubDetailResponse, CreateClubRequest, UpdateClubRequest},
    error::Result,
    models::Club,
    repository::{
        club::ClubRepository, event::EventRepository, ranking::RankingRepository,
        semester::SemesterRepository,
    },
    services::{Actor, recalculation},
    store::PgStore,
};
use uuid::Uuid;

/// List all clubs
pub async fn list_clubs(pool: &PgPool) -> Result<Vec<Club>> {
    let mut conn = pool.acquire().await?;
    ClubRepository::new(&mut conn).list().await
}

/// Get club by id
pub async fn get_club(pool: &PgPool, club_id: Uuid) -> Result<Club> {
    let mut conn = pool.acquire().await?;
    ClubRepository::new(&mut conn).find_by_id(club_id).await
}

/// Club with its standing and events for one semester
pub async fn get_club_detail(
    pool: &PgPool,
    club_id: Uuid,
    semester_id: Option<Uuid>,
) -> Result<ClubDetailResponse> {
    let mut conn = pool.acquire().await?;

    let club = ClubRepository::new(&mut conn).find_by_id(club_id).await?;

    let semester = match semester_id {
        Some(id) => Some(SemesterRepository::new(&mut conn).find_by_id(id).await?),
        None => SemesterRepository::new(&mut conn).current().await?,
    };

    let Some(semester) = semester else {
        return Ok(ClubDetailResponse::new(club, None, None, Vec::new()));
    };

    let ranking = RankingRepository::new(&mut conn)
        .find(club_id, semester.semester_id)
        .await?;
    let events = EventRepository::new(&mut conn)
        .list_for(club_id, semester.semester_id)
        .await?;

    Ok(ClubDetailResponse::new(
        club,
        Some(semester),
        ranking,
        events,
    ))
}

/// Create a new club
pub async fn create_club(
    pool: &PgPool,
    actor: &Actor,
    request: &CreateClubRequest,
) -> Result<Club> {
    let mut store = PgStore::begin(pool).await?;
    let club = recalculation::create_club(&mut store, actor, request).await?;
    store.commit().await?;
    Ok(club)
}

/// Update a club
pub async fn update_club(
    pool: &PgPool,
    actor: &Actor,
    club_id: Uuid,
    request: &UpdateClubRequest,
) -> Result<Club> {
    let mut store = PgStore::begin(pool).await?;
    let club = recalculation::update_club(&mut store, actor, club_id, request).await?;
    store.commit().await?;
    Ok(club)
}

/// Delete a club along with its events and rankings
pub async fn delete_club(pool: &PgPool, actor: &Actor, club_id: Uuid) -> Result<()> {
    let mut store = PgStore::begin(pool).await?;
    recalculation::delete_club(&mut store, actor, club_id).await?;
    store.commit().await
}
