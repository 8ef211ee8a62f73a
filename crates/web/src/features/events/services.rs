use sqlx::PgPool;
use storage::{
    dto::event::{CreateEventRequest, EventFilter, UpdateEventRequest},
    error::Result,
    models::Event,
    repository::event::EventRepository,
    services::{Actor, recalculation},
    store::PgStore,
};
use uuid::Uuid;

/// List events, optionally narrowed to a club and/or semester
pub async fn list_events(pool: &PgPool, filter: &EventFilter) -> Result<Vec<Event>> {
    let mut conn = pool.acquire().await?;
    EventRepository::new(&mut conn).list(filter).await
}

/// Get event by id
pub async fn get_event(pool: &PgPool, event_id: Uuid) -> Result<Event> {
    let mut conn = pool.acquire().await?;
    EventRepository::new(&mut conn).find_by_id(event_id).await
}

/// Record an event and refresh the club's standing
pub async fn create_event(
    pool: &PgPool,
    actor: &Actor,
    request: &CreateEventRequest,
) -> Result<Event> {
    let mut store = PgStore::begin(pool).await?;
    let event = recalculation::create_event(&mut store, actor, request).await?;
    store.commit().await?;
    Ok(event)
}

/// Update an event and refresh every standing it touches
pub async fn update_event(
    pool: &PgPool,
    actor: &Actor,
    event_id: Uuid,
    request: &UpdateEventRequest,
) -> Result<Event> {
    let mut store = PgStore::begin(pool).await?;
    let event = recalculation::update_event(&mut store, actor, event_id, request).await?;
    store.commit().await?;
    Ok(event)
}

/// Delete an event and refresh the club's standing
pub async fn delete_event(pool: &PgPool, actor: &Actor, event_id: Uuid) -> Result<()> {
    let mut store = PgStore::begin(pool).await?;
    recalculation::delete_event(&mut store, actor, event_id).await?;
    store.commit().await
}
