use sqlx::{PgConnection, QueryBuilder};
use uuid::Uuid;

use crate::dto::event::{CreateEventRequest, EventFilter};
use crate::error::{Result, StorageError};
use crate::models::Event;

const EVENT_COLUMNS: &str = "event_id, club_id, semester_id, name, event_date, \
     expected_turnout, actual_turnout, planning_score, execution_score, \
     documentation_score, innovation_score, turnout_score, created_at";

/// Repository for Event database operations
pub struct EventRepository<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> EventRepository<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }

    /// List events, optionally narrowed to a club and/or semester
    pub async fn list(&mut self, filter: &EventFilter) -> Result<Vec<Event>> {
        let mut query = QueryBuilder::new(format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE 1=1"
        ));

        if let Some(club_id) = filter.club_id {
            query.push(" AND club_id = ");
            query.push_bind(club_id);
        }

        if let Some(semester_id) = filter.semester_id {
            query.push(" AND semester_id = ");
            query.push_bind(semester_id);
        }

        query.push(" ORDER BY event_date, created_at");

        let events = query
            .build_query_as::<Event>()
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(events)
    }

    /// Every event a club ran in a semester
    pub async fn list_for(&mut self, club_id: Uuid, semester_id: Uuid) -> Result<Vec<Event>> {
        self.list(&EventFilter {
            club_id: Some(club_id),
            semester_id: Some(semester_id),
        })
        .await
    }

    pub async fn find_by_id(&mut self, event_id: Uuid) -> Result<Event> {
        self.find_optional(event_id)
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn find_optional(&mut self, event_id: Uuid) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE event_id = $1"
        ))
        .bind(event_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(event)
    }

    /// Row-locking read for use inside a write transaction
    pub(crate) async fn find_for_update(&mut self, event_id: Uuid) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE event_id = $1 FOR UPDATE"
        ))
        .bind(event_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(event)
    }

    pub(crate) async fn create(&mut self, req: &CreateEventRequest) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (
                club_id, semester_id, name, event_date, expected_turnout, actual_turnout,
                planning_score, execution_score, documentation_score, innovation_score,
                turnout_score
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(req.club_id)
        .bind(req.semester_id)
        .bind(&req.name)
        .bind(req.event_date)
        .bind(req.expected_turnout)
        .bind(req.actual_turnout)
        .bind(req.planning_score)
        .bind(req.execution_score)
        .bind(req.documentation_score)
        .bind(req.innovation_score)
        .bind(req.turnout_score)
        .fetch_one(&mut *self.conn)
        .await
        .map_err(|e| StorageError::from(e).on_foreign_key_violation())?;

        Ok(event)
    }

    pub(crate) async fn update(&mut self, event_id: Uuid, req: &CreateEventRequest) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET club_id = $2,
                semester_id = $3,
                name = $4,
                event_date = $5,
                expected_turnout = $6,
                actual_turnout = $7,
                planning_score = $8,
                execution_score = $9,
                documentation_score = $10,
                innovation_score = $11,
                turnout_score = $12
            WHERE event_id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(event_id)
        .bind(req.club_id)
        .bind(req.semester_id)
        .bind(&req.name)
        .bind(req.event_date)
        .bind(req.expected_turnout)
        .bind(req.actual_turnout)
        .bind(req.planning_score)
        .bind(req.execution_score)
        .bind(req.documentation_score)
        .bind(req.innovation_score)
        .bind(req.turnout_score)
        .fetch_optional(&mut *self.conn)
        .await
        .map_err(|e| StorageError::from(e).on_foreign_key_violation())?
        .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    pub(crate) async fn delete(&mut self, event_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM events WHERE event_id = $1")
            .bind(event_id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
