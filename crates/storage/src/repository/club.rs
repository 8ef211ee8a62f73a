use sqlx::PgConnection;
use uuid::Uuid;

use crate::dto::club::CreateClubRequest;
use crate::error::{Result, StorageError};
use crate::models::Club;

const CLUB_COLUMNS: &str =
    "club_id, name, short_code, faculty_incharge, student_lead, contact_details, created_at";

const DUPLICATE_CLUB: &str = "Club name or short code already exists";

/// Repository for Club database operations
pub struct ClubRepository<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> ClubRepository<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }

    /// List all clubs by name
    pub async fn list(&mut self) -> Result<Vec<Club>> {
        let clubs = sqlx::query_as::<_, Club>(&format!(
            "SELECT {CLUB_COLUMNS} FROM clubs ORDER BY name"
        ))
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(clubs)
    }

    pub async fn find_by_id(&mut self, club_id: Uuid) -> Result<Club> {
        self.find_optional(club_id)
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn find_optional(&mut self, club_id: Uuid) -> Result<Option<Club>> {
        let club = sqlx::query_as::<_, Club>(&format!(
            "SELECT {CLUB_COLUMNS} FROM clubs WHERE club_id = $1"
        ))
        .bind(club_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(club)
    }

    /// Row-locking read for use inside a write transaction
    pub(crate) async fn find_for_update(&mut self, club_id: Uuid) -> Result<Option<Club>> {
        let club = sqlx::query_as::<_, Club>(&format!(
            "SELECT {CLUB_COLUMNS} FROM clubs WHERE club_id = $1 FOR UPDATE"
        ))
        .bind(club_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(club)
    }

    /// Another club already holding `name` or `short_code`, if any
    pub async fn find_conflict(
        &mut self,
        name: &str,
        short_code: &str,
        exclude: Option<Uuid>,
    ) -> Result<Option<Club>> {
        let club = sqlx::query_as::<_, Club>(&format!(
            r#"
            SELECT {CLUB_COLUMNS}
            FROM clubs
            WHERE (name = $1 OR short_code = $2)
              AND ($3::uuid IS NULL OR club_id <> $3)
            LIMIT 1
            "#
        ))
        .bind(name)
        .bind(short_code)
        .bind(exclude)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(club)
    }

    /// Clubs with at least one event in the semester
    pub async fn with_events_in(&mut self, semester_id: Uuid) -> Result<Vec<Club>> {
        let clubs = sqlx::query_as::<_, Club>(
            r#"
            SELECT c.club_id, c.name, c.short_code, c.faculty_incharge, c.student_lead,
                   c.contact_details, c.created_at
            FROM clubs c
            WHERE EXISTS (
                SELECT 1 FROM events e
                WHERE e.club_id = c.club_id AND e.semester_id = $1
            )
            ORDER BY c.name
            "#,
        )
        .bind(semester_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(clubs)
    }

    /// Semesters in which the club currently holds a ranking
    pub async fn ranked_semesters(&mut self, club_id: Uuid) -> Result<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT semester_id FROM rankings WHERE club_id = $1 ORDER BY semester_id",
        )
        .bind(club_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(ids)
    }

    pub(crate) async fn create(&mut self, req: &CreateClubRequest) -> Result<Club> {
        let club = sqlx::query_as::<_, Club>(&format!(
            r#"
            INSERT INTO clubs (name, short_code, faculty_incharge, student_lead, contact_details)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CLUB_COLUMNS}
            "#
        ))
        .bind(&req.name)
        .bind(&req.short_code)
        .bind(&req.faculty_incharge)
        .bind(&req.student_lead)
        .bind(&req.contact_details)
        .fetch_one(&mut *self.conn)
        .await
        .map_err(|e| StorageError::from(e).on_unique_violation(DUPLICATE_CLUB))?;

        Ok(club)
    }

    pub(crate) async fn update(&mut self, club_id: Uuid, req: &CreateClubRequest) -> Result<Club> {
        let club = sqlx::query_as::<_, Club>(&format!(
            r#"
            UPDATE clubs
            SET name = $2,
                short_code = $3,
                faculty_incharge = $4,
                student_lead = $5,
                contact_details = $6
            WHERE club_id = $1
            RETURNING {CLUB_COLUMNS}
            "#
        ))
        .bind(club_id)
        .bind(&req.name)
        .bind(&req.short_code)
        .bind(&req.faculty_incharge)
        .bind(&req.student_lead)
        .bind(&req.contact_details)
        .fetch_optional(&mut *self.conn)
        .await
        .map_err(|e| StorageError::from(e).on_unique_violation(DUPLICATE_CLUB))?
        .ok_or(StorageError::NotFound)?;

        Ok(club)
    }

    /// Delete a club; events and rankings go with it through ON DELETE CASCADE
    pub(crate) async fn delete(&mut self, club_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM clubs WHERE club_id = $1")
            .bind(club_id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
