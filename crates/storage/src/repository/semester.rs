use sqlx::PgConnection;
use uuid::Uuid;

use crate::dto::semester::CreateSemesterRequest;
use crate::error::{Result, StorageError};
use crate::models::Semester;

const SEMESTER_COLUMNS: &str = "semester_id, name, is_active, created_at";

/// Repository for Semester database operations
pub struct SemesterRepository<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> SemesterRepository<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }

    /// List all semesters, newest first
    pub async fn list(&mut self) -> Result<Vec<Semester>> {
        let semesters = sqlx::query_as::<_, Semester>(&format!(
            "SELECT {SEMESTER_COLUMNS} FROM semesters ORDER BY created_at DESC, name"
        ))
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(semesters)
    }

    pub async fn find_by_id(&mut self, semester_id: Uuid) -> Result<Semester> {
        self.find_optional(semester_id)
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn find_optional(&mut self, semester_id: Uuid) -> Result<Option<Semester>> {
        let semester = sqlx::query_as::<_, Semester>(&format!(
            "SELECT {SEMESTER_COLUMNS} FROM semesters WHERE semester_id = $1"
        ))
        .bind(semester_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(semester)
    }

    pub async fn find_by_name(&mut self, name: &str) -> Result<Option<Semester>> {
        let semester = sqlx::query_as::<_, Semester>(&format!(
            "SELECT {SEMESTER_COLUMNS} FROM semesters WHERE name = $1"
        ))
        .bind(name)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(semester)
    }

    /// The earliest-created active semester, falling back to the most recently
    /// created one when none is active
    pub async fn current(&mut self) -> Result<Option<Semester>> {
        let semester = sqlx::query_as::<_, Semester>(&format!(
            r#"
            SELECT {SEMESTER_COLUMNS}
            FROM semesters
            ORDER BY is_active DESC,
                     CASE WHEN is_active THEN created_at END ASC,
                     created_at DESC
            LIMIT 1
            "#
        ))
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(semester)
    }

    pub(crate) async fn create(&mut self, req: &CreateSemesterRequest) -> Result<Semester> {
        let semester = sqlx::query_as::<_, Semester>(&format!(
            r#"
            INSERT INTO semesters (name, is_active)
            VALUES ($1, $2)
            RETURNING {SEMESTER_COLUMNS}
            "#
        ))
        .bind(&req.name)
        .bind(req.is_active)
        .fetch_one(&mut *self.conn)
        .await
        .map_err(|e| StorageError::from(e).on_unique_violation("Semester name already exists"))?;

        Ok(semester)
    }

    pub(crate) async fn update(
        &mut self,
        semester_id: Uuid,
        req: &CreateSemesterRequest,
    ) -> Result<Semester> {
        let semester = sqlx::query_as::<_, Semester>(&format!(
            r#"
            UPDATE semesters
            SET name = $2, is_active = $3
            WHERE semester_id = $1
            RETURNING {SEMESTER_COLUMNS}
            "#
        ))
        .bind(semester_id)
        .bind(&req.name)
        .bind(req.is_active)
        .fetch_optional(&mut *self.conn)
        .await
        .map_err(|e| StorageError::from(e).on_unique_violation("Semester name already exists"))?
        .ok_or(StorageError::NotFound)?;

        Ok(semester)
    }
}
