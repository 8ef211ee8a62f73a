//! Transactional view of the entity store used by the recalculation pipeline.
//!
//! Every method on a [`Store`] runs inside the same unit of work; nothing is
//! visible to other callers until the owner commits. The PostgreSQL
//! implementation wraps one `sqlx` transaction.

use async_trait::async_trait;
use uuid::Uuid;

use crate::dto::club::CreateClubRequest;
use crate::dto::event::CreateEventRequest;
use crate::dto::semester::CreateSemesterRequest;
use crate::error::Result;
use crate::models::{AuditLog, Club, Event, Ranking, Semester};
use crate::services::audit::NewAuditEntry;
use crate::services::performance::PerformanceSummary;
use crate::services::rank_assigner::RankCandidate;

#[cfg(test)]
pub(crate) mod memory;
pub mod postgres;

pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send {
    /// Blocks other units of work on the same semester until this one ends.
    /// Semester locks are always taken before any row lock.
    async fn lock_semester(&mut self, semester_id: Uuid) -> Result<()>;

    async fn find_semester(&mut self, semester_id: Uuid) -> Result<Option<Semester>>;
    async fn find_semester_by_name(&mut self, name: &str) -> Result<Option<Semester>>;
    async fn insert_semester(&mut self, fields: &CreateSemesterRequest) -> Result<Semester>;
    async fn update_semester(
        &mut self,
        semester_id: Uuid,
        fields: &CreateSemesterRequest,
    ) -> Result<Semester>;

    async fn find_club(&mut self, club_id: Uuid) -> Result<Option<Club>>;
    /// Row-locks the club. Inserts referencing it wait until this unit ends.
    async fn lock_club(&mut self, club_id: Uuid) -> Result<Option<Club>>;
    /// Another club (not `exclude`) already using `name` or `short_code`.
    async fn find_club_conflict(
        &mut self,
        name: &str,
        short_code: &str,
        exclude: Option<Uuid>,
    ) -> Result<Option<Club>>;
    async fn insert_club(&mut self, fields: &CreateClubRequest) -> Result<Club>;
    async fn update_club(&mut self, club_id: Uuid, fields: &CreateClubRequest) -> Result<Club>;
    /// Cascades to the club's events and rankings.
    async fn delete_club(&mut self, club_id: Uuid) -> Result<()>;
    async fn club_ranked_semesters(&mut self, club_id: Uuid) -> Result<Vec<Uuid>>;
    async fn clubs_with_events(&mut self, semester_id: Uuid) -> Result<Vec<Club>>;

    async fn find_event(&mut self, event_id: Uuid) -> Result<Option<Event>>;
    /// Row-locking read. Callers hold the event's semester lock first.
    async fn lock_event(&mut self, event_id: Uuid) -> Result<Option<Event>>;
    async fn insert_event(&mut self, fields: &CreateEventRequest) -> Result<Event>;
    async fn update_event(&mut self, event_id: Uuid, fields: &CreateEventRequest) -> Result<Event>;
    async fn delete_event(&mut self, event_id: Uuid) -> Result<()>;
    async fn events_for(&mut self, club_id: Uuid, semester_id: Uuid) -> Result<Vec<Event>>;

    /// Writes every projected field except `rank`.
    async fn upsert_ranking(
        &mut self,
        club_id: Uuid,
        semester_id: Uuid,
        summary: &PerformanceSummary,
    ) -> Result<Ranking>;
    /// Returns whether a row was removed.
    async fn delete_ranking(&mut self, club_id: Uuid, semester_id: Uuid) -> Result<bool>;
    async fn rank_candidates(&mut self, semester_id: Uuid) -> Result<Vec<RankCandidate>>;
    async fn set_rank(&mut self, ranking_id: Uuid, rank: Option<i32>) -> Result<()>;

    async fn append_audit(&mut self, entry: &NewAuditEntry) -> Result<AuditLog>;
}
