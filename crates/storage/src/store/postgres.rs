use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::Store;
use crate::dto::club::CreateClubRequest;
use crate::dto::event::CreateEventRequest;
use crate::dto::semester::CreateSemesterRequest;
use crate::error::Result;
use crate::models::{AuditLog, Club, Event, Ranking, Semester};
use crate::repository::audit_log::AuditLogRepository;
use crate::repository::club::ClubRepository;
use crate::repository::event::EventRepository;
use crate::repository::ranking::RankingRepository;
use crate::repository::semester::SemesterRepository;
use crate::services::audit::NewAuditEntry;
use crate::services::performance::PerformanceSummary;
use crate::services::rank_assigner::RankCandidate;

/// One PostgreSQL transaction. Dropping it without [`PgStore::commit`]
/// rolls every write back.
pub struct PgStore {
    tx: Transaction<'static, Postgres>,
}

impl PgStore {
    pub async fn begin(pool: &PgPool) -> Result<Self> {
        let tx = pool.begin().await?;
        Ok(Self { tx })
    }

    /// The open transaction, for reads that must see this unit's writes.
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut self.tx
    }

    pub async fn commit(self) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn lock_semester(&mut self, semester_id: Uuid) -> Result<()> {
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(semester_id.to_string())
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn find_semester(&mut self, semester_id: Uuid) -> Result<Option<Semester>> {
        SemesterRepository::new(&mut self.tx)
            .find_optional(semester_id)
            .await
    }

    async fn find_semester_by_name(&mut self, name: &str) -> Result<Option<Semester>> {
        SemesterRepository::new(&mut self.tx).find_by_name(name).await
    }

    async fn insert_semester(&mut self, fields: &CreateSemesterRequest) -> Result<Semester> {
        SemesterRepository::new(&mut self.tx).create(fields).await
    }

    async fn update_semester(
        &mut self,
        semester_id: Uuid,
        fields: &CreateSemesterRequest,
    ) -> Result<Semester> {
        SemesterRepository::new(&mut self.tx)
            .update(semester_id, fields)
            .await
    }

    async fn find_club(&mut self, club_id: Uuid) -> Result<Option<Club>> {
        ClubRepository::new(&mut self.tx).find_optional(club_id).await
    }

    async fn lock_club(&mut self, club_id: Uuid) -> Result<Option<Club>> {
        ClubRepository::new(&mut self.tx)
            .find_for_update(club_id)
            .await
    }

    async fn find_club_conflict(
        &mut self,
        name: &str,
        short_code: &str,
        exclude: Option<Uuid>,
    ) -> Result<Option<Club>> {
        ClubRepository::new(&mut self.tx)
            .find_conflict(name, short_code, exclude)
            .await
    }

    async fn insert_club(&mut self, fields: &CreateClubRequest) -> Result<Club> {
        ClubRepository::new(&mut self.tx).create(fields).await
    }

    async fn update_club(&mut self, club_id: Uuid, fields: &CreateClubRequest) -> Result<Club> {
        ClubRepository::new(&mut self.tx).update(club_id, fields).await
    }

    async fn delete_club(&mut self, club_id: Uuid) -> Result<()> {
        ClubRepository::new(&mut self.tx).delete(club_id).await
    }

    async fn club_ranked_semesters(&mut self, club_id: Uuid) -> Result<Vec<Uuid>> {
        ClubRepository::new(&mut self.tx)
            .ranked_semesters(club_id)
            .await
    }

    async fn clubs_with_events(&mut self, semester_id: Uuid) -> Result<Vec<Club>> {
        ClubRepository::new(&mut self.tx)
            .with_events_in(semester_id)
            .await
    }

    async fn find_event(&mut self, event_id: Uuid) -> Result<Option<Event>> {
        EventRepository::new(&mut self.tx)
            .find_optional(event_id)
            .await
    }

    async fn lock_event(&mut self, event_id: Uuid) -> Result<Option<Event>> {
        EventRepository::new(&mut self.tx)
            .find_for_update(event_id)
            .await
    }

    async fn insert_event(&mut self, fields: &CreateEventRequest) -> Result<Event> {
        EventRepository::new(&mut self.tx).create(fields).await
    }

    async fn update_event(&mut self, event_id: Uuid, fields: &CreateEventRequest) -> Result<Event> {
        EventRepository::new(&mut self.tx).update(event_id, fields).await
    }

    async fn delete_event(&mut self, event_id: Uuid) -> Result<()> {
        EventRepository::new(&mut self.tx).delete(event_id).await
    }

    async fn events_for(&mut self, club_id: Uuid, semester_id: Uuid) -> Result<Vec<Event>> {
        EventRepository::new(&mut self.tx)
            .list_for(club_id, semester_id)
            .await
    }

    async fn upsert_ranking(
        &mut self,
        club_id: Uuid,
        semester_id: Uuid,
        summary: &PerformanceSummary,
    ) -> Result<Ranking> {
        RankingRepository::new(&mut self.tx)
            .upsert(club_id, semester_id, summary)
            .await
    }

    async fn delete_ranking(&mut self, club_id: Uuid, semester_id: Uuid) -> Result<bool> {
        RankingRepository::new(&mut self.tx)
            .delete(club_id, semester_id)
            .await
    }

    async fn rank_candidates(&mut self, semester_id: Uuid) -> Result<Vec<RankCandidate>> {
        RankingRepository::new(&mut self.tx)
            .candidates(semester_id)
            .await
    }

    async fn set_rank(&mut self, ranking_id: Uuid, rank: Option<i32>) -> Result<()> {
        RankingRepository::new(&mut self.tx)
            .set_rank(ranking_id, rank)
            .await
    }

    async fn append_audit(&mut self, entry: &NewAuditEntry) -> Result<AuditLog> {
        AuditLogRepository::new(&mut self.tx).append(entry).await
    }
}
