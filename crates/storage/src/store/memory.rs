//! In-memory [`Store`] used by the pipeline tests.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::Store;
use crate::dto::club::CreateClubRequest;
use crate::dto::event::CreateEventRequest;
use crate::dto::semester::CreateSemesterRequest;
use crate::error::{Result, StorageError};
use crate::models::{AuditLog, Club, Event, Ranking, Semester};
use crate::services::audit::NewAuditEntry;
use crate::services::performance::PerformanceSummary;
use crate::services::rank_assigner::RankCandidate;

/// A lock taken through the store, in acquisition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lock {
    Semester(Uuid),
    Club(Uuid),
    Event(Uuid),
}

#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    pub semesters: Vec<Semester>,
    pub clubs: Vec<Club>,
    pub events: Vec<Event>,
    pub rankings: Vec<Ranking>,
    pub audit: Vec<AuditLog>,
    pub locks: Vec<Lock>,
    pub fail_audit: bool,
    /// Moves `(event, semester)` once the next semester lock is granted,
    /// as a writer committing while this unit waited would.
    pub pending_event_move: Option<(Uuid, Uuid)>,
    /// Inserted while the club row lock is being acquired.
    pub pending_ranking: Option<Ranking>,
}

impl MemoryStore {
    pub fn ranking(&self, club_id: Uuid, semester_id: Uuid) -> Option<&Ranking> {
        self.rankings
            .iter()
            .find(|r| r.club_id == club_id && r.semester_id == semester_id)
    }

    pub fn audit_actions(&self, action: &str) -> Vec<&AuditLog> {
        self.audit.iter().filter(|a| a.action == action).collect()
    }

    pub fn semester_locks(&self) -> Vec<Uuid> {
        self.locks
            .iter()
            .filter_map(|lock| match lock {
                Lock::Semester(id) => Some(*id),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn lock_semester(&mut self, semester_id: Uuid) -> Result<()> {
        self.locks.push(Lock::Semester(semester_id));
        if let Some((event_id, moved_to)) = self.pending_event_move.take() {
            if let Some(event) = self.events.iter_mut().find(|e| e.event_id == event_id) {
                event.semester_id = moved_to;
            }
        }
        Ok(())
    }

    async fn find_semester(&mut self, semester_id: Uuid) -> Result<Option<Semester>> {
        Ok(self
            .semesters
            .iter()
            .find(|s| s.semester_id == semester_id)
            .cloned())
    }

    async fn find_semester_by_name(&mut self, name: &str) -> Result<Option<Semester>> {
        Ok(self.semesters.iter().find(|s| s.name == name).cloned())
    }

    async fn insert_semester(&mut self, fields: &CreateSemesterRequest) -> Result<Semester> {
        if self.semesters.iter().any(|s| s.name == fields.name) {
            return Err(StorageError::ConstraintViolation(
                "Semester name already exists".to_string(),
            ));
        }
        let semester = Semester {
            semester_id: Uuid::new_v4(),
            name: fields.name.clone(),
            is_active: fields.is_active,
            created_at: Utc::now().naive_utc(),
        };
        self.semesters.push(semester.clone());
        Ok(semester)
    }

    async fn update_semester(
        &mut self,
        semester_id: Uuid,
        fields: &CreateSemesterRequest,
    ) -> Result<Semester> {
        let semester = self
            .semesters
            .iter_mut()
            .find(|s| s.semester_id == semester_id)
            .ok_or(StorageError::NotFound)?;
        semester.name = fields.name.clone();
        semester.is_active = fields.is_active;
        Ok(semester.clone())
    }

    async fn find_club(&mut self, club_id: Uuid) -> Result<Option<Club>> {
        Ok(self.clubs.iter().find(|c| c.club_id == club_id).cloned())
    }

    async fn lock_club(&mut self, club_id: Uuid) -> Result<Option<Club>> {
        if let Some(ranking) = self.pending_ranking.take() {
            self.rankings.push(ranking);
        }
        self.locks.push(Lock::Club(club_id));
        self.find_club(club_id).await
    }

    async fn find_club_conflict(
        &mut self,
        name: &str,
        short_code: &str,
        exclude: Option<Uuid>,
    ) -> Result<Option<Club>> {
        Ok(self
            .clubs
            .iter()
            .find(|c| {
                Some(c.club_id) != exclude && (c.name == name || c.short_code == short_code)
            })
            .cloned())
    }

    async fn insert_club(&mut self, fields: &CreateClubRequest) -> Result<Club> {
        let club = Club {
            club_id: Uuid::new_v4(),
            name: fields.name.clone(),
            short_code: fields.short_code.clone(),
            faculty_incharge: fields.faculty_incharge.clone(),
            student_lead: fields.student_lead.clone(),
            contact_details: fields.contact_details.clone(),
            created_at: Utc::now().naive_utc(),
        };
        self.clubs.push(club.clone());
        Ok(club)
    }

    async fn update_club(&mut self, club_id: Uuid, fields: &CreateClubRequest) -> Result<Club> {
        let club = self
            .clubs
            .iter_mut()
            .find(|c| c.club_id == club_id)
            .ok_or(StorageError::NotFound)?;
        club.name = fields.name.clone();
        club.short_code = fields.short_code.clone();
        club.faculty_incharge = fields.faculty_incharge.clone();
        club.student_lead = fields.student_lead.clone();
        club.contact_details = fields.contact_details.clone();
        Ok(club.clone())
    }

    async fn delete_club(&mut self, club_id: Uuid) -> Result<()> {
        let before = self.clubs.len();
        self.clubs.retain(|c| c.club_id != club_id);
        if self.clubs.len() == before {
            return Err(StorageError::NotFound);
        }
        self.events.retain(|e| e.club_id != club_id);
        self.rankings.retain(|r| r.club_id != club_id);
        Ok(())
    }

    async fn club_ranked_semesters(&mut self, club_id: Uuid) -> Result<Vec<Uuid>> {
        Ok(self
            .rankings
            .iter()
            .filter(|r| r.club_id == club_id)
            .map(|r| r.semester_id)
            .collect())
    }

    async fn clubs_with_events(&mut self, semester_id: Uuid) -> Result<Vec<Club>> {
        Ok(self
            .clubs
            .iter()
            .filter(|c| {
                self.events
                    .iter()
                    .any(|e| e.club_id == c.club_id && e.semester_id == semester_id)
            })
            .cloned()
            .collect())
    }

    async fn find_event(&mut self, event_id: Uuid) -> Result<Option<Event>> {
        Ok(self.events.iter().find(|e| e.event_id == event_id).cloned())
    }

    async fn lock_event(&mut self, event_id: Uuid) -> Result<Option<Event>> {
        self.locks.push(Lock::Event(event_id));
        self.find_event(event_id).await
    }

    async fn insert_event(&mut self, fields: &CreateEventRequest) -> Result<Event> {
        let event = Event {
            event_id: Uuid::new_v4(),
            club_id: fields.club_id,
            semester_id: fields.semester_id,
            name: fields.name.clone(),
            event_date: fields.event_date,
            expected_turnout: fields.expected_turnout,
            actual_turnout: fields.actual_turnout,
            planning_score: fields.planning_score,
            execution_score: fields.execution_score,
            documentation_score: fields.documentation_score,
            innovation_score: fields.innovation_score,
            turnout_score: fields.turnout_score,
            created_at: Utc::now().naive_utc(),
        };
        self.events.push(event.clone());
        Ok(event)
    }

    async fn update_event(&mut self, event_id: Uuid, fields: &CreateEventRequest) -> Result<Event> {
        let event = self
            .events
            .iter_mut()
            .find(|e| e.event_id == event_id)
            .ok_or(StorageError::NotFound)?;
        event.club_id = fields.club_id;
        event.semester_id = fields.semester_id;
        event.name = fields.name.clone();
        event.event_date = fields.event_date;
        event.expected_turnout = fields.expected_turnout;
        event.actual_turnout = fields.actual_turnout;
        event.planning_score = fields.planning_score;
        event.execution_score = fields.execution_score;
        event.documentation_score = fields.documentation_score;
        event.innovation_score = fields.innovation_score;
        event.turnout_score = fields.turnout_score;
        Ok(event.clone())
    }

    async fn delete_event(&mut self, event_id: Uuid) -> Result<()> {
        let before = self.events.len();
        self.events.retain(|e| e.event_id != event_id);
        if self.events.len() == before {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn events_for(&mut self, club_id: Uuid, semester_id: Uuid) -> Result<Vec<Event>> {
        Ok(self
            .events
            .iter()
            .filter(|e| e.club_id == club_id && e.semester_id == semester_id)
            .cloned()
            .collect())
    }

    async fn upsert_ranking(
        &mut self,
        club_id: Uuid,
        semester_id: Uuid,
        summary: &PerformanceSummary,
    ) -> Result<Ranking> {
        let position = self
            .rankings
            .iter()
            .position(|r| r.club_id == club_id && r.semester_id == semester_id);

        let (ranking_id, rank) = match position {
            Some(i) => (self.rankings[i].ranking_id, self.rankings[i].rank),
            None => (Uuid::new_v4(), None),
        };

        let ranking = Ranking {
            ranking_id,
            club_id,
            semester_id,
            cps: summary.cps,
            tier: summary.tier,
            rank,
            event_count: summary.event_count,
            avg_planning: summary.averages.planning,
            avg_execution: summary.averages.execution,
            avg_documentation: summary.averages.documentation,
            avg_innovation: summary.averages.innovation,
            avg_turnout: summary.averages.turnout,
        };

        match position {
            Some(i) => self.rankings[i] = ranking.clone(),
            None => self.rankings.push(ranking.clone()),
        }
        Ok(ranking)
    }

    async fn delete_ranking(&mut self, club_id: Uuid, semester_id: Uuid) -> Result<bool> {
        let before = self.rankings.len();
        self.rankings
            .retain(|r| !(r.club_id == club_id && r.semester_id == semester_id));
        Ok(self.rankings.len() != before)
    }

    async fn rank_candidates(&mut self, semester_id: Uuid) -> Result<Vec<RankCandidate>> {
        Ok(self
            .rankings
            .iter()
            .filter(|r| r.semester_id == semester_id)
            .map(|r| RankCandidate {
                ranking_id: r.ranking_id,
                club_name: self
                    .clubs
                    .iter()
                    .find(|c| c.club_id == r.club_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_default(),
                cps: r.cps,
                tier: r.tier,
                rank: r.rank,
            })
            .collect())
    }

    async fn set_rank(&mut self, ranking_id: Uuid, rank: Option<i32>) -> Result<()> {
        if let Some(ranking) = self
            .rankings
            .iter_mut()
            .find(|r| r.ranking_id == ranking_id)
        {
            ranking.rank = rank;
        }
        Ok(())
    }

    async fn append_audit(&mut self, entry: &NewAuditEntry) -> Result<AuditLog> {
        if self.fail_audit {
            return Err(StorageError::Database(sqlx::Error::PoolClosed));
        }
        let log = AuditLog {
            audit_id: self.audit.len() as i64 + 1,
            acting_user: entry.acting_user.clone(),
            action: entry.action.as_str().to_string(),
            details: entry.details.clone(),
            created_at: Utc::now().naive_utc(),
        };
        self.audit.push(log.clone());
        Ok(log)
    }
}
