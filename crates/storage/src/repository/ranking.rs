use sqlx::{FromRow, PgConnection};
use uuid::Uuid;

use crate::dto::ranking::{RankingEntry, RankingEntryRow};
use crate::error::{Result, StorageError};
use crate::models::ranking::RankingRow;
use crate::models::{Ranking, Tier};
use crate::services::performance::PerformanceSummary;
use crate::services::rank_assigner::RankCandidate;

const RANKING_COLUMNS: &str = "ranking_id, club_id, semester_id, cps, tier, rank, event_count, \
     avg_planning, avg_execution, avg_documentation, avg_innovation, avg_turnout";

#[derive(FromRow)]
struct CandidateRow {
    ranking_id: Uuid,
    club_name: String,
    cps: f64,
    tier: String,
    rank: Option<i32>,
}

pub struct RankingRepository<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> RankingRepository<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }

    /// Leaderboard for a semester: ranked clubs first, Pending clubs last
    pub async fn for_semester(&mut self, semester_id: Uuid) -> Result<Vec<RankingEntry>> {
        let rows = sqlx::query_as::<_, RankingEntryRow>(
            r#"
            SELECT r.rank, r.club_id, c.name AS club_name, c.short_code, r.cps, r.tier,
                   r.event_count, r.avg_planning, r.avg_execution, r.avg_documentation,
                   r.avg_innovation, r.avg_turnout
            FROM rankings r
            INNER JOIN clubs c ON c.club_id = r.club_id
            WHERE r.semester_id = $1
            ORDER BY r.rank ASC NULLS LAST, r.cps DESC, c.name ASC
            "#,
        )
        .bind(semester_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows.into_iter().map(RankingEntry::from).collect())
    }

    pub async fn find(&mut self, club_id: Uuid, semester_id: Uuid) -> Result<Option<Ranking>> {
        let row = sqlx::query_as::<_, RankingRow>(&format!(
            "SELECT {RANKING_COLUMNS} FROM rankings WHERE club_id = $1 AND semester_id = $2"
        ))
        .bind(club_id)
        .bind(semester_id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(row.map(Ranking::from))
    }

    /// Insert or refresh the projection; `rank` of an existing row is preserved
    pub(crate) async fn upsert(
        &mut self,
        club_id: Uuid,
        semester_id: Uuid,
        summary: &PerformanceSummary,
    ) -> Result<Ranking> {
        let row = sqlx::query_as::<_, RankingRow>(&format!(
            r#"
            INSERT INTO rankings (
                club_id, semester_id, cps, tier, event_count,
                avg_planning, avg_execution, avg_documentation, avg_innovation, avg_turnout
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (club_id, semester_id)
            DO UPDATE SET
                cps = EXCLUDED.cps,
                tier = EXCLUDED.tier,
                event_count = EXCLUDED.event_count,
                avg_planning = EXCLUDED.avg_planning,
                avg_execution = EXCLUDED.avg_execution,
                avg_documentation = EXCLUDED.avg_documentation,
                avg_innovation = EXCLUDED.avg_innovation,
                avg_turnout = EXCLUDED.avg_turnout
            RETURNING {RANKING_COLUMNS}
            "#
        ))
        .bind(club_id)
        .bind(semester_id)
        .bind(summary.cps)
        .bind(summary.tier.code())
        .bind(summary.event_count)
        .bind(summary.averages.planning)
        .bind(summary.averages.execution)
        .bind(summary.averages.documentation)
        .bind(summary.averages.innovation)
        .bind(summary.averages.turnout)
        .fetch_one(&mut *self.conn)
        .await
        .map_err(|e| StorageError::from(e).on_foreign_key_violation())?;

        Ok(Ranking::from(row))
    }

    /// Returns whether a row existed
    pub(crate) async fn delete(&mut self, club_id: Uuid, semester_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM rankings WHERE club_id = $1 AND semester_id = $2")
            .bind(club_id)
            .bind(semester_id)
            .execute(&mut *self.conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub(crate) async fn candidates(&mut self, semester_id: Uuid) -> Result<Vec<RankCandidate>> {
        let rows = sqlx::query_as::<_, CandidateRow>(
            r#"
            SELECT r.ranking_id, c.name AS club_name, r.cps, r.tier, r.rank
            FROM rankings r
            INNER JOIN clubs c ON c.club_id = r.club_id
            WHERE r.semester_id = $1
            "#,
        )
        .bind(semester_id)
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| RankCandidate {
                ranking_id: row.ranking_id,
                club_name: row.club_name,
                cps: row.cps,
                tier: Tier::from_code(&row.tier).unwrap_or(Tier::Pending),
                rank: row.rank,
            })
            .collect())
    }

    pub(crate) async fn set_rank(&mut self, ranking_id: Uuid, rank: Option<i32>) -> Result<()> {
        sqlx::query("UPDATE rankings SET rank = $1 WHERE ranking_id = $2")
            .bind(rank)
            .bind(ranking_id)
            .execute(&mut *self.conn)
            .await?;

        Ok(())
    }
}
