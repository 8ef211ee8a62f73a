use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::models::{Semester, Tier};

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RankingFilter {
    /// Falls back to the current semester when omitted.
    pub semester_id: Option<Uuid>,
}

/// One row of a semester's leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RankingEntry {
    pub rank: Option<i32>,
    pub club_id: Uuid,
    pub club_name: String,
    pub short_code: String,
    pub cps: f64,
    pub tier: Tier,
    pub event_count: i32,
    pub avg_planning: f64,
    pub avg_execution: f64,
    pub avg_documentation: f64,
    pub avg_innovation: f64,
    pub avg_turnout: f64,
}

#[derive(FromRow)]
pub(crate) struct RankingEntryRow {
    pub rank: Option<i32>,
    pub club_id: Uuid,
    pub club_name: String,
    pub short_code: String,
    pub cps: f64,
    pub tier: String,
    pub event_count: i32,
    pub avg_planning: f64,
    pub avg_execution: f64,
    pub avg_documentation: f64,
    pub avg_innovation: f64,
    pub avg_turnout: f64,
}

impl From<RankingEntryRow> for RankingEntry {
    fn from(row: RankingEntryRow) -> Self {
        Self {
            rank: row.rank,
            club_id: row.club_id,
            club_name: row.club_name,
            short_code: row.short_code,
            cps: row.cps,
            tier: Tier::from_code(&row.tier).unwrap_or(Tier::Pending),
            event_count: row.event_count,
            avg_planning: row.avg_planning,
            avg_execution: row.avg_execution,
            avg_documentation: row.avg_documentation,
            avg_innovation: row.avg_innovation,
            avg_turnout: row.avg_turnout,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SemesterRankingResponse {
    pub semester: Semester,
    pub rankings: Vec<RankingEntry>,
}

/// Result of an administrative full recalculation of one semester.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecalculationSummary {
    pub semester_id: Uuid,
    pub clubs_recalculated: u64,
    pub ranked: u64,
    pub pending: u64,
}
