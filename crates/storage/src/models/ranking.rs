use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A club needs at least this many events in a semester before it is tiered
/// and ranked.
pub const MIN_EVENTS_FOR_RANKING: i32 = 2;

/// Performance bucket derived from CPS and event-count eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Tier {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "P")]
    Pending,
}

impl Tier {
    /// Eligibility is checked before any threshold; lower bounds are inclusive.
    pub fn classify(cps: f64, event_count: i32) -> Self {
        if event_count < MIN_EVENTS_FOR_RANKING {
            return Self::Pending;
        }

        if cps >= 90.0 {
            Self::A
        } else if cps >= 75.0 {
            Self::B
        } else if cps >= 60.0 {
            Self::C
        } else {
            Self::D
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::Pending => "P",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            "P" => Some(Self::Pending),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Cached per-(club, semester) projection of the club's events.
///
/// Rows are only ever written by the recalculation pipeline. `rank` is `None`
/// while the club is Pending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Ranking {
    pub ranking_id: Uuid,
    pub club_id: Uuid,
    pub semester_id: Uuid,
    pub cps: f64,
    pub tier: Tier,
    pub rank: Option<i32>,
    pub event_count: i32,
    pub avg_planning: f64,
    pub avg_execution: f64,
    pub avg_documentation: f64,
    pub avg_innovation: f64,
    pub avg_turnout: f64,
}

/// Raw `rankings` row; `tier` is stored as its one-letter code.
#[derive(FromRow)]
pub(crate) struct RankingRow {
    pub ranking_id: Uuid,
    pub club_id: Uuid,
    pub semester_id: Uuid,
    pub cps: f64,
    pub tier: String,
    pub rank: Option<i32>,
    pub event_count: i32,
    pub avg_planning: f64,
    pub avg_execution: f64,
    pub avg_documentation: f64,
    pub avg_innovation: f64,
    pub avg_turnout: f64,
}

impl From<RankingRow> for Ranking {
    fn from(row: RankingRow) -> Self {
        Self {
            ranking_id: row.ranking_id,
            club_id: row.club_id,
            semester_id: row.semester_id,
            cps: row.cps,
            // The column carries a CHECK constraint, so anything else is unreachable.
            tier: Tier::from_code(&row.tier).unwrap_or(Tier::Pending),
            rank: row.rank,
            event_count: row.event_count,
            avg_planning: row.avg_planning,
            avg_execution: row.avg_execution,
            avg_documentation: row.avg_documentation,
            avg_innovation: row.avg_innovation,
            avg_turnout: row.avg_turnout,
        }
    }
}
