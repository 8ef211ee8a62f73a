use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Event {
    pub event_id: Uuid,
    pub club_id: Uuid,
    pub semester_id: Uuid,
    pub name: String,
    pub event_date: chrono::NaiveDate,
    pub expected_turnout: i32,
    pub actual_turnout: i32,
    pub planning_score: i32,
    pub execution_score: i32,
    pub documentation_score: i32,
    pub innovation_score: i32,
    pub turnout_score: i32,
    pub created_at: chrono::NaiveDateTime,
}

impl Event {
    pub fn scores(&self) -> MetricScores {
        MetricScores {
            planning: self.planning_score,
            execution: self.execution_score,
            documentation: self.documentation_score,
            innovation: self.innovation_score,
            turnout: self.turnout_score,
        }
    }

    /// Sum of the five metrics, 0 to 100. Never stored.
    pub fn total_score(&self) -> i32 {
        self.scores().total()
    }
}

/// The five equally weighted metrics every event is judged on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MetricScores {
    pub planning: i32,
    pub execution: i32,
    pub documentation: i32,
    pub innovation: i32,
    pub turnout: i32,
}

impl MetricScores {
    /// Column names paired with values, in display order.
    pub fn named(&self) -> [(&'static str, i32); 5] {
        [
            ("planning_score", self.planning),
            ("execution_score", self.execution),
            ("documentation_score", self.documentation),
            ("innovation_score", self.innovation),
            ("turnout_score", self.turnout),
        ]
    }

    pub fn total(&self) -> i32 {
        self.planning + self.execution + self.documentation + self.innovation + self.turnout
    }
}
