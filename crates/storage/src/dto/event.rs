use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Event, MetricScores};

/// Request payload for creating an event; also the full field set written on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEventRequest {
    pub club_id: Uuid,
    pub semester_id: Uuid,

    #[validate(length(
        min = 1,
        max = 200,
        message = "Name must be between 1 and 200 characters"
    ))]
    pub name: String,

    pub event_date: NaiveDate,

    #[validate(range(min = 0, message = "Turnout cannot be negative"))]
    pub expected_turnout: i32,

    #[validate(range(min = 0, message = "Turnout cannot be negative"))]
    pub actual_turnout: i32,

    #[validate(range(min = 0, max = 20, message = "Score must be between 0 and 20"))]
    pub planning_score: i32,

    #[validate(range(min = 0, max = 20, message = "Score must be between 0 and 20"))]
    pub execution_score: i32,

    #[validate(range(min = 0, max = 20, message = "Score must be between 0 and 20"))]
    pub documentation_score: i32,

    #[validate(range(min = 0, max = 20, message = "Score must be between 0 and 20"))]
    pub innovation_score: i32,

    #[validate(range(min = 0, max = 20, message = "Score must be between 0 and 20"))]
    pub turnout_score: i32,
}

impl CreateEventRequest {
    pub fn scores(&self) -> MetricScores {
        MetricScores {
            planning: self.planning_score,
            execution: self.execution_score,
            documentation: self.documentation_score,
            innovation: self.innovation_score,
            turnout: self.turnout_score,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateEventRequest {
    pub club_id: Option<Uuid>,
    pub semester_id: Option<Uuid>,

    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    pub event_date: Option<NaiveDate>,

    #[validate(range(min = 0))]
    pub expected_turnout: Option<i32>,

    #[validate(range(min = 0))]
    pub actual_turnout: Option<i32>,

    #[validate(range(min = 0, max = 20, message = "Score must be between 0 and 20"))]
    pub planning_score: Option<i32>,

    #[validate(range(min = 0, max = 20, message = "Score must be between 0 and 20"))]
    pub execution_score: Option<i32>,

    #[validate(range(min = 0, max = 20, message = "Score must be between 0 and 20"))]
    pub documentation_score: Option<i32>,

    #[validate(range(min = 0, max = 20, message = "Score must be between 0 and 20"))]
    pub innovation_score: Option<i32>,

    #[validate(range(min = 0, max = 20, message = "Score must be between 0 and 20"))]
    pub turnout_score: Option<i32>,
}

impl UpdateEventRequest {
    pub fn merge_into(&self, existing: &Event) -> CreateEventRequest {
        CreateEventRequest {
            club_id: self.club_id.unwrap_or(existing.club_id),
            semester_id: self.semester_id.unwrap_or(existing.semester_id),
            name: self.name.clone().unwrap_or_else(|| existing.name.clone()),
            event_date: self.event_date.unwrap_or(existing.event_date),
            expected_turnout: self.expected_turnout.unwrap_or(existing.expected_turnout),
            actual_turnout: self.actual_turnout.unwrap_or(existing.actual_turnout),
            planning_score: self.planning_score.unwrap_or(existing.planning_score),
            execution_score: self.execution_score.unwrap_or(existing.execution_score),
            documentation_score: self
                .documentation_score
                .unwrap_or(existing.documentation_score),
            innovation_score: self.innovation_score.unwrap_or(existing.innovation_score),
            turnout_score: self.turnout_score.unwrap_or(existing.turnout_score),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventFilter {
    pub club_id: Option<Uuid>,
    pub semester_id: Option<Uuid>,
}

/// Event as returned to callers, with the derived total.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventResponse {
    pub event_id: Uuid,
    pub club_id: Uuid,
    pub semester_id: Uuid,
    pub name: String,
    pub event_date: NaiveDate,
    pub expected_turnout: i32,
    pub actual_turnout: i32,
    pub planning_score: i32,
    pub execution_score: i32,
    pub documentation_score: i32,
    pub innovation_score: i32,
    pub turnout_score: i32,
    pub total_score: i32,
    pub created_at: chrono::NaiveDateTime,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        let total_score = event.total_score();
        Self {
            event_id: event.event_id,
            club_id: event.club_id,
            semester_id: event.semester_id,
            name: event.name,
            event_date: event.event_date,
            expected_turnout: event.expected_turnout,
            actual_turnout: event.actual_turnout,
            planning_score: event.planning_score,
            execution_score: event.execution_score,
            documentation_score: event.documentation_score,
            innovation_score: event.innovation_score,
            turnout_score: event.turnout_score,
            total_score,
            created_at: event.created_at,
        }
    }
}
