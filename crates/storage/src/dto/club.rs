use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Club, Event, Ranking, Semester};

use super::event::EventResponse;

/// Request payload for creating a club; also the full field set written on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateClubRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,

    #[validate(length(
        min = 1,
        max = 10,
        message = "Short code must be between 1 and 10 characters"
    ))]
    pub short_code: String,

    #[validate(length(min = 1, max = 100))]
    pub faculty_incharge: String,

    #[validate(length(min = 1, max = 100))]
    pub student_lead: String,

    #[serde(default)]
    pub contact_details: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateClubRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 10))]
    pub short_code: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub faculty_incharge: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub student_lead: Option<String>,

    pub contact_details: Option<String>,
}

impl UpdateClubRequest {
    pub fn merge_into(&self, existing: &Club) -> CreateClubRequest {
        CreateClubRequest {
            name: self.name.clone().unwrap_or_else(|| existing.name.clone()),
            short_code: self
                .short_code
                .clone()
                .unwrap_or_else(|| existing.short_code.clone()),
            faculty_incharge: self
                .faculty_incharge
                .clone()
                .unwrap_or_else(|| existing.faculty_incharge.clone()),
            student_lead: self
                .student_lead
                .clone()
                .unwrap_or_else(|| existing.student_lead.clone()),
            contact_details: self
                .contact_details
                .clone()
                .unwrap_or_else(|| existing.contact_details.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClubDetailQuery {
    /// Falls back to the current semester when omitted.
    pub semester_id: Option<Uuid>,
}

/// Club page: the club, its standing and its events for one semester.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClubDetailResponse {
    pub club: Club,
    pub semester: Option<Semester>,
    pub ranking: Option<Ranking>,
    pub events: Vec<EventResponse>,
}

impl ClubDetailResponse {
    pub fn new(
        club: Club,
        semester: Option<Semester>,
        ranking: Option<Ranking>,
        events: Vec<Event>,
    ) -> Self {
        Self {
            club,
            semester,
            ranking,
            events: events.into_iter().map(EventResponse::from).collect(),
        }
    }
}
