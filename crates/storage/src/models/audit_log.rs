use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Immutable audit trail entry. `acting_user` is `None` when the mutation
/// was made without an authenticated identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AuditLog {
    pub audit_id: i64,
    pub acting_user: Option<String>,
    pub action: String,
    pub details: String,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    EventAdded,
    EventUpdated,
    EventDeleted,
    ClubAdded,
    ClubUpdated,
    ClubDeleted,
    SemesterAdded,
    SemesterUpdated,
    SemesterCalculation,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EventAdded => "Event Added",
            Self::EventUpdated => "Event Updated",
            Self::EventDeleted => "Event Deleted",
            Self::ClubAdded => "Club Added",
            Self::ClubUpdated => "Club Updated",
            Self::ClubDeleted => "Club Deleted",
            Self::SemesterAdded => "Semester Added",
            Self::SemesterUpdated => "Semester Updated",
            Self::SemesterCalculation => "Semester Calculation",
        }
    }
}
