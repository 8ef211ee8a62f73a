use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Club {
    pub club_id: Uuid,
    pub name: String,
    pub short_code: String,
    pub faculty_incharge: String,
    pub student_lead: String,
    pub contact_details: String,
    pub created_at: chrono::NaiveDateTime,
}
