use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Semester {
    pub semester_id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub created_at: chrono::NaiveDateTime,
}
