use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSemesterRequest {
    #[validate(length(
        min = 1,
        max = 50,
        message = "Name must be between 1 and 50 characters"
    ))]
    pub name: String,

    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateSemesterRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,

    pub is_active: Option<bool>,
}

impl UpdateSemesterRequest {
    pub fn merge_into(&self, existing: &crate::models::Semester) -> CreateSemesterRequest {
        CreateSemesterRequest {
            name: self.name.clone().unwrap_or_else(|| existing.name.clone()),
            is_active: self.is_active.unwrap_or(existing.is_active),
        }
    }
}
