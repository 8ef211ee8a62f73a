use utoipa::OpenApi;

use crate::features;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::semesters::handlers::list_semesters,
        features::semesters::handlers::get_current_semester,
        features::semesters::handlers::create_semester,
        features::semesters::handlers::update_semester,
        features::semesters::handlers::recalculate_semester,
        features::rankings::handlers::get_semester_rankings,
        features::rankings::handlers::export_semester_rankings,
        features::clubs::handlers::list_clubs,
        features::clubs::handlers::get_club,
        features::clubs::handlers::get_club_detail,
        features::clubs::handlers::create_club,
        features::clubs::handlers::update_club,
        features::clubs::handlers::delete_club,
        features::events::handlers::list_events,
        features::events::handlers::get_event,
        features::events::handlers::create_event,
        features::events::handlers::update_event,
        features::events::handlers::delete_event,
        features::audit::handlers::list_audit_logs,
    ),
    components(
        schemas(
            storage::dto::semester::CreateSemesterRequest,
            storage::dto::semester::UpdateSemesterRequest,
            storage::dto::club::CreateClubRequest,
            storage::dto::club::UpdateClubRequest,
            storage::dto::club::ClubDetailResponse,
            storage::dto::event::CreateEventRequest,
            storage::dto::event::UpdateEventRequest,
            storage::dto::event::EventResponse,
            storage::dto::ranking::RankingEntry,
            storage::dto::ranking::SemesterRankingResponse,
            storage::dto::ranking::RecalculationSummary,
            storage::dto::common::PaginationMeta,
            storage::models::Semester,
            storage::models::Club,
            storage::models::Event,
            storage::models::Ranking,
            storage::models::Tier,
            storage::models::AuditLog,
        )
    ),
    tags(
        (name = "semesters", description = "Semester management"),
        (name = "rankings", description = "Public leaderboard endpoints"),
        (name = "clubs", description = "Club registry"),
        (name = "events", description = "Scored club events"),
        (name = "audit", description = "Audit trail of every mutation"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}
