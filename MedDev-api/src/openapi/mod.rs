use axum::Json;
use utoipa::OpenApi;

/// Serve the generated OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Session endpoints
        crate::api::handlers::auth::login,
        crate::api::handlers::auth::logout,
        crate::api::handlers::auth::current_session,

        // View endpoints
        crate::api::handlers::views::home,
        crate::api::handlers::views::patient_records,
        crate::api::handlers::views::sap_xml,
        crate::api::handlers::views::ci_cd,
        crate::api::handlers::views::mentoring
    ),
    components(
        schemas(
            // Entities
            crate::entities::common::ErrorResponse,
            crate::entities::session::LoginRequest,
            crate::entities::session::LoginResponse,
            crate::entities::session::LogoutResponse,
            crate::entities::session::SessionResponse,
            crate::entities::views::PatientRecordsResponse,
            crate::entities::views::PatientVitalsResponse,
            crate::entities::views::VitalsSampleResponse,
            crate::entities::views::SectionResponse,
            crate::entities::views::ShowcaseResponse,

            // Health handlers
            crate::api::handlers::health::HealthResponse
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "auth", description = "Demo role login and logout"),
        (name = "views", description = "Portfolio sections")
    ),
    info(
        title = "MedDev API",
        version = "0.1.0",
        description = "Role-gated portfolio demo with synthetic patient vitals",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;
