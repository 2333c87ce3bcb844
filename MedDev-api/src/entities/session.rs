use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use meddev_domain::auth::context::SessionContext;
use meddev_domain::auth::Session;

/// Login request body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// One of `admin`, `doctor`, `nurse` or `patient`
    #[schema(example = "doctor")]
    pub role: String,
}

/// Public view of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    /// Current role, `null` when logged out
    pub role: Option<String>,

    pub is_logged_in: bool,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            role: session.role.map(|role| role.as_str().to_string()),
            is_logged_in: session.is_logged_in,
        }
    }
}

/// Response to a successful login
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Pass back in the `x-session-id` header on later requests
    pub session_id: Uuid,

    pub session: SessionResponse,

    /// Patient records gate state right after login
    #[schema(example = "loading")]
    pub patient_records: String,
}

impl LoginResponse {
    pub fn new(session_id: Uuid, ctx: &SessionContext) -> Self {
        Self {
            session_id,
            session: SessionResponse::from(ctx.session()),
            patient_records: ctx.patient_records().state().name().to_string(),
        }
    }
}

/// Response to a logout
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LogoutResponse {
    /// Always the anonymous session
    pub session: SessionResponse,
}
