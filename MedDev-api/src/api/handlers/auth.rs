//! Session endpoints
//!
//! Login picks a demo role; there are no credentials. The id returned by
//! login identifies the visitor's session in the `x-session-id` header.

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
};
use tracing::{error, info, instrument};

use meddev_domain::auth::context::SessionContext;
use meddev_domain::auth::{AuthError, Session};

use crate::api::routes::AppState;
use crate::api::session_store::{session_id, spawn_records_fetch, SessionStoreError};
use crate::entities::common::ErrorResponse;
use crate::entities::session::{LoginRequest, LoginResponse, LogoutResponse, SessionResponse};

impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        ErrorResponse::validation_error(&err.to_string())
    }
}

impl From<SessionStoreError> for ErrorResponse {
    fn from(err: SessionStoreError) -> Self {
        error!("Session store failure: {}", err);
        ErrorResponse::internal_error()
    }
}

/// Log in as one of the demo roles
///
/// With a known `x-session-id` the existing session switches role; otherwise
/// a new session is started. Roles allowed to see patient records start the
/// simulated fetch in the background.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    params(
        ("x-session-id" = Option<String>, Header, description = "Existing session to switch role in")
    ),
    responses(
        (status = 201, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Unknown role", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "auth"
)]
#[instrument(skip(state, headers))]
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), ErrorResponse> {
    let existing = match session_id(&headers) {
        Some(id) => state.sessions.get(&id)?.map(|shared| (id, shared)),
        None => None,
    };

    let (id, shared, ticket) = match existing {
        Some((id, shared)) => {
            let ticket = shared
                .lock()
                .map_err(SessionStoreError::from)?
                .login(&request.role)?;
            (id, shared, ticket)
        }
        None => {
            let mut ctx = SessionContext::new();
            let ticket = ctx.login(&request.role)?;
            let (id, shared) = state.sessions.insert(ctx)?;
            (id, shared, ticket)
        }
    };

    if let Some(ticket) = ticket {
        spawn_records_fetch(Arc::clone(&state.records), Arc::downgrade(&shared), ticket);
    }

    let response = {
        let ctx = shared.lock().map_err(SessionStoreError::from)?;
        LoginResponse::new(id, &ctx)
    };
    info!("Session {} logged in", id);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Log out and end the session
///
/// Always answers with the anonymous session, even without a session header.
#[utoipa::path(
    post,
    path = "/auth/logout",
    params(
        ("x-session-id" = Option<String>, Header, description = "Session to end")
    ),
    responses(
        (status = 200, description = "Logged out", body = LogoutResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "auth"
)]
#[instrument(skip(state, headers))]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<LogoutResponse>, ErrorResponse> {
    if let Some(id) = session_id(&headers) {
        if let Some(shared) = state.sessions.remove(&id)? {
            shared.lock().map_err(SessionStoreError::from)?.logout();
        }
    }

    Ok(Json(LogoutResponse {
        session: SessionResponse::from(&Session::anonymous()),
    }))
}

/// Current session; anonymous without a known session id
#[utoipa::path(
    get,
    path = "/session",
    params(
        ("x-session-id" = Option<String>, Header, description = "Session to inspect")
    ),
    responses(
        (status = 200, description = "Current session", body = SessionResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "auth"
)]
#[instrument(skip(state, headers))]
pub async fn current_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SessionResponse>, ErrorResponse> {
    let session = match session_id(&headers) {
        Some(id) => match state.sessions.get(&id)? {
            Some(shared) => *shared.lock().map_err(SessionStoreError::from)?.session(),
            None => Session::anonymous(),
        },
        None => Session::anonymous(),
    };

    Ok(Json(SessionResponse::from(&session)))
}
