//! Demo views
//!
//! Only Patient Records is gated; the other sections are open to everyone.

use axum::{
    extract::{Json, State},
    http::HeaderMap,
    response::Redirect,
};
use tracing::{debug, instrument};

use meddev_domain::auth::context::SessionContext;
use meddev_domain::auth::{Access, Route};
use meddev_domain::showcase::XmlSnippet;

use crate::api::routes::AppState;
use crate::api::session_store::{session_id, SessionStoreError};
use crate::entities::common::ErrorResponse;
use crate::entities::views::{PatientRecordsResponse, SectionResponse, ShowcaseResponse};

/// Run `f` against the caller's session, or a fresh anonymous one
fn with_session<T>(
    state: &AppState,
    headers: &HeaderMap,
    f: impl FnOnce(&SessionContext) -> T,
) -> Result<T, ErrorResponse> {
    if let Some(id) = session_id(headers) {
        if let Some(shared) = state.sessions.get(&id)? {
            let ctx = shared.lock().map_err(SessionStoreError::from)?;
            return Ok(f(&ctx));
        }
    }
    Ok(f(&SessionContext::new()))
}

fn require_access(ctx: &SessionContext, route: Route) -> Result<(), ErrorResponse> {
    match ctx.access(route.path()) {
        Access::Granted => Ok(()),
        Access::Denied => Err(ErrorResponse::forbidden(route.path())),
        Access::Unresolved => Err(ErrorResponse::not_found(route.path())),
    }
}

/// Site root, redirects to the default section
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 307, description = "Redirect to /patient-records")
    ),
    tag = "views"
)]
pub async fn home() -> Redirect {
    debug!("Redirecting / to {}", Route::HOME.path());
    Redirect::temporary(Route::HOME.path())
}

/// Patient Records view for the caller's session
#[utoipa::path(
    get,
    path = "/patient-records",
    params(
        ("x-session-id" = Option<String>, Header, description = "Session to render for")
    ),
    responses(
        (status = 200, description = "Gate view of the patient records", body = PatientRecordsResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "views"
)]
#[instrument(skip(state, headers))]
pub async fn patient_records(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<PatientRecordsResponse>, ErrorResponse> {
    let response = with_session(&state, &headers, |ctx| {
        PatientRecordsResponse::from(ctx.patient_records())
    })?;
    Ok(Json(response))
}

/// SAP / XML section with the highlighted sample document
#[utoipa::path(
    get,
    path = "/sap-xml",
    responses(
        (status = 200, description = "Section content", body = ShowcaseResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "views"
)]
#[instrument(skip(state, headers))]
pub async fn sap_xml(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ShowcaseResponse>, ErrorResponse> {
    with_session(&state, &headers, |ctx| require_access(ctx, Route::SapXml))??;

    let snippet = XmlSnippet::default();
    Ok(Json(ShowcaseResponse {
        route: Route::SapXml.path().to_string(),
        title: Route::SapXml.title().to_string(),
        toggle_label: snippet.button_label().to_string(),
        xml_html: snippet.html().unwrap_or_default(),
    }))
}

fn section(state: &AppState, headers: &HeaderMap, route: Route) -> Result<Json<SectionResponse>, ErrorResponse> {
    with_session(state, headers, |ctx| require_access(ctx, route))??;
    Ok(Json(SectionResponse::from(route)))
}

/// CI/CD & Quality section
#[utoipa::path(
    get,
    path = "/ci-cd",
    responses(
        (status = 200, description = "Section header", body = SectionResponse)
    ),
    tag = "views"
)]
#[instrument(skip(state, headers))]
pub async fn ci_cd(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SectionResponse>, ErrorResponse> {
    section(&state, &headers, Route::CiCd)
}

/// Mentoring section
#[utoipa::path(
    get,
    path = "/mentoring",
    responses(
        (status = 200, description = "Section header", body = SectionResponse)
    ),
    tag = "views"
)]
#[instrument(skip(state, headers))]
pub async fn mentoring(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SectionResponse>, ErrorResponse> {
    section(&state, &headers, Route::Mentoring)
}
