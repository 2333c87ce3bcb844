use std::path::Path;
use std::sync::Arc;

use axum::{routing::get, routing::post, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::debug;

use meddev_domain::services::PatientRecordsService;

use crate::api::handlers::{auth, health, views};
use crate::api::session_store::SessionStore;
use crate::openapi;

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub records: Arc<PatientRecordsService>,
    pub environment: Arc<str>,
}

impl AppState {
    pub fn new(records: PatientRecordsService, environment: &str) -> Self {
        Self {
            sessions: SessionStore::new(),
            records: Arc::new(records),
            environment: Arc::from(environment),
        }
    }

    /// Use `sessions` instead of a default-sized store
    pub fn with_sessions(mut self, sessions: SessionStore) -> Self {
        self.sessions = sessions;
        self
    }
}

/// Create the application router
///
/// Shared site fragments are served from `site_dir` under `/site`.
pub fn create_app(state: AppState, site_dir: &Path) -> Router {
    debug!("Creating application router");

    // Set up public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/api-docs/openapi.json", get(openapi::openapi_json));

    debug!("Public routes configured");

    // Set up session routes
    let auth_routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/session", get(auth::current_session));

    debug!("Auth routes configured");

    // Set up the demo views
    let view_routes = Router::new()
        .route("/", get(views::home))
        .route("/patient-records", get(views::patient_records))
        .route("/sap-xml", get(views::sap_xml))
        .route("/ci-cd", get(views::ci_cd))
        .route("/mentoring", get(views::mentoring));

    debug!("View routes configured");

    // Combine all routes
    let app = Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(view_routes)
        .nest_service("/site", ServeDir::new(site_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    debug!("Site fragments served from {}", site_dir.display());

    // Initialize health check service startup time
    health::initialize_server_start_time();

    app
}
