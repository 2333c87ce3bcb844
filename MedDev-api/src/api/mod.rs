pub mod handlers;
pub mod routes;
pub mod session_store;

use std::time::Duration;

use axum::Router;

use meddev_domain::services::create_default_records_service;

use crate::config::AppConfig;
use routes::AppState;
use session_store::{start_cleanup_task, SessionStore};

const MIN_CLEANUP_PERIOD: Duration = Duration::from_secs(1);

/// Create the application router
///
/// Must be called inside a Tokio runtime: it starts the idle-session cleanup task.
pub fn create_application(config: &AppConfig) -> Router {
    let records = create_default_records_service(config.records_delay);
    let sessions = SessionStore::with_limits(config.max_sessions, config.session_idle_timeout);
    start_cleanup_task(
        sessions.clone(),
        (config.session_idle_timeout / 2).max(MIN_CLEANUP_PERIOD),
    );

    let state = AppState::new(records, &config.environment).with_sessions(sessions);
    routes::create_app(state, &config.site_dir)
}
