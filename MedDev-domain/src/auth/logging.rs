use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::Role;

/// Types of authentication events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthEventType {
    /// Role picked and session started
    Login,
    /// Login attempt with a role outside the demo roles
    FailedLogin,
    /// Session ended
    Logout,
    /// Protected content shown
    AccessGranted,
    /// Protected content withheld
    AccessDenied,
}

impl std::fmt::Display for AuthEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthEventType::Login => write!(f, "LOGIN"),
            AuthEventType::FailedLogin => write!(f, "FAILED_LOGIN"),
            AuthEventType::Logout => write!(f, "LOGOUT"),
            AuthEventType::AccessGranted => write!(f, "ACCESS_GRANTED"),
            AuthEventType::AccessDenied => write!(f, "ACCESS_DENIED"),
        }
    }
}

/// Authentication event record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthEvent {
    /// Type of authentication event
    pub event_type: AuthEventType,
    /// Role of the session (if any)
    pub role: Option<Role>,
    /// Timestamp when the event occurred
    pub timestamp: DateTime<Utc>,
    /// Whether the event was successful
    pub success: bool,
    /// Additional details about the event
    pub details: Option<String>,
    /// The route being accessed (if applicable)
    pub resource: Option<String>,
}

impl AuthEvent {
    /// Create a new authentication event
    pub fn new(event_type: AuthEventType, role: Option<Role>, success: bool) -> Self {
        Self {
            event_type,
            role,
            timestamp: Utc::now(),
            success,
            details: None,
            resource: None,
        }
    }

    /// Set the details
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Set the resource
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }
}

/// Log an authentication event
pub fn log_auth_event(event: AuthEvent) {
    let role = event.role.map(|r| r.as_str()).unwrap_or("anonymous");
    let status = if event.success { "SUCCESS" } else { "FAILURE" };
    let details = event.details.as_deref().unwrap_or("");
    let resource = event.resource.as_deref().unwrap_or("-");

    if event.success {
        info!(
            "AUTH-LOG [{}] [{}] [{}] [{}] [{}] {}",
            event.event_type,
            role,
            status,
            resource,
            event.timestamp.to_rfc3339(),
            details
        );
    } else {
        warn!(
            "AUTH-LOG [{}] [{}] [{}] [{}] [{}] {}",
            event.event_type,
            role,
            status,
            resource,
            event.timestamp.to_rfc3339(),
            details
        );
    }
}

/// Log a successful login
pub fn log_login(role: Role) {
    log_auth_event(AuthEvent::new(AuthEventType::Login, Some(role), true));
}

/// Log a login rejected at the role boundary
pub fn log_failed_login(raw_role: &str) {
    let event = AuthEvent::new(AuthEventType::FailedLogin, None, false)
        .with_details(format!("Rejected role value {:?}", raw_role));
    log_auth_event(event);
}

/// Log a logout event
pub fn log_logout(role: Option<Role>) {
    log_auth_event(AuthEvent::new(AuthEventType::Logout, role, true));
}

/// Log the outcome of a route permission check
pub fn log_route_access(role: Option<Role>, resource: &str, granted: bool) {
    let event_type = if granted {
        AuthEventType::AccessGranted
    } else {
        AuthEventType::AccessDenied
    };
    log_auth_event(AuthEvent::new(event_type, role, granted).with_resource(resource));
}
