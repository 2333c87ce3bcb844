//! Route permission table
//!
//! Each demo route maps to a predicate over the current role. The table is
//! built once and never changes.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::Role;

/// Predicate deciding whether a role may see a route's protected content
pub type PermissionRule = fn(Option<Role>) -> bool;

/// Routes of the MedDev demo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    PatientRecords,
    SapXml,
    CiCd,
    Mentoring,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::PatientRecords, Route::SapXml, Route::CiCd, Route::Mentoring];

    /// Route the site root redirects to
    pub const HOME: Route = Route::PatientRecords;

    pub fn path(&self) -> &'static str {
        match self {
            Route::PatientRecords => "/patient-records",
            Route::SapXml => "/sap-xml",
            Route::CiCd => "/ci-cd",
            Route::Mentoring => "/mentoring",
        }
    }

    /// Label used in the navigation sidebar
    pub fn title(&self) -> &'static str {
        match self {
            Route::PatientRecords => "Patient Records",
            Route::SapXml => "SAP & XML",
            Route::CiCd => "CI/CD & Quality",
            Route::Mentoring => "Mentoring",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        Route::ALL.into_iter().find(|route| route.path() == path)
    }
}

/// Outcome of a permission lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    Granted,
    Denied,
    /// No rule exists for the path; nothing may render until one does
    Unresolved,
}

impl Access {
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted)
    }
}

fn clinical_staff_only(role: Option<Role>) -> bool {
    matches!(role, Some(Role::Doctor) | Some(Role::Admin))
}

fn anyone(_role: Option<Role>) -> bool {
    true
}

static ROUTE_PERMISSIONS: Lazy<HashMap<&'static str, PermissionRule>> = Lazy::new(|| {
    let mut rules: HashMap<&'static str, PermissionRule> = HashMap::new();
    rules.insert(Route::PatientRecords.path(), clinical_staff_only);
    rules.insert(Route::SapXml.path(), anyone);
    rules.insert(Route::CiCd.path(), anyone);
    rules.insert(Route::Mentoring.path(), anyone);
    rules
});

/// Look up the rule for `path` and apply it to `role`
pub fn evaluate(path: &str, role: Option<Role>) -> Access {
    match ROUTE_PERMISSIONS.get(path) {
        Some(rule) if rule(role) => Access::Granted,
        Some(_) => Access::Denied,
        None => Access::Unresolved,
    }
}

/// Whether `role` may see the protected content of a defined route
///
/// Paths without a rule are never permitted.
pub fn route_permission(path: &str, role: Option<Role>) -> bool {
    evaluate(path, role).is_granted()
}
