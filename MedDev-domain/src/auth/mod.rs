//! Authentication module for the MedDev demo
//!
//! There is no credential check: a visitor picks one of four roles and the
//! choice lives in memory for the lifetime of its [`SessionContext`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Per-session state holder
pub mod context;

// Static route permission table
pub mod permissions;

// Structured auth event logging
pub mod logging;

pub use context::SessionContext;
pub use permissions::{route_permission, Access, Route};

/// Authentication errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The supplied role is not one of the four demo roles
    #[error("Invalid role: {0:?} (expected one of admin, doctor, nurse, patient)")]
    InvalidRole(String),
}

/// Demo user role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Doctor,
    Nurse,
    Patient,
}

impl Role {
    /// All roles, in the order the login picker lists them
    pub const ALL: [Role; 4] = [Role::Admin, Role::Doctor, Role::Nurse, Role::Patient];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Doctor => "doctor",
            Role::Nurse => "nurse",
            Role::Patient => "patient",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "doctor" => Ok(Role::Doctor),
            "nurse" => Ok(Role::Nurse),
            "patient" => Ok(Role::Patient),
            _ => Err(AuthError::InvalidRole(s.to_string())),
        }
    }
}

/// The current demo user's role and login flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Selected role, `None` when logged out
    pub role: Option<Role>,
    /// Whether a login action has happened since the last logout
    pub is_logged_in: bool,
}

impl Session {
    /// Session right after `login(role)`
    pub fn logged_in(role: Role) -> Self {
        Self {
            role: Some(role),
            is_logged_in: true,
        }
    }

    /// Session before any login or after logout
    pub fn anonymous() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing_is_case_insensitive() {
        assert_eq!("doctor".parse::<Role>(), Ok(Role::Doctor));
        assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(" Nurse ".parse::<Role>(), Ok(Role::Nurse));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let err = "surgeon".parse::<Role>().unwrap_err();
        assert_eq!(err, AuthError::InvalidRole("surgeon".to_string()));
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_display_round_trips_through_parse() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn test_anonymous_session() {
        let session = Session::anonymous();
        assert_eq!(session.role, None);
        assert!(!session.is_logged_in);
    }
}
