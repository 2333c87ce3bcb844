//! Explicit per-session context
//!
//! A `SessionContext` is created when a visitor's session starts and dropped
//! on logout. Views receive it by reference instead of reading global state.

use tracing::debug;

use meddev_data::models::PatientVitalsSeries;

use super::logging::{log_failed_login, log_login, log_logout, log_route_access};
use super::permissions::{self, Access};
use super::{AuthError, Role, Session};
use crate::gate::{FetchTicket, PatientRecordsGate};
use crate::services::RecordsServiceError;

#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    session: Session,
    patient_records: PatientRecordsGate,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn role(&self) -> Option<Role> {
        self.session.role
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in
    }

    pub fn patient_records(&self) -> &PatientRecordsGate {
        &self.patient_records
    }

    /// Log in with a role name coming from outside the domain
    ///
    /// Anything other than the four demo roles is rejected and leaves the
    /// session unchanged.
    pub fn login(&mut self, role: &str) -> Result<Option<FetchTicket>, AuthError> {
        let role = role.parse::<Role>().map_err(|e| {
            log_failed_login(role);
            e
        })?;
        Ok(self.login_as(role))
    }

    /// Log in with an already validated role
    ///
    /// Returns a ticket when the patient records fetch has to be started.
    pub fn login_as(&mut self, role: Role) -> Option<FetchTicket> {
        self.session = Session::logged_in(role);
        log_login(role);
        self.patient_records.on_login(role)
    }

    /// Reset to the anonymous session and drop cached patient data
    pub fn logout(&mut self) {
        let previous = self.session.role;
        self.session = Session::anonymous();
        self.patient_records.on_logout();
        log_logout(previous);
    }

    /// Hand a finished records fetch to the gate
    pub fn complete_records_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<PatientVitalsSeries>, RecordsServiceError>,
    ) -> bool {
        self.patient_records.resolve(ticket, result)
    }

    /// Permission of the current role for `path`
    pub fn access(&self, path: &str) -> Access {
        let access = permissions::evaluate(path, self.session.role);
        match access {
            Access::Granted | Access::Denied => {
                log_route_access(self.session.role, path, access.is_granted())
            }
            Access::Unresolved => debug!("No permission rule for {}", path),
        }
        access
    }
}
