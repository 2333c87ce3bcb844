//! Patient-Records view gate
//!
//! Decides what the Patient Records view shows for the current session:
//! a fallback message, a loading indicator, or the vitals charts.
//!
//! ```text
//! Unauthenticated --login(allowed)--> AuthenticatedLoading --resolved--> AuthenticatedReady
//!        |                                    |
//!        +--login(denied)--> AuthenticatedInsufficientRole
//!                                             +--failed--> FetchFailed
//! any state --logout--> Unauthenticated
//! ```
//!
//! Every login and logout starts a new epoch. A fetch resolution carries the
//! [`FetchTicket`] of the epoch that started it and is dropped if that epoch
//! is over.

use tracing::{debug, error};

use meddev_data::models::PatientVitalsSeries;

use crate::auth::logging::log_route_access;
use crate::auth::permissions::{self, Access, Route};
use crate::auth::Role;
use crate::services::RecordsServiceError;

/// Shown when nobody is logged in
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to see patient records.";

/// Shown when the logged-in role is not clinical staff
pub const INSUFFICIENT_ROLE_MESSAGE: &str = "You do not have permission to view patient records.";

/// Shown when the simulated fetch fails
pub const FETCH_FAILED_MESSAGE: &str = "Failed to load patient records.";

/// Gate state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    Unauthenticated,
    AuthenticatedInsufficientRole,
    AuthenticatedLoading,
    AuthenticatedReady(Vec<PatientVitalsSeries>),
    /// Fetch failed; holds the underlying reason for logs and diagnostics
    FetchFailed(String),
}

impl GateState {
    /// Stable snake_case name of the state
    pub fn name(&self) -> &'static str {
        match self {
            GateState::Unauthenticated => "unauthenticated",
            GateState::AuthenticatedInsufficientRole => "insufficient_role",
            GateState::AuthenticatedLoading => "loading",
            GateState::AuthenticatedReady(_) => "ready",
            GateState::FetchFailed(_) => "fetch_failed",
        }
    }
}

/// What the view renders for a state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateView<'a> {
    Message(&'static str),
    Loading,
    Records(&'a [PatientVitalsSeries]),
}

/// Ties an in-flight fetch to the epoch that started it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    epoch: u64,
}

#[derive(Debug, Clone)]
pub struct PatientRecordsGate {
    state: GateState,
    epoch: u64,
    role: Option<Role>,
}

impl Default for PatientRecordsGate {
    fn default() -> Self {
        Self::new()
    }
}

impl PatientRecordsGate {
    pub fn new() -> Self {
        Self {
            state: GateState::Unauthenticated,
            epoch: 0,
            role: None,
        }
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    /// Re-evaluate the gate for a freshly logged-in role
    ///
    /// Returns a ticket when the role may see the records and a fetch has to
    /// be started. Logging in again with the same role keeps loaded or
    /// in-flight records.
    pub fn on_login(&mut self, role: Role) -> Option<FetchTicket> {
        if self.role == Some(role)
            && matches!(
                self.state,
                GateState::AuthenticatedLoading | GateState::AuthenticatedReady(_)
            )
        {
            debug!("Patient records gate: role unchanged, staying {}", self.state.name());
            return None;
        }

        self.role = Some(role);
        self.epoch += 1;
        let path = Route::PatientRecords.path();

        match permissions::evaluate(path, Some(role)) {
            Access::Granted => {
                log_route_access(Some(role), path, true);
                debug!("Patient records gate: {} -> loading", self.state.name());
                self.state = GateState::AuthenticatedLoading;
                Some(FetchTicket { epoch: self.epoch })
            }
            Access::Denied => {
                log_route_access(Some(role), path, false);
                debug!("Patient records gate: {} -> insufficient_role", self.state.name());
                self.state = GateState::AuthenticatedInsufficientRole;
                None
            }
            // A defined route never lands here; keep the current state
            Access::Unresolved => None,
        }
    }

    /// Drop any records and return to the unauthenticated state
    pub fn on_logout(&mut self) {
        self.epoch += 1;
        self.role = None;
        debug!("Patient records gate: {} -> unauthenticated", self.state.name());
        self.state = GateState::Unauthenticated;
    }

    /// Apply the outcome of a fetch started with `ticket`
    ///
    /// Returns `false` when the ticket is stale or the gate is not loading;
    /// the state is left untouched in that case.
    pub fn resolve(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<PatientVitalsSeries>, RecordsServiceError>,
    ) -> bool {
        if ticket.epoch != self.epoch || self.state != GateState::AuthenticatedLoading {
            debug!(
                "Ignoring stale patient records fetch (ticket epoch {}, current epoch {})",
                ticket.epoch, self.epoch
            );
            return false;
        }

        self.state = match result {
            Ok(series) => {
                debug!("Patient records gate: loading -> ready ({} patients)", series.len());
                GateState::AuthenticatedReady(series)
            }
            Err(err) => {
                error!("Failed to fetch patient records: {}", err);
                GateState::FetchFailed(err.to_string())
            }
        };
        true
    }

    /// Message shown instead of the records, if any
    pub fn fallback_message(&self) -> Option<&'static str> {
        match &self.state {
            GateState::Unauthenticated => Some(LOGIN_REQUIRED_MESSAGE),
            GateState::AuthenticatedInsufficientRole => Some(INSUFFICIENT_ROLE_MESSAGE),
            GateState::FetchFailed(_) => Some(FETCH_FAILED_MESSAGE),
            GateState::AuthenticatedLoading | GateState::AuthenticatedReady(_) => None,
        }
    }

    pub fn view(&self) -> GateView<'_> {
        match &self.state {
            GateState::AuthenticatedLoading => GateView::Loading,
            GateState::AuthenticatedReady(series) => GateView::Records(series),
            GateState::Unauthenticated => GateView::Message(LOGIN_REQUIRED_MESSAGE),
            GateState::AuthenticatedInsufficientRole => GateView::Message(INSUFFICIENT_ROLE_MESSAGE),
            GateState::FetchFailed(_) => GateView::Message(FETCH_FAILED_MESSAGE),
        }
    }

    /// Cached patient series, only present once ready
    pub fn records(&self) -> Option<&[PatientVitalsSeries]> {
        match &self.state {
            GateState::AuthenticatedReady(series) => Some(series),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meddev_data::models::VitalsSample;

    fn series(n: usize) -> Vec<PatientVitalsSeries> {
        (0..n)
            .map(|i| PatientVitalsSeries {
                patient_id: i as u32 + 1,
                name: format!("Patient {}", i + 1),
                samples: vec![VitalsSample {
                    date: chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                    heart_rate: 72,
                    systolic: 120,
                    diastolic: 80,
                }],
            })
            .collect()
    }

    #[test]
    fn test_starts_unauthenticated_with_login_prompt() {
        let gate = PatientRecordsGate::new();
        assert_eq!(gate.state(), &GateState::Unauthenticated);
        assert_eq!(gate.view(), GateView::Message(LOGIN_REQUIRED_MESSAGE));
    }

    #[test]
    fn test_allowed_roles_start_loading() {
        for role in [Role::Doctor, Role::Admin] {
            let mut gate = PatientRecordsGate::new();
            assert!(gate.on_login(role).is_some());
            assert_eq!(gate.state(), &GateState::AuthenticatedLoading);
            assert_eq!(gate.view(), GateView::Loading);
            assert_eq!(gate.fallback_message(), None);
        }
    }

    #[test]
    fn test_disallowed_roles_get_permission_message() {
        for role in [Role::Nurse, Role::Patient] {
            let mut gate = PatientRecordsGate::new();
            assert!(gate.on_login(role).is_none());
            assert_eq!(gate.state(), &GateState::AuthenticatedInsufficientRole);
            assert_eq!(gate.fallback_message(), Some(INSUFFICIENT_ROLE_MESSAGE));
        }
    }

    #[test]
    fn test_resolution_moves_to_ready() {
        let mut gate = PatientRecordsGate::new();
        let ticket = gate.on_login(Role::Doctor).unwrap();

        assert!(gate.resolve(ticket, Ok(series(2))));
        assert_eq!(gate.records().map(<[_]>::len), Some(2));
        assert!(matches!(gate.view(), GateView::Records(s) if s.len() == 2));
    }

    #[test]
    fn test_failure_is_recoverable_message() {
        let mut gate = PatientRecordsGate::new();
        let ticket = gate.on_login(Role::Admin).unwrap();

        assert!(gate.resolve(ticket, Err(RecordsServiceError::FetchFailed("offline".into()))));
        assert_eq!(gate.state().name(), "fetch_failed");
        assert_eq!(gate.view(), GateView::Message(FETCH_FAILED_MESSAGE));

        // a fresh login recovers
        let ticket = gate.on_login(Role::Admin).unwrap();
        assert!(gate.resolve(ticket, Ok(series(1))));
        assert_eq!(gate.state().name(), "ready");
    }

    #[test]
    fn test_resolution_after_logout_is_ignored() {
        let mut gate = PatientRecordsGate::new();
        let ticket = gate.on_login(Role::Doctor).unwrap();
        gate.on_logout();

        assert!(!gate.resolve(ticket, Ok(series(2))));
        assert_eq!(gate.state(), &GateState::Unauthenticated);
    }

    #[test]
    fn test_resolution_from_previous_login_is_ignored() {
        let mut gate = PatientRecordsGate::new();
        let first = gate.on_login(Role::Doctor).unwrap();
        let second = gate.on_login(Role::Admin).unwrap();

        assert!(!gate.resolve(first, Ok(series(5))));
        assert_eq!(gate.state(), &GateState::AuthenticatedLoading);
        assert!(gate.resolve(second, Ok(series(2))));
    }

    #[test]
    fn test_same_role_relogin_keeps_records() {
        let mut gate = PatientRecordsGate::new();
        let ticket = gate.on_login(Role::Doctor).unwrap();
        gate.resolve(ticket, Ok(series(2)));

        assert!(gate.on_login(Role::Doctor).is_none());
        assert_eq!(gate.records().map(<[_]>::len), Some(2));

        // a different allowed role fetches again
        assert!(gate.on_login(Role::Admin).is_some());
        assert_eq!(gate.state(), &GateState::AuthenticatedLoading);
    }

    #[test]
    fn test_same_role_relogin_while_loading_keeps_ticket() {
        let mut gate = PatientRecordsGate::new();
        let ticket = gate.on_login(Role::Admin).unwrap();

        assert!(gate.on_login(Role::Admin).is_none());
        assert!(gate.resolve(ticket, Ok(series(2))));
        assert_eq!(gate.state().name(), "ready");
    }

    #[test]
    fn test_relogin_after_logout_fetches_again() {
        let mut gate = PatientRecordsGate::new();
        let ticket = gate.on_login(Role::Doctor).unwrap();
        gate.resolve(ticket, Ok(series(2)));
        gate.on_logout();

        assert!(gate.on_login(Role::Doctor).is_some());
    }

    #[test]
    fn test_switching_to_disallowed_role_hides_records() {
        let mut gate = PatientRecordsGate::new();
        let ticket = gate.on_login(Role::Doctor).unwrap();
        gate.resolve(ticket, Ok(series(2)));

        assert!(gate.on_login(Role::Nurse).is_none());
        assert_eq!(gate.records(), None);
        assert_eq!(gate.fallback_message(), Some(INSUFFICIENT_ROLE_MESSAGE));
    }

    #[test]
    fn test_logout_from_every_state() {
        let mut ready = PatientRecordsGate::new();
        let ticket = ready.on_login(Role::Doctor).unwrap();
        ready.resolve(ticket, Ok(series(2)));

        let mut denied = PatientRecordsGate::new();
        denied.on_login(Role::Patient);

        let mut loading = PatientRecordsGate::new();
        loading.on_login(Role::Admin);

        for mut gate in [ready, denied, loading, PatientRecordsGate::new()] {
            gate.on_logout();
            assert_eq!(gate.state(), &GateState::Unauthenticated);
            assert_eq!(gate.fallback_message(), Some(LOGIN_REQUIRED_MESSAGE));
        }
    }
}
