// Testing utilities for the domain layer
// This module is only available in tests or when the "mock" feature is enabled

use std::sync::Arc;

use chrono::NaiveDate;

// Re-export useful test mocks from the data layer
pub use meddev_data::repository::tests::MockPatientRepository;

use crate::services::{FixedClock, NoDelay, PatientRecordsService};

/// Records service over the demo roster that resolves immediately on `today`
pub fn immediate_records_service(today: NaiveDate) -> PatientRecordsService {
    PatientRecordsService::new(
        Arc::new(MockPatientRepository::new()),
        Arc::new(FixedClock(today)),
        Arc::new(NoDelay),
    )
}

/// Records service whose every fetch fails with `reason`
pub fn failing_records_service(reason: &str) -> PatientRecordsService {
    PatientRecordsService::new(
        Arc::new(MockPatientRepository::failing(reason)),
        Arc::new(FixedClock(NaiveDate::MIN)),
        Arc::new(NoDelay),
    )
}
