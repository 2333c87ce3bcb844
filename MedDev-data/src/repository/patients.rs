use async_trait::async_trait;

use super::errors::RepositoryError;
use crate::models::patient::{PatientRecord, VitalsBaseline};

/// Repository trait for demo patient records
#[async_trait]
pub trait PatientRepositoryTrait: Send + Sync {
    /// Get all patients, ordered by id
    async fn list_patients(&self) -> Result<Vec<PatientRecord>, RepositoryError>;
}

/// The fixed roster shown by the patient records demo
pub fn demo_roster() -> Vec<PatientRecord> {
    vec![
        PatientRecord {
            id: 1,
            name: "John Doe".to_string(),
            diagnosis: "Hypertension".to_string(),
            baseline: VitalsBaseline::new(72.0, 120.0, 80.0),
        },
        PatientRecord {
            id: 2,
            name: "Jane Smith".to_string(),
            diagnosis: "Diabetes".to_string(),
            baseline: VitalsBaseline::new(85.0, 130.0, 85.0),
        },
    ]
}

#[cfg(any(test, feature = "mock"))]
pub mod tests {
    use super::*;

    /// Mock implementation of PatientRepositoryTrait for testing
    pub struct MockPatientRepository {
        patients: Vec<PatientRecord>,
        failure: Option<String>,
    }

    impl Default for MockPatientRepository {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockPatientRepository {
        /// Create a mock repository holding the demo roster
        pub fn new() -> Self {
            Self {
                patients: demo_roster(),
                failure: None,
            }
        }

        /// Create a mock repository with predefined patients
        pub fn with_patients(patients: Vec<PatientRecord>) -> Self {
            Self {
                patients,
                failure: None,
            }
        }

        /// Configure the mock to fail every fetch with the given reason
        pub fn failing(reason: impl Into<String>) -> Self {
            Self {
                patients: Vec::new(),
                failure: Some(reason.into()),
            }
        }
    }

    #[async_trait]
    impl PatientRepositoryTrait for MockPatientRepository {
        async fn list_patients(&self) -> Result<Vec<PatientRecord>, RepositoryError> {
            match &self.failure {
                Some(reason) => Err(RepositoryError::FetchFailed(reason.clone())),
                None => Ok(self.patients.clone()),
            }
        }
    }

}
