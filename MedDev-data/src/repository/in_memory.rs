use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::debug;

use super::errors::RepositoryError;
use super::patients::{demo_roster, PatientRepositoryTrait};
use crate::models::patient::PatientRecord;

/// In-memory storage of demo patients
#[derive(Debug, Clone)]
pub struct InMemoryPatientRepository {
    patients: Arc<Mutex<HashMap<u32, PatientRecord>>>,
}

impl Default for InMemoryPatientRepository {
    fn default() -> Self {
        Self::with_patients(demo_roster())
    }
}

impl InMemoryPatientRepository {
    /// Create a repository seeded with the given patients
    pub fn with_patients(patients: Vec<PatientRecord>) -> Self {
        let patients = patients.into_iter().map(|p| (p.id, p)).collect();
        Self {
            patients: Arc::new(Mutex::new(patients)),
        }
    }
}

#[async_trait]
impl PatientRepositoryTrait for InMemoryPatientRepository {
    async fn list_patients(&self) -> Result<Vec<PatientRecord>, RepositoryError> {
        let store = self.patients.lock()?;
        let mut patients: Vec<PatientRecord> = store.values().cloned().collect();
        patients.sort_by_key(|p| p.id);
        debug!("Listing {} demo patients", patients.len());
        Ok(patients)
    }
}
