use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use thiserror::Error;
use tracing::{debug, error, instrument};

use meddev_data::models::PatientVitalsSeries;
use meddev_data::repository::{InMemoryPatientRepository, PatientRepositoryTrait, RepositoryError};

use super::vitals::{generate_for, Clock, SystemClock, DEFAULT_SERIES_DAYS};

/// Delay of the simulated records fetch
pub const DEFAULT_FETCH_DELAY: Duration = Duration::from_millis(1000);

/// Records service errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordsServiceError {
    /// The repository could not deliver the roster
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    /// Repository error
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// The async boundary standing in for network latency
#[async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self);
}

/// Sleeps on the tokio timer
#[derive(Debug, Clone, Copy)]
pub struct TokioDelay(pub Duration);

impl Default for TokioDelay {
    fn default() -> Self {
        Self(DEFAULT_FETCH_DELAY)
    }
}

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self) {
        tokio::time::sleep(self.0).await;
    }
}

/// Resolves immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Delay for NoDelay {
    async fn wait(&self) {}
}

/// Simulated fetch of patient records with their recent vitals
pub struct PatientRecordsService {
    repository: Arc<dyn PatientRepositoryTrait>,
    clock: Arc<dyn Clock>,
    delay: Arc<dyn Delay>,
    days: u32,
}

impl std::fmt::Debug for PatientRecordsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatientRecordsService")
            .field("days", &self.days)
            .finish_non_exhaustive()
    }
}

impl PatientRecordsService {
    /// Create a new records service
    pub fn new(
        repository: Arc<dyn PatientRepositoryTrait>,
        clock: Arc<dyn Clock>,
        delay: Arc<dyn Delay>,
    ) -> Self {
        Self {
            repository,
            clock,
            delay,
            days: DEFAULT_SERIES_DAYS,
        }
    }

    /// Override the number of days per series
    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    /// Map repository errors to service errors
    fn map_repo_error(&self, err: RepositoryError) -> RecordsServiceError {
        match err {
            RepositoryError::FetchFailed(msg) => RecordsServiceError::FetchFailed(msg),
            _ => RecordsServiceError::RepositoryError(err.to_string()),
        }
    }

    /// Wait out the simulated latency, then build one series per patient
    #[instrument(skip(self, rng))]
    pub async fn fetch_patient_vitals<G: Rng + Send>(
        &self,
        rng: &mut G,
    ) -> Result<Vec<PatientVitalsSeries>, RecordsServiceError> {
        self.delay.wait().await;

        let patients = self.repository.list_patients().await.map_err(|e| {
            error!("Failed to fetch patient records: {}", e);
            self.map_repo_error(e)
        })?;

        let today = self.clock.today();
        let series: Vec<PatientVitalsSeries> = patients
            .into_iter()
            .map(|patient| PatientVitalsSeries {
                patient_id: patient.id,
                samples: generate_for(&patient.baseline, self.days, today, rng),
                name: patient.name,
            })
            .collect();

        debug!("Generated vitals for {} patients ending {}", series.len(), today);
        Ok(series)
    }
}

/// Factory function for the service the demo runs with
pub fn create_default_records_service(delay: Duration) -> PatientRecordsService {
    PatientRecordsService::new(
        Arc::new(InMemoryPatientRepository::default()),
        Arc::new(SystemClock),
        Arc::new(TokioDelay(delay)),
    )
}
