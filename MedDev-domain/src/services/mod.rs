// Domain services
pub mod records;
pub mod vitals;

// Re-export services
pub use records::{
    create_default_records_service, Delay, NoDelay, PatientRecordsService, RecordsServiceError,
    TokioDelay, DEFAULT_FETCH_DELAY,
};
pub use vitals::{generate, Clock, FixedClock, SystemClock, DEFAULT_SERIES_DAYS};
