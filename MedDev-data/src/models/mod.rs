// Storage models
pub mod patient;
pub mod vitals;

pub use patient::{PatientRecord, VitalsBaseline};
pub use vitals::{PatientVitalsSeries, VitalsSample};
