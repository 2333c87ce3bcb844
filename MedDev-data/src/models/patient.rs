use serde::{Deserialize, Serialize};

/// Resting values a synthetic vitals series oscillates around
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalsBaseline {
    /// Heart rate in beats per minute
    pub heart_rate: f64,

    /// Systolic blood pressure (the higher number)
    pub systolic: f64,

    /// Diastolic blood pressure (the lower number)
    pub diastolic: f64,
}

impl VitalsBaseline {
    pub const fn new(heart_rate: f64, systolic: f64, diastolic: f64) -> Self {
        Self {
            heart_rate,
            systolic,
            diastolic,
        }
    }
}

/// Storage model for a demo patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Unique identifier for the patient
    pub id: u32,

    /// Display name
    pub name: String,

    /// Primary diagnosis shown alongside the record
    pub diagnosis: String,

    /// Baseline the patient's vitals are generated from
    pub baseline: VitalsBaseline,
}
