use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single day of vitals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VitalsSample {
    /// Calendar day of the sample, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,

    /// Heart rate in beats per minute
    pub heart_rate: i32,

    /// Systolic blood pressure in mmHg
    pub systolic: i32,

    /// Diastolic blood pressure in mmHg
    pub diastolic: i32,
}

/// Vitals time series for one patient, ordered oldest to newest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientVitalsSeries {
    pub patient_id: u32,
    pub name: String,
    pub samples: Vec<VitalsSample>,
}

impl PatientVitalsSeries {
    /// Most recent sample, if any
    pub fn latest(&self) -> Option<&VitalsSample> {
        self.samples.last()
    }
}
