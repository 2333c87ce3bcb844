use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use meddev_domain::auth::Route;
use meddev_domain::gate::{GateView, PatientRecordsGate};
use meddev_domain::models::{PatientVitalsSeries, VitalsSample};

/// One day of vitals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VitalsSampleResponse {
    #[schema(value_type = String, format = Date, example = "2025-07-22")]
    pub date: NaiveDate,
    pub heart_rate: i32,
    pub systolic: i32,
    pub diastolic: i32,
}

impl From<&VitalsSample> for VitalsSampleResponse {
    fn from(sample: &VitalsSample) -> Self {
        Self {
            date: sample.date,
            heart_rate: sample.heart_rate,
            systolic: sample.systolic,
            diastolic: sample.diastolic,
        }
    }
}

/// Vitals series of one patient, oldest sample first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PatientVitalsResponse {
    pub patient_id: u32,
    pub name: String,
    pub samples: Vec<VitalsSampleResponse>,
}

impl From<&PatientVitalsSeries> for PatientVitalsResponse {
    fn from(series: &PatientVitalsSeries) -> Self {
        Self {
            patient_id: series.patient_id,
            name: series.name.clone(),
            samples: series.samples.iter().map(VitalsSampleResponse::from).collect(),
        }
    }
}

/// What the Patient Records view shows
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PatientRecordsResponse {
    /// Gate state: `unauthenticated`, `insufficient_role`, `loading`, `ready` or `fetch_failed`
    pub state: String,

    /// Fallback text, present unless loading or ready
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Vitals series, present once ready
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patients: Option<Vec<PatientVitalsResponse>>,
}

impl From<&PatientRecordsGate> for PatientRecordsResponse {
    fn from(gate: &PatientRecordsGate) -> Self {
        let state = gate.state().name().to_string();
        match gate.view() {
            GateView::Message(message) => Self {
                state,
                message: Some(message.to_string()),
                patients: None,
            },
            GateView::Loading => Self {
                state,
                message: None,
                patients: None,
            },
            GateView::Records(series) => Self {
                state,
                message: None,
                patients: Some(series.iter().map(PatientVitalsResponse::from).collect()),
            },
        }
    }
}

/// Header of an ungated content section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SectionResponse {
    #[schema(example = "/ci-cd")]
    pub route: String,
    pub title: String,
}

impl From<Route> for SectionResponse {
    fn from(route: Route) -> Self {
        Self {
            route: route.path().to_string(),
            title: route.title().to_string(),
        }
    }
}

/// SAP / XML section with the highlighted sample document
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShowcaseResponse {
    pub route: String,
    pub title: String,

    /// Toggle button text for the visible snippet
    pub toggle_label: String,

    /// Escaped, span-wrapped HTML of the sample document
    pub xml_html: String,
}
