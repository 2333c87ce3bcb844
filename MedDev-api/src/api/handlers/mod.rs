pub mod auth;
pub mod health;
pub mod views;

// Re-export handlers for easier imports
pub use auth::{current_session, login, logout};
pub use health::health_check;
pub use views::{ci_cd, home, mentoring, patient_records, sap_xml};
