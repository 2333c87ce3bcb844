// MedDev Domain
// This crate contains the decision logic of the portfolio demo and site shell

// Roles, sessions and route permissions
pub mod auth;

// Patient-records view gate
pub mod gate;

// Vitals generation and the simulated records fetch
pub mod services;

// Static site shell: shared fragments and navigation
pub mod site;

// SAP / XML showcase
pub mod showcase;

// Re-export the data models for convenience
pub use meddev_data::models;

// Testing utilities - only available with mock feature
#[cfg(any(test, feature = "mock"))]
pub mod testing;
