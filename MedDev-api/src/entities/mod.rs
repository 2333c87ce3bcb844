// Public entities for the MedDev API
// This module contains data structures that are shared across the application boundary

// Common entities for error handling
pub mod common;

// Session entities
pub mod session;

// View entities
pub mod views;
