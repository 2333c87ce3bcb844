// MedDev-api lib.rs
//
// HTTP surface of the MedDev demo: session endpoints, gated views and the
// static site fragments.

// Public modules
pub mod api;
pub mod config;
pub mod entities;
pub mod openapi;
