// MedDev Data
// This crate holds the storage models and the sources the demo reads from

// Storage models for patients and vitals
pub mod models;

// Repository implementations for demo data access
pub mod repository;

// Static HTML fragment sources for the site shell
pub mod fragments;
