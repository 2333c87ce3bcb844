// Repository module structure
pub mod errors;
mod in_memory;
mod patients;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use in_memory::InMemoryPatientRepository;
pub use patients::{demo_roster, PatientRepositoryTrait};

// Re-export test modules for both testing and when mock feature is enabled
#[cfg(any(test, feature = "mock"))]
pub use patients::tests;
