//! Receiving side of the student application contract.

pub mod repository;
pub mod router;
pub mod service;

pub use repository::{
    ApplicationId, ApplicationReceipt, ApplicationRepository, IntakeStatus, RepositoryError,
    StudentApplicationRecord,
};
pub use router::intake_router;
pub use service::{IntakeError, IntakeService};
