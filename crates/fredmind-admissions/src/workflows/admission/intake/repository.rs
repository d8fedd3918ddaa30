use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::catalog::{Cohort, Course};
use super::super::payload::StudentApplicationRequest;

/// Identifier wrapper for received applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntakeStatus {
    /// Waiting on the payment provider handoff.
    PendingPayment,
    Received,
}

impl IntakeStatus {
    pub const fn label(self) -> &'static str {
        match self {
            IntakeStatus::PendingPayment => "pending_payment",
            IntakeStatus::Received => "received",
        }
    }
}

/// Stored application together with intake metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentApplicationRecord {
    pub application_id: ApplicationId,
    pub request: StudentApplicationRequest,
    pub status: IntakeStatus,
    pub received_at: DateTime<Utc>,
    pub payment_url: Option<String>,
}

impl StudentApplicationRecord {
    pub fn receipt(&self) -> ApplicationReceipt {
        ApplicationReceipt {
            application_id: self.application_id.clone(),
            status: self.status.label(),
            course: self.request.course,
            cohort: self.request.cohort,
            total_amount_due: self.request.total_amount_due,
            currency_symbol: self.request.currency_symbol.clone(),
            received_at: self.received_at,
        }
    }
}

/// Public view returned as `data` in intake responses. Identity fields stay private.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationReceipt {
    pub application_id: ApplicationId,
    pub status: &'static str,
    pub course: Course,
    pub cohort: Cohort,
    pub total_amount_due: u64,
    pub currency_symbol: String,
    pub received_at: DateTime<Utc>,
}

/// Storage abstraction so the intake service can be exercised in isolation.
pub trait ApplicationRepository: Send + Sync {
    /// Store a new record. Fails with `Conflict` when the id or e-mail is already taken.
    fn insert(
        &self,
        record: StudentApplicationRecord,
    ) -> Result<StudentApplicationRecord, RepositoryError>;
    fn fetch(&self, id: &ApplicationId)
        -> Result<Option<StudentApplicationRecord>, RepositoryError>;
    /// Case-insensitive lookup by applicant e-mail.
    fn find_by_email(&self, email: &str)
        -> Result<Option<StudentApplicationRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
