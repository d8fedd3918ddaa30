//! Student admission wizard and the intake service on the other end of it.
//!
//! The wizard walks an applicant through personal information, course selection and a
//! payment summary, then posts one flat JSON request to the intake endpoint. The intake
//! module implements that endpoint for local development and end-to-end checks.

pub mod catalog;
pub mod draft;
pub mod gateway;
pub mod intake;
pub mod payload;
pub mod pricing;
pub mod validation;
pub mod voucher;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use catalog::{ClassFormat, Cohort, Course, Currency, PaymentPlan};
pub use draft::{ApplicationDraft, DraftField, EnrollmentChoices, IdentityDetails};
pub use gateway::{
    ApplicationGateway, HttpApplicationGateway, SubmissionError, NETWORK_FAILURE,
    REJECTION_FALLBACK,
};
pub use intake::{
    intake_router, ApplicationId, ApplicationReceipt, ApplicationRepository, IntakeError,
    IntakeService, IntakeStatus, RepositoryError, StudentApplicationRecord,
};
pub use payload::{ApiResponse, ErrorBody, StudentApplicationRequest};
pub use pricing::{Discount, FeeSchedule, PaymentBreakdown};
pub use validation::{
    is_valid_email, validate_enrollment, validate_identity, FieldError, ValidationErrors,
};
pub use voucher::{VoucherNotice, VoucherStatus, VOUCHER_CODE};
pub use wizard::{
    AdmissionWizard, ApplicationSummary, Redirect, SubmissionState, SubmitError, WizardStep,
};
