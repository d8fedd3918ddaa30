use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use reqwest::Url;
use tracing::info;

use super::super::payload::StudentApplicationRequest;
use super::super::pricing::{Discount, FeeSchedule};
use super::super::validation::{validate_identity, ValidationErrors};
use super::super::voucher::discount_for;
use super::repository::{
    ApplicationId, ApplicationRepository, IntakeStatus, RepositoryError, StudentApplicationRecord,
};

/// Service validating, pricing and storing incoming student applications.
pub struct IntakeService<R> {
    repository: Arc<R>,
    fees: FeeSchedule,
    payment_provider_url: Option<Url>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("stu-{id:06}"))
}

impl<R> IntakeService<R>
where
    R: ApplicationRepository + 'static,
{
    pub fn new(repository: Arc<R>, fees: FeeSchedule) -> Self {
        Self {
            repository,
            fees,
            payment_provider_url: None,
        }
    }

    /// Issue payment handoff links rooted at `base_url` for accepted applications.
    pub fn with_payment_provider(mut self, base_url: Url) -> Self {
        self.payment_provider_url = Some(base_url);
        self
    }

    pub fn fees(&self) -> &FeeSchedule {
        &self.fees
    }

    /// Validate and store an application, returning the stored record.
    pub fn submit(
        &self,
        request: StudentApplicationRequest,
    ) -> Result<StudentApplicationRecord, IntakeError> {
        validate_identity(&request.identity()).map_err(IntakeError::Invalid)?;
        if !request.student_policy {
            return Err(IntakeError::PolicyNotAccepted);
        }
        self.check_payment(&request)?;

        if self.repository.find_by_email(&request.email)?.is_some() {
            return Err(IntakeError::DuplicateEmail);
        }

        let application_id = next_application_id();
        let payment_url = self
            .payment_provider_url
            .as_ref()
            .map(|base| payment_link(base, &application_id, &request));
        let status = if payment_url.is_some() {
            IntakeStatus::PendingPayment
        } else {
            IntakeStatus::Received
        };

        let record = StudentApplicationRecord {
            application_id,
            request,
            status,
            received_at: Utc::now(),
            payment_url,
        };

        let stored = self.repository.insert(record).map_err(|err| match err {
            RepositoryError::Conflict => IntakeError::DuplicateEmail,
            other => IntakeError::Repository(other),
        })?;

        info!(
            application_id = %stored.application_id.0,
            course = stored.request.course.label(),
            status = stored.status.label(),
            "student application received"
        );
        Ok(stored)
    }

    /// Fetch an application for status lookups.
    pub fn get(
        &self,
        application_id: &ApplicationId,
    ) -> Result<StudentApplicationRecord, IntakeError> {
        let record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Compare the client's figures with the fee schedule.
    ///
    /// A discounted amount is only honored when the request carries the valid voucher.
    fn check_payment(&self, request: &StudentApplicationRequest) -> Result<(), IntakeError> {
        let discount = if request.amount_to_pay == self.fees.course_fee {
            Discount::NONE
        } else {
            discount_for(request.voucher.as_deref())
        };
        let expected = self.fees.breakdown(discount, request.balance_to_pay);

        let checks = [
            ("course_fee", expected.course_fee, request.course_fee),
            (
                "transaction_fee",
                expected.transaction_fee,
                request.transaction_fee,
            ),
            ("amount_to_pay", expected.amount_to_pay, request.amount_to_pay),
            (
                "total_amount_due",
                expected.total_amount_due,
                request.total_amount_due,
            ),
        ];
        for (field, expected, found) in checks {
            if expected != found {
                return Err(IntakeError::AmountMismatch {
                    field,
                    expected,
                    found,
                });
            }
        }

        if request.currency_symbol != request.currency.symbol() {
            return Err(IntakeError::CurrencySymbolMismatch {
                expected: request.currency.symbol(),
            });
        }

        Ok(())
    }
}

/// Append the handoff parameters to the provider URL, keeping any query it already has.
fn payment_link(
    base: &Url,
    application_id: &ApplicationId,
    request: &StudentApplicationRequest,
) -> String {
    let mut link = base.clone();
    link.query_pairs_mut()
        .append_pair("reference", &application_id.0)
        .append_pair("amount", &request.total_amount_due.to_string())
        .append_pair("currency", request.currency.code());
    link.into()
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("{0}")]
    Invalid(ValidationErrors),
    #[error("You must accept the student policy to continue")]
    PolicyNotAccepted,
    #[error("{field} does not match the fee schedule (expected {expected}, found {found})")]
    AmountMismatch {
        field: &'static str,
        expected: u64,
        found: u64,
    },
    #[error("currency_symbol must be '{expected}' for the selected currency")]
    CurrencySymbolMismatch { expected: &'static str },
    #[error("Email already used")]
    DuplicateEmail,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
