use serde::Serialize;
use tracing::{info, warn};

use super::draft::ApplicationDraft;
use super::gateway::{ApplicationGateway, SubmissionError};
use super::payload::{ApiResponse, StudentApplicationRequest};
use super::pricing::{FeeSchedule, PaymentBreakdown};
use super::validation::{validate_enrollment, validate_identity, ValidationErrors};
use super::voucher::{self, VoucherNotice};
use crate::config::AdmissionsConfig;

/// Steps of the admission wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    PersonalInfo,
    CourseSelection,
    Summary,
}

impl WizardStep {
    /// One-based position for progress indicators.
    pub const fn position(self) -> u8 {
        match self {
            WizardStep::PersonalInfo => 1,
            WizardStep::CourseSelection => 2,
            WizardStep::Summary => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            WizardStep::PersonalInfo => "Personal information",
            WizardStep::CourseSelection => "Course selection",
            WizardStep::Summary => "Summary & payment",
        }
    }

    const fn following(self) -> Self {
        match self {
            WizardStep::PersonalInfo => WizardStep::CourseSelection,
            WizardStep::CourseSelection | WizardStep::Summary => WizardStep::Summary,
        }
    }

    const fn preceding(self) -> Self {
        match self {
            WizardStep::PersonalInfo | WizardStep::CourseSelection => WizardStep::PersonalInfo,
            WizardStep::Summary => WizardStep::CourseSelection,
        }
    }
}

/// Progress of the final submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Processing,
    Failed(String),
    Succeeded,
}

/// Where the browser goes once the application is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
    /// Hand off to the external payment provider.
    PaymentProvider(String),
    /// Local confirmation route.
    SuccessRoute(String),
}

impl Redirect {
    pub fn location(&self) -> &str {
        match self {
            Redirect::PaymentProvider(url) | Redirect::SuccessRoute(url) => url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("applications can only be submitted from the summary step (currently on {})", .step.label())]
    NotOnSummary { step: WizardStep },
    #[error("application is incomplete: {0}")]
    Incomplete(ValidationErrors),
    #[error("an application submission is already in progress")]
    InFlight,
    #[error("no application submission is in progress")]
    NotInFlight,
    #[error(transparent)]
    Gateway(#[from] SubmissionError),
}

/// Read-only view rendered on the summary step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationSummary {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub course: Option<&'static str>,
    pub cohort: Option<&'static str>,
    pub class_format: Option<&'static str>,
    pub payment_plan: Option<&'static str>,
    pub currency_symbol: &'static str,
    pub voucher_applied: bool,
    pub payment: PaymentBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance_to_pay: Option<u64>,
}

/// Multi-step admission form: personal info, course selection, then summary.
#[derive(Debug, Clone)]
pub struct AdmissionWizard {
    draft: ApplicationDraft,
    step: WizardStep,
    fees: FeeSchedule,
    success_route: String,
    field_errors: ValidationErrors,
    voucher_notice: Option<VoucherNotice>,
    submission: SubmissionState,
}

impl AdmissionWizard {
    pub fn new(fees: FeeSchedule, success_route: impl Into<String>) -> Self {
        Self {
            draft: ApplicationDraft::default(),
            step: WizardStep::PersonalInfo,
            fees,
            success_route: success_route.into(),
            field_errors: ValidationErrors::default(),
            voucher_notice: None,
            submission: SubmissionState::Idle,
        }
    }

    pub fn from_config(config: &AdmissionsConfig) -> Self {
        Self::new(config.fees, config.success_route.clone())
    }

    /// Start from a prepared draft, e.g. one loaded from disk.
    pub fn with_draft(mut self, draft: ApplicationDraft) -> Self {
        self.draft = draft;
        self
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &ApplicationDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ApplicationDraft {
        &mut self.draft
    }

    pub fn fees(&self) -> &FeeSchedule {
        &self.fees
    }

    /// Errors from the last rejected `next()`, cleared on success.
    pub fn field_errors(&self) -> &ValidationErrors {
        &self.field_errors
    }

    pub fn voucher_notice(&self) -> Option<&VoucherNotice> {
        self.voucher_notice.as_ref()
    }

    pub fn submission_state(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn is_processing(&self) -> bool {
        matches!(self.submission, SubmissionState::Processing)
    }

    /// Failure banner shown above the summary step.
    pub fn banner(&self) -> Option<&str> {
        match &self.submission {
            SubmissionState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Label of the final action button.
    pub fn submit_label(&self) -> &'static str {
        if self.is_processing() {
            "Processing..."
        } else {
            "Submit Application"
        }
    }

    /// Validate the active step and move forward when it passes.
    ///
    /// On the summary step there is nowhere further to go and the step is returned unchanged.
    pub fn next(&mut self) -> Result<WizardStep, ValidationErrors> {
        let outcome = match self.step {
            WizardStep::PersonalInfo => validate_identity(&self.draft.identity),
            WizardStep::CourseSelection => validate_enrollment(&self.draft.enrollment),
            WizardStep::Summary => Ok(()),
        };

        match outcome {
            Ok(()) => {
                let from = self.step;
                self.step = self.step.following();
                self.field_errors = ValidationErrors::default();
                info!(from = ?from, to = ?self.step, "wizard advanced");
                Ok(self.step)
            }
            Err(errors) => {
                info!(step = ?self.step, failures = errors.len(), "wizard step rejected");
                self.field_errors = errors.clone();
                Err(errors)
            }
        }
    }

    /// Move back one step. Always allowed.
    pub fn back(&mut self) -> WizardStep {
        self.step = self.step.preceding();
        self.field_errors = ValidationErrors::default();
        self.step
    }

    /// Evaluate the voucher currently typed into the draft.
    pub fn apply_voucher(&mut self) -> VoucherNotice {
        let notice = voucher::apply_voucher(&mut self.draft);
        self.voucher_notice = Some(notice.clone());
        notice
    }

    pub fn payment(&self) -> PaymentBreakdown {
        self.fees.breakdown(self.draft.discount(), self.draft.balance_to_pay)
    }

    pub fn summary(&self) -> ApplicationSummary {
        let enrollment = &self.draft.enrollment;
        let payment = self.payment();

        ApplicationSummary {
            full_name: self.draft.full_name(),
            email: self.draft.identity.email.trim().to_string(),
            phone_number: self.draft.identity.phone_number.trim().to_string(),
            course: enrollment.course.map(|course| course.label()),
            cohort: enrollment.cohort.map(|cohort| cohort.label()),
            class_format: enrollment.class_format.map(|format| format.label()),
            payment_plan: enrollment.payment_plan.map(|plan| plan.label()),
            currency_symbol: enrollment
                .currency
                .map(|currency| currency.symbol())
                .unwrap_or_default(),
            voucher_applied: payment.discount.is_applied(),
            balance_to_pay: payment.visible_balance(enrollment.payment_plan),
            payment,
        }
    }

    /// Build the request for the current draft and mark the submission as processing.
    ///
    /// Rejected while another submission is in flight. Pair with [`Self::finish_submit`], or
    /// [`Self::abandon_submit`] when the call is given up.
    pub fn begin_submit(&mut self) -> Result<StudentApplicationRequest, SubmitError> {
        if self.is_processing() {
            return Err(SubmitError::InFlight);
        }
        if self.step != WizardStep::Summary {
            return Err(SubmitError::NotOnSummary { step: self.step });
        }

        let request = StudentApplicationRequest::from_draft(&self.draft, &self.fees)
            .map_err(SubmitError::Incomplete)?;

        self.submission = SubmissionState::Processing;
        let email_domain = request
            .email
            .split_once('@')
            .map(|(_, domain)| domain)
            .unwrap_or_default();
        info!(
            email_domain,
            course = request.course.label(),
            total_amount_due = request.total_amount_due,
            "submitting application"
        );
        Ok(request)
    }

    /// Settle the in-flight submission with the gateway outcome.
    ///
    /// On success the draft is discarded and the redirect returned; on failure the wizard
    /// stays on the summary step with the message as banner.
    pub fn finish_submit(
        &mut self,
        outcome: Result<ApiResponse, SubmissionError>,
    ) -> Result<Redirect, SubmitError> {
        if !self.is_processing() {
            return Err(SubmitError::NotInFlight);
        }

        match outcome {
            Ok(response) => {
                let redirect = match response.payment_url.filter(|url| !url.trim().is_empty()) {
                    Some(url) => Redirect::PaymentProvider(url),
                    None => Redirect::SuccessRoute(self.success_route.clone()),
                };
                self.draft = ApplicationDraft::default();
                self.field_errors = ValidationErrors::default();
                self.voucher_notice = None;
                self.step = WizardStep::PersonalInfo;
                self.submission = SubmissionState::Succeeded;
                info!(location = redirect.location(), "application submitted");
                Ok(redirect)
            }
            Err(error) => {
                warn!(%error, "application submission failed");
                self.submission = SubmissionState::Failed(error.to_string());
                Err(SubmitError::Gateway(error))
            }
        }
    }

    /// Drop an in-flight submission without an outcome. The draft is kept.
    pub fn abandon_submit(&mut self) {
        if self.is_processing() {
            warn!("application submission abandoned");
            self.submission = SubmissionState::Idle;
        }
    }

    /// Send the application through `gateway`.
    ///
    /// If the returned future is dropped before the gateway answers, the wizard goes back
    /// to idle with the draft intact.
    pub async fn submit<G>(&mut self, gateway: &G) -> Result<Redirect, SubmitError>
    where
        G: ApplicationGateway,
    {
        let request = self.begin_submit()?;
        let pending = PendingSubmission {
            wizard: self,
            settled: false,
        };
        let outcome = gateway.submit_application(&request).await;
        pending.settle(outcome)
    }
}

/// Resets the wizard to idle unless the submission it guards was settled.
struct PendingSubmission<'a> {
    wizard: &'a mut AdmissionWizard,
    settled: bool,
}

impl PendingSubmission<'_> {
    fn settle(
        mut self,
        outcome: Result<ApiResponse, SubmissionError>,
    ) -> Result<Redirect, SubmitError> {
        self.settled = true;
        self.wizard.finish_submit(outcome)
    }
}

impl Drop for PendingSubmission<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.wizard.abandon_submit();
        }
    }
}
