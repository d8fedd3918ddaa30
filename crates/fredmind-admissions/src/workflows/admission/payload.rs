use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::catalog::{ClassFormat, Cohort, Course, Currency, PaymentPlan};
use super::draft::{ApplicationDraft, EnrollmentChoices, IdentityDetails};
use super::pricing::FeeSchedule;
use super::validation::{validate_enrollment, validate_identity, ValidationErrors};

/// Flat JSON body sent to `POST {API_BASE_URL}/student-applications`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentApplicationRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub gender: String,
    pub date_of_birth: String,
    pub academic_achievement: String,
    pub age_range: String,
    pub country: String,
    pub state: String,
    pub how_did_you_hear: String,
    pub advisor_id: Option<String>,
    pub course: Course,
    pub cohort: Cohort,
    pub class_format: ClassFormat,
    pub payment_plan: PaymentPlan,
    pub currency: Currency,
    pub voucher: Option<String>,
    pub student_policy: bool,
    pub course_fee: u64,
    pub amount_to_pay: u64,
    pub balance_to_pay: u64,
    pub transaction_fee: u64,
    pub total_amount_due: u64,
    pub currency_symbol: String,
}

impl StudentApplicationRequest {
    /// Serialize a draft, refusing drafts that would not pass every step.
    pub fn from_draft(
        draft: &ApplicationDraft,
        fees: &FeeSchedule,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if let Err(identity_errors) = validate_identity(&draft.identity) {
            errors.extend(identity_errors);
        }
        if let Err(enrollment_errors) = validate_enrollment(&draft.enrollment) {
            errors.extend(enrollment_errors);
        }

        let identity = &draft.identity;
        let enrollment = &draft.enrollment;
        let (
            Some(course),
            Some(cohort),
            Some(class_format),
            Some(payment_plan),
            Some(currency),
            true,
        ) = (
            enrollment.course,
            enrollment.cohort,
            enrollment.class_format,
            enrollment.payment_plan,
            enrollment.currency,
            errors.is_empty(),
        )
        else {
            return Err(errors);
        };

        let payment = fees.breakdown(draft.discount(), draft.balance_to_pay);

        Ok(Self {
            first_name: identity.first_name.trim().to_string(),
            last_name: identity.last_name.trim().to_string(),
            email: identity.email.trim().to_string(),
            phone_number: identity.phone_number.trim().to_string(),
            gender: identity.gender.trim().to_string(),
            date_of_birth: identity.date_of_birth.trim().to_string(),
            academic_achievement: identity.academic_achievement.trim().to_string(),
            age_range: identity.age_range.trim().to_string(),
            country: identity.country.trim().to_string(),
            state: identity.state.trim().to_string(),
            how_did_you_hear: identity.how_did_you_hear.trim().to_string(),
            advisor_id: identity.advisor(),
            course,
            cohort,
            class_format,
            payment_plan,
            currency,
            voucher: draft.voucher_for_submission(),
            student_policy: enrollment.student_policy,
            course_fee: payment.course_fee,
            amount_to_pay: payment.amount_to_pay,
            balance_to_pay: payment.balance_to_pay,
            transaction_fee: payment.transaction_fee,
            total_amount_due: payment.total_amount_due,
            currency_symbol: currency.symbol().to_string(),
        })
    }

    /// Identity section, for re-validation on the receiving side.
    pub fn identity(&self) -> IdentityDetails {
        IdentityDetails {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            gender: self.gender.clone(),
            date_of_birth: self.date_of_birth.clone(),
            academic_achievement: self.academic_achievement.clone(),
            age_range: self.age_range.clone(),
            country: self.country.clone(),
            state: self.state.clone(),
            how_did_you_hear: self.how_did_you_hear.clone(),
            advisor_id: self.advisor_id.clone(),
        }
    }

    pub fn enrollment(&self) -> EnrollmentChoices {
        EnrollmentChoices {
            course: Some(self.course),
            cohort: Some(self.cohort),
            class_format: Some(self.class_format),
            payment_plan: Some(self.payment_plan),
            currency: Some(self.currency),
            voucher: self.voucher.clone().unwrap_or_default(),
            student_policy: self.student_policy,
        }
    }
}

/// Success body returned by the intake endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_url: Option<String>,
}

/// Failure body carried by non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
