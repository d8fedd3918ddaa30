use serde::{Deserialize, Serialize};

use super::catalog::{ClassFormat, Cohort, Course, Currency, PaymentPlan};
use super::pricing::Discount;

/// Personal details collected on the first wizard step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityDetails {
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
}

/// Course and payment selections made on the second wizard step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrollmentChoices {
    pub course: Option<Course>,
    pub cohort: Option<Cohort>,
    pub class_format: Option<ClassFormat>,
    pub payment_plan: Option<PaymentPlan>,
    pub currency: Option<Currency>,
    pub voucher: String,
    pub student_policy: bool,
}

/// Client-held application state. Never persisted; dropped after a successful
/// submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationDraft {
    pub identity: IdentityDetails,
    pub enrollment: EnrollmentChoices,
    /// Outstanding amount tracked for installment plans. Not derived from the fee.
    pub balance_to_pay: u64,
    #[serde(skip)]
    pub(super) discount: Discount,
    /// Code that unlocked `discount`, kept even if the voucher field is edited afterwards.
    #[serde(skip)]
    pub(super) applied_voucher: Option<String>,
}

impl ApplicationDraft {
    /// Discount unlocked by the last voucher application.
    pub fn discount(&self) -> Discount {
        self.discount
    }

    /// Voucher sent with the application. While a discount is applied this is the code that
    /// unlocked it, otherwise whatever is typed in the field.
    pub fn voucher_for_submission(&self) -> Option<String> {
        match &self.applied_voucher {
            Some(code) if self.discount.is_applied() => Some(code.clone()),
            _ => self.enrollment.voucher_code(),
        }
    }

    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.identity.first_name.trim(),
            self.identity.last_name.trim()
        )
        .trim()
        .to_string()
    }
}

/// Every field a draft can report an error against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    Gender,
    DateOfBirth,
    AcademicAchievement,
    AgeRange,
    Country,
    State,
    HowDidYouHear,
    AdvisorId,
    Course,
    Cohort,
    ClassFormat,
    PaymentPlan,
    Currency,
    Voucher,
    StudentPolicy,
}

impl DraftField {
    /// Identity fields that must be filled before leaving the first step.
    pub const REQUIRED_IDENTITY: [DraftField; 11] = [
        DraftField::FirstName,
        DraftField::LastName,
        DraftField::Email,
        DraftField::PhoneNumber,
        DraftField::Gender,
        DraftField::DateOfBirth,
        DraftField::AcademicAchievement,
        DraftField::AgeRange,
        DraftField::Country,
        DraftField::State,
        DraftField::HowDidYouHear,
    ];

    /// Name used in the request body.
    pub const fn wire_name(self) -> &'static str {
        match self {
            DraftField::FirstName => "first_name",
            DraftField::LastName => "last_name",
            DraftField::Email => "email",
            DraftField::PhoneNumber => "phone_number",
            DraftField::Gender => "gender",
            DraftField::DateOfBirth => "date_of_birth",
            DraftField::AcademicAchievement => "academic_achievement",
            DraftField::AgeRange => "age_range",
            DraftField::Country => "country",
            DraftField::State => "state",
            DraftField::HowDidYouHear => "how_did_you_hear",
            DraftField::AdvisorId => "advisor_id",
            DraftField::Course => "course",
            DraftField::Cohort => "cohort",
            DraftField::ClassFormat => "class_format",
            DraftField::PaymentPlan => "payment_plan",
            DraftField::Currency => "currency",
            DraftField::Voucher => "voucher",
            DraftField::StudentPolicy => "student_policy",
        }
    }

    /// Human label shown beside the input.
    pub const fn label(self) -> &'static str {
        match self {
            DraftField::FirstName => "First name",
            DraftField::LastName => "Last name",
            DraftField::Email => "Email address",
            DraftField::PhoneNumber => "Phone number",
            DraftField::Gender => "Gender",
            DraftField::DateOfBirth => "Date of birth",
            DraftField::AcademicAchievement => "Academic achievement",
            DraftField::AgeRange => "Age range",
            DraftField::Country => "Country",
            DraftField::State => "State",
            DraftField::HowDidYouHear => "How did you hear about us",
            DraftField::AdvisorId => "Advisor ID",
            DraftField::Course => "Course",
            DraftField::Cohort => "Cohort",
            DraftField::ClassFormat => "Class format",
            DraftField::PaymentPlan => "Payment plan",
            DraftField::Currency => "Currency",
            DraftField::Voucher => "Voucher",
            DraftField::StudentPolicy => "Student policy",
        }
    }
}

impl IdentityDetails {
    /// Raw text value of an identity field, `None` for non-identity fields.
    pub fn value(&self, field: DraftField) -> Option<&str> {
        let value = match field {
            DraftField::FirstName => &self.first_name,
            DraftField::LastName => &self.last_name,
            DraftField::Email => &self.email,
            DraftField::PhoneNumber => &self.phone_number,
            DraftField::Gender => &self.gender,
            DraftField::DateOfBirth => &self.date_of_birth,
            DraftField::AcademicAchievement => &self.academic_achievement,
            DraftField::AgeRange => &self.age_range,
            DraftField::Country => &self.country,
            DraftField::State => &self.state,
            DraftField::HowDidYouHear => &self.how_did_you_hear,
            DraftField::AdvisorId => return self.advisor_id.as_deref(),
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Mutable handle for form bindings. `None` for the advisor id and non-identity fields.
    pub fn value_mut(&mut self, field: DraftField) -> Option<&mut String> {
        let value = match field {
            DraftField::FirstName => &mut self.first_name,
            DraftField::LastName => &mut self.last_name,
            DraftField::Email => &mut self.email,
            DraftField::PhoneNumber => &mut self.phone_number,
            DraftField::Gender => &mut self.gender,
            DraftField::DateOfBirth => &mut self.date_of_birth,
            DraftField::AcademicAchievement => &mut self.academic_achievement,
            DraftField::AgeRange => &mut self.age_range,
            DraftField::Country => &mut self.country,
            DraftField::State => &mut self.state,
            DraftField::HowDidYouHear => &mut self.how_did_you_hear,
            _ => return None,
        };
        Some(value)
    }

    /// Advisor id with surrounding whitespace removed, `None` when blank.
    pub fn advisor(&self) -> Option<String> {
        self.advisor_id
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }
}

impl EnrollmentChoices {
    /// Voucher as it should travel on the wire.
    pub fn voucher_code(&self) -> Option<String> {
        let trimmed = self.voucher.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}
