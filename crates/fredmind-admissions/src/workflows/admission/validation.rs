use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use super::draft::{DraftField, EnrollmentChoices, IdentityDetails};

/// Inline error attached to a single form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: DraftField,
    pub message: String,
}

impl FieldError {
    fn new(field: DraftField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// All field errors produced by one step validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn fields(&self) -> Vec<DraftField> {
        self.errors.iter().map(|error| error.field).collect()
    }

    /// Message for a field, if that field failed.
    pub fn message_for(&self, field: DraftField) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    fn push(&mut self, field: DraftField, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            f.write_str(&error.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Check the personal information step.
pub fn validate_identity(identity: &IdentityDetails) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    for field in DraftField::REQUIRED_IDENTITY {
        let value = identity.value(field).unwrap_or_default().trim();
        if value.is_empty() {
            errors.push(field, format!("{} is required", field.label()));
            continue;
        }

        match field {
            DraftField::Email if !is_valid_email(value) => {
                errors.push(field, "Please enter a valid email address");
            }
            DraftField::DateOfBirth if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() => {
                errors.push(field, "Date of birth must be a valid date (YYYY-MM-DD)");
            }
            _ => {}
        }
    }

    errors.into_result()
}

/// Check the course selection step. The voucher is optional and only checked on apply.
pub fn validate_enrollment(enrollment: &EnrollmentChoices) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if enrollment.course.is_none() {
        errors.push(DraftField::Course, "Please select a course");
    }
    if enrollment.cohort.is_none() {
        errors.push(DraftField::Cohort, "Please select a cohort");
    }
    if enrollment.class_format.is_none() {
        errors.push(DraftField::ClassFormat, "Please select a class format");
    }
    if enrollment.payment_plan.is_none() {
        errors.push(DraftField::PaymentPlan, "Please select a payment plan");
    }
    if enrollment.currency.is_none() {
        errors.push(DraftField::Currency, "Please select a currency");
    }
    if !enrollment.student_policy {
        errors.push(
            DraftField::StudentPolicy,
            "You must accept the student policy to continue",
        );
    }

    errors.into_result()
}

/// Basic `local@domain.tld` shape check.
pub fn is_valid_email(raw: &str) -> bool {
    let candidate = raw.trim();
    if candidate.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return false;
    }

    labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
}
