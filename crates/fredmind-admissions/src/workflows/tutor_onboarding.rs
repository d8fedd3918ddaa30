//! Tutor onboarding form: one screen, validated as a whole.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use super::admission::is_valid_email;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Qualification {
    Diploma,
    #[serde(rename = "Bachelor's")]
    Bachelors,
    #[serde(rename = "Master's")]
    Masters,
    #[serde(rename = "PhD")]
    Doctorate,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Experience {
    #[serde(rename = "<1 Year")]
    UnderOneYear,
    #[serde(rename = "1-3 Years")]
    OneToThreeYears,
    #[serde(rename = "3-5 Years")]
    ThreeToFiveYears,
    #[serde(rename = ">5 Years")]
    OverFiveYears,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpertiseArea {
    #[serde(rename = "Frontend Engineering")]
    FrontendEngineering,
    #[serde(rename = "Product Marketing")]
    ProductMarketing,
    #[serde(rename = "Data Science")]
    DataScience,
    #[serde(rename = "Backend Engineering")]
    BackendEngineering,
}

/// Application submitted by a prospective tutor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorApplication {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub linked_in: String,
    pub highest_qualification: Option<Qualification>,
    pub years_of_experience: Option<Experience>,
    pub certifications: Option<String>,
    pub areas_of_expertise: Vec<ExpertiseArea>,
    pub schedule: String,
    pub timezone: String,
    pub statement: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TutorField {
    FullName,
    Email,
    PhoneNumber,
    LinkedIn,
    HighestQualification,
    YearsOfExperience,
    AreasOfExpertise,
    Schedule,
    Timezone,
    Statement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TutorFieldError {
    pub field: TutorField,
    pub message: &'static str,
}

const MIN_PHONE_LENGTH: usize = 10;
const MIN_STATEMENT_LENGTH: usize = 10;

impl TutorApplication {
    /// Every failing field, in form order.
    pub fn validate(&self) -> Result<(), Vec<TutorFieldError>> {
        let mut errors = Vec::new();
        let mut fail = |field, message| errors.push(TutorFieldError { field, message });

        if self.full_name.trim().is_empty() {
            fail(TutorField::FullName, "Full name is required");
        }
        if !is_valid_email(&self.email) {
            fail(TutorField::Email, "Invalid email address");
        }
        if self.phone_number.trim().chars().count() < MIN_PHONE_LENGTH {
            fail(
                TutorField::PhoneNumber,
                "Phone number must be at least 10 digits",
            );
        }
        if !is_profile_url(&self.linked_in) {
            fail(TutorField::LinkedIn, "Enter a valid LinkedIn URL");
        }
        if self.highest_qualification.is_none() {
            fail(
                TutorField::HighestQualification,
                "Please select a qualification",
            );
        }
        if self.years_of_experience.is_none() {
            fail(
                TutorField::YearsOfExperience,
                "Please select years of experience",
            );
        }
        if self.areas_of_expertise.is_empty() {
            fail(TutorField::AreasOfExpertise, "Select at least one area");
        }
        if self.schedule.trim().is_empty() {
            fail(TutorField::Schedule, "Schedule is required");
        }
        if self.timezone.trim().is_empty() {
            fail(TutorField::Timezone, "Timezone is required");
        }
        if self.statement.trim().chars().count() < MIN_STATEMENT_LENGTH {
            fail(
                TutorField::Statement,
                "Statement must be at least 10 characters",
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Add or remove an area, mirroring the checkbox list.
    pub fn toggle_expertise(&mut self, area: ExpertiseArea) {
        if let Some(index) = self.areas_of_expertise.iter().position(|a| *a == area) {
            self.areas_of_expertise.remove(index);
        } else {
            self.areas_of_expertise.push(area);
        }
    }
}

fn is_profile_url(raw: &str) -> bool {
    match Url::parse(raw.trim()) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

pub fn tutor_router() -> Router {
    Router::new().route("/tutor-applications", post(submit_tutor_application))
}

pub(crate) async fn submit_tutor_application(
    payload: Result<Json<TutorApplication>, JsonRejection>,
) -> Response {
    let Json(application) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            let body = json!({ "error": rejection.body_text(), "fields": [] });
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
    };

    match application.validate() {
        Ok(()) => {
            info!(
                areas = application.areas_of_expertise.len(),
                "tutor application received"
            );
            let body = json!({
                "message": "Tutor application submitted successfully",
                "data": {
                    "full_name": application.full_name.trim(),
                    "email": application.email.trim(),
                },
            });
            (StatusCode::CREATED, Json(body)).into_response()
        }
        Err(errors) => {
            let body = json!({
                "error": errors[0].message,
                "fields": errors,
            });
            (StatusCode::BAD_REQUEST, Json(body)).into_response()
        }
    }
}
