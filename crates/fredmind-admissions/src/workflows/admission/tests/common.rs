use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use reqwest::Url;
use serde_json::Value;

use crate::workflows::admission::catalog::{ClassFormat, Cohort, Course, Currency, PaymentPlan};
use crate::workflows::admission::draft::{ApplicationDraft, EnrollmentChoices, IdentityDetails};
use crate::workflows::admission::gateway::{ApplicationGateway, SubmissionError};
use crate::workflows::admission::intake::{
    ApplicationId, ApplicationRepository, IntakeService, RepositoryError,
    StudentApplicationRecord,
};
use crate::workflows::admission::payload::{ApiResponse, StudentApplicationRequest};
use crate::workflows::admission::pricing::FeeSchedule;
use crate::workflows::admission::wizard::AdmissionWizard;

pub(super) const SUCCESS_ROUTE: &str = "/dashboard/student";

pub(super) fn identity() -> IdentityDetails {
    IdentityDetails {
        first_name: "Chiamaka".to_string(),
        last_name: "Eze".to_string(),
        email: "chiamaka.eze@example.com".to_string(),
        phone_number: "+2348031234567".to_string(),
        gender: "Female".to_string(),
        date_of_birth: "2001-04-17".to_string(),
        academic_achievement: "Undergraduate".to_string(),
        age_range: "18-24".to_string(),
        country: "Nigeria".to_string(),
        state: "Lagos".to_string(),
        how_did_you_hear: "Instagram".to_string(),
        advisor_id: None,
    }
}

pub(super) fn enrollment() -> EnrollmentChoices {
    EnrollmentChoices {
        course: Some(Course::FrontendEngineering),
        cohort: Some(Cohort::January2026),
        class_format: Some(ClassFormat::Virtual),
        payment_plan: Some(PaymentPlan::Full),
        currency: Some(Currency::Ngn),
        voucher: String::new(),
        student_policy: true,
    }
}

pub(super) fn draft() -> ApplicationDraft {
    ApplicationDraft {
        identity: identity(),
        enrollment: enrollment(),
        ..ApplicationDraft::default()
    }
}

pub(super) fn provider(raw: &str) -> Url {
    Url::parse(raw).expect("provider url parses")
}

pub(super) fn wizard() -> AdmissionWizard {
    AdmissionWizard::new(FeeSchedule::standard(), SUCCESS_ROUTE)
}

/// Wizard already sitting on the summary step with a complete draft.
pub(super) fn wizard_on_summary() -> AdmissionWizard {
    let mut wizard = wizard().with_draft(draft());
    wizard.next().expect("personal info valid");
    wizard.next().expect("course selection valid");
    wizard
}

pub(super) fn request() -> StudentApplicationRequest {
    StudentApplicationRequest::from_draft(&draft(), &FeeSchedule::standard())
        .expect("draft is complete")
}

pub(super) fn request_for(email: &str) -> StudentApplicationRequest {
    let mut request = request();
    request.email = email.to_string();
    request
}

/// Gateway returning a canned outcome and recording every request.
pub(super) struct StubGateway {
    outcome: Result<ApiResponse, SubmissionError>,
    requests: Mutex<Vec<StudentApplicationRequest>>,
}

impl StubGateway {
    pub(super) fn accepting(payment_url: Option<&str>) -> Self {
        Self::with_outcome(Ok(ApiResponse {
            message: "Application submitted successfully".to_string(),
            data: Value::Null,
            payment_url: payment_url.map(str::to_string),
        }))
    }

    pub(super) fn rejecting(message: &str) -> Self {
        Self::with_outcome(Err(SubmissionError::Rejected {
            status: 400,
            message: message.to_string(),
        }))
    }

    pub(super) fn with_outcome(outcome: Result<ApiResponse, SubmissionError>) -> Self {
        Self {
            outcome,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn requests(&self) -> Vec<StudentApplicationRequest> {
        self.requests.lock().expect("lock").clone()
    }
}

impl ApplicationGateway for StubGateway {
    async fn submit_application(
        &self,
        request: &StudentApplicationRequest,
    ) -> Result<ApiResponse, SubmissionError> {
        self.requests.lock().expect("lock").push(request.clone());
        self.outcome.clone()
    }
}

/// Gateway that never answers.
pub(super) struct HangingGateway;

impl ApplicationGateway for HangingGateway {
    async fn submit_application(
        &self,
        _request: &StudentApplicationRequest,
    ) -> Result<ApiResponse, SubmissionError> {
        std::future::pending().await
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<HashMap<ApplicationId, StudentApplicationRecord>>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("lock").len()
    }
}

impl ApplicationRepository for MemoryRepository {
    fn insert(
        &self,
        record: StudentApplicationRecord,
    ) -> Result<StudentApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        let email_taken = guard
            .values()
            .any(|stored| stored.request.email.eq_ignore_ascii_case(&record.request.email));
        if email_taken || guard.contains_key(&record.application_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.application_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<StudentApplicationRecord>, RepositoryError> {
        Ok(self.records.lock().expect("lock").get(id).cloned())
    }

    fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StudentApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("lock");
        Ok(guard
            .values()
            .find(|stored| stored.request.email.eq_ignore_ascii_case(email.trim()))
            .cloned())
    }
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(
        &self,
        _record: StudentApplicationRecord,
    ) -> Result<StudentApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(
        &self,
        _id: &ApplicationId,
    ) -> Result<Option<StudentApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_by_email(
        &self,
        _email: &str,
    ) -> Result<Option<StudentApplicationRecord>, RepositoryError> {
        Ok(None)
    }
}

pub(super) fn build_service() -> (IntakeService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = IntakeService::new(repository.clone(), FeeSchedule::standard());
    (service, repository)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
