use fredmind_admissions::workflows::admission::{
    ApplicationId, ApplicationRepository, Currency, PaymentPlan, RepositoryError,
    StudentApplicationRecord,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local store backing the intake service.
#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<HashMap<ApplicationId, StudentApplicationRecord>>>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(
        &self,
        record: StudentApplicationRecord,
    ) -> Result<StudentApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
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
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StudentApplicationRecord>, RepositoryError> {
        let email = email.trim();
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .find(|record| record.request.email.trim().eq_ignore_ascii_case(email))
            .cloned())
    }
}

pub(crate) fn parse_plan(raw: &str) -> Result<PaymentPlan, String> {
    PaymentPlan::from_label(raw)
        .ok_or_else(|| format!("unknown payment plan '{raw}' (expected full or installments)"))
}

pub(crate) fn parse_currency(raw: &str) -> Result<Currency, String> {
    Currency::from_code(raw)
        .ok_or_else(|| format!("unknown currency '{raw}' (expected ngn, usd or crypto)"))
}
