use std::future::Future;

use reqwest::header::CONTENT_TYPE;
use tracing::{info, warn};

use super::payload::{ApiResponse, ErrorBody, StudentApplicationRequest};

/// Message used when a rejection carries no usable `error` field.
pub const REJECTION_FALLBACK: &str = "Failed to submit application";
/// Message used when the request never produced a response.
pub const NETWORK_FAILURE: &str = "Network error occurred";

/// Outbound seam for the final wizard submission.
pub trait ApplicationGateway: Send + Sync {
    fn submit_application(
        &self,
        request: &StudentApplicationRequest,
    ) -> impl Future<Output = Result<ApiResponse, SubmissionError>> + Send;
}

/// Failure of the outbound call, reduced to one human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("Network error occurred")]
    Network,
}

impl SubmissionError {
    /// Build a rejection from a non-2xx status and its raw body.
    pub fn from_rejection(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .map(|body| body.error)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| REJECTION_FALLBACK.to_string());
        Self::Rejected { status, message }
    }
}

/// `reqwest` backed gateway posting JSON to the intake endpoint.
#[derive(Debug, Clone)]
pub struct HttpApplicationGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpApplicationGateway {
    pub fn new(api_base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), api_base_url)
    }

    pub fn with_client(client: reqwest::Client, api_base_url: &str) -> Self {
        let endpoint = format!(
            "{}/student-applications",
            api_base_url.trim().trim_end_matches('/')
        );
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ApplicationGateway for HttpApplicationGateway {
    async fn submit_application(
        &self,
        request: &StudentApplicationRequest,
    ) -> Result<ApiResponse, SubmissionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|err| {
                warn!(endpoint = %self.endpoint, error = %err, "application request failed");
                SubmissionError::Network
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|err| {
            warn!(endpoint = %self.endpoint, error = %err, "application response unreadable");
            SubmissionError::Network
        })?;

        if !status.is_success() {
            let error = SubmissionError::from_rejection(status.as_u16(), &body);
            warn!(status = status.as_u16(), %error, "application rejected");
            return Err(error);
        }

        let parsed = match serde_json::from_slice::<ApiResponse>(&body) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(error = %err, "application accepted with unparseable body");
                ApiResponse::default()
            }
        };
        info!(
            status = status.as_u16(),
            payment_handoff = parsed.payment_url.is_some(),
            "application accepted"
        );
        Ok(parsed)
    }
}
