use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::admission::SubmitError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Draft(serde_json::Error),
    Submission(SubmitError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Draft(err) => write!(f, "draft could not be read: {}", err),
            AppError::Submission(err) => write!(f, "submission error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Draft(err) => Some(err),
            AppError::Submission(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Draft(value)
    }
}

impl From<SubmitError> for AppError {
    fn from(value: SubmitError) -> Self {
        Self::Submission(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn wrapped_errors_keep_their_source() {
        let io = AppError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "draft.json",
        ));
        assert_eq!(io.to_string(), "io error: draft.json");
        assert!(io.source().is_some());

        let draft = AppError::from(
            serde_json::from_str::<serde_json::Value>("{").expect_err("truncated json"),
        );
        assert!(draft.to_string().starts_with("draft could not be read: "));

        let submission = AppError::from(SubmitError::InFlight);
        assert_eq!(
            submission.to_string(),
            "submission error: an application submission is already in progress"
        );
        assert_eq!(
            submission.source().map(ToString::to_string).as_deref(),
            Some("an application submission is already in progress")
        );
    }
}
