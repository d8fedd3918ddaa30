use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use reqwest::Url;

use crate::workflows::admission::FeeSchedule;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub admissions: AdmissionsConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let api_base_url =
            env::var("API_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());
        let is_http = Url::parse(api_base_url.trim())
            .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
            .unwrap_or(false);
        if !is_http {
            return Err(ConfigError::InvalidApiBaseUrl(api_base_url));
        }

        let success_route =
            env::var("APP_SUCCESS_ROUTE").unwrap_or_else(|_| "/dashboard/student".to_string());
        let payment_provider_url = match env::var("PAYMENT_PROVIDER_URL") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                Url::parse(raw.trim())
                    .ok()
                    .filter(|url| matches!(url.scheme(), "http" | "https"))
                    .ok_or(ConfigError::InvalidPaymentProviderUrl(raw))?,
            ),
            _ => None,
        };

        let standard = FeeSchedule::standard();
        let course_fee = read_amount("COURSE_FEE", standard.course_fee)?;
        let transaction_fee = read_amount("TRANSACTION_FEE", standard.transaction_fee)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            admissions: AdmissionsConfig {
                api_base_url,
                success_route,
                payment_provider_url,
                fees: FeeSchedule {
                    course_fee,
                    transaction_fee,
                },
            },
        })
    }
}

fn read_amount(variable: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(variable) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidAmount { variable }),
        Err(_) => Ok(default),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Wizard and intake settings: where applications go and what they cost.
#[derive(Debug, Clone)]
pub struct AdmissionsConfig {
    pub api_base_url: String,
    pub success_route: String,
    pub payment_provider_url: Option<Url>,
    pub fees: FeeSchedule,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidApiBaseUrl(String),
    InvalidPaymentProviderUrl(String),
    InvalidAmount { variable: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidApiBaseUrl(value) => {
                write!(f, "API_BASE_URL must be an http(s) URL, found '{value}'")
            }
            ConfigError::InvalidPaymentProviderUrl(value) => {
                write!(f, "PAYMENT_PROVIDER_URL must be an http(s) URL, found '{value}'")
            }
            ConfigError::InvalidAmount { variable } => {
                write!(f, "{variable} must be a whole, non-negative amount")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidApiBaseUrl(_)
            | ConfigError::InvalidPaymentProviderUrl(_)
            | ConfigError::InvalidAmount { .. } => None,
        }
    }
}
