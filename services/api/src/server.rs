use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryApplicationRepository};
use crate::routes::with_admission_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use fredmind_admissions::config::AppConfig;
use fredmind_admissions::error::AppError;
use fredmind_admissions::telemetry;
use fredmind_admissions::workflows::admission::IntakeService;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryApplicationRepository::default());
    let mut intake = IntakeService::new(repository, config.admissions.fees);
    if let Some(provider) = config.admissions.payment_provider_url.clone() {
        info!(%provider, "payment handoff enabled");
        intake = intake.with_payment_provider(provider);
    }

    let app = with_admission_routes(Arc::new(intake))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        course_fee = config.admissions.fees.course_fee,
        "admissions intake service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
