use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryNotificationPublisher, InMemoryProjectRepository};
use crate::routes::with_compliance_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use nbc_compliance::config::AppConfig;
use nbc_compliance::error::AppError;
use nbc_compliance::telemetry;
use nbc_compliance::workflows::projects::ProjectService;
use std::sync::atomic::Ordering;
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
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryProjectRepository::default());
    let notifier = Arc::new(InMemoryNotificationPublisher::default());
    let file_policy = config.projects.file_policy();
    let project_service = Arc::new(ProjectService::new(repository, notifier, file_policy));

    let app = with_compliance_routes(project_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        max_upload_bytes = file_policy.max_bytes(),
        "nbc compliance service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
