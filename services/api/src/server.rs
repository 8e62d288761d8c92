use crate::cli::ServeArgs;
use crate::infra::{AppState, ConfiguredRepository};
use crate::routes::with_scouting_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use ftc_scout::config::AppConfig;
use ftc_scout::entries::{EntryRepository, ScoutingService};
use ftc_scout::error::AppError;
use ftc_scout::telemetry;
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

    let repository = ConfiguredRepository::from_config(&config.storage);
    let storage = repository.describe();
    let existing = repository.all()?.len();
    let scouting_service = Arc::new(ScoutingService::new(Arc::new(repository)));

    let app = with_scouting_routes(scouting_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, %storage, existing, "scouting service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
