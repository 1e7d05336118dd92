use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryResultRepository};
use crate::routes::with_validation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use venture_screen::config::AppConfig;
use venture_screen::error::AppError;
use venture_screen::telemetry;
use venture_screen::workflows::viability::{ResultRepository, ValidationPipeline, ValidationService};

const PURGE_INTERVAL: Duration = Duration::from_secs(60);

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
    let pipeline = ValidationPipeline::new(&config.scoring);
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        pipeline: Arc::new(pipeline.clone()),
    };

    let repository = Arc::new(InMemoryResultRepository::default());
    let validation_service = Arc::new(ValidationService::new(
        pipeline,
        repository,
        config.storage.result_ttl,
    ));
    spawn_purge_task(validation_service.clone());

    let app = with_validation_routes(validation_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        saturation_penalty = ?config.scoring.saturation_penalty,
        "venture screening service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn spawn_purge_task<R>(service: Arc<ValidationService<R>>)
where
    R: ResultRepository + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(PURGE_INTERVAL);
        loop {
            ticker.tick().await;
            match service.purge_expired(Utc::now()) {
                Ok(0) => {}
                Ok(purged) => info!(purged, "expired validations purged"),
                Err(err) => warn!(error = %err, "failed to purge expired validations"),
            }
        }
    });
}
