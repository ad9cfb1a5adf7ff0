use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use smart_quote::config::AppConfig;
use smart_quote::error::AppError;
use smart_quote::quote::{directory, EvaluationPipeline, Summarizer};
use smart_quote::telemetry;
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

    let pipeline = Arc::new(EvaluationPipeline::from_config(&config.quote)?);
    let summarizer = Arc::new(Summarizer::new(
        config.quote.summary_api_key.clone(),
        config.quote.currency.clone(),
    )?);

    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        pipeline,
        summarizer,
        vendors: Arc::new(directory::standard()),
        quote: Arc::new(config.quote.clone()),
    };

    let app = routes::router()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "smart quote service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
