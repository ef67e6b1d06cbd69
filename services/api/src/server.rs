use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use phonexchange::config::AppConfig;
use phonexchange::error::AppError;
use phonexchange::router::TradeInServices;
use phonexchange::telemetry;
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState, CatalogArgs, InMemoryLeadRepository};
use crate::routes::with_trade_in_routes;

pub(crate) async fn run(mut args: ServeArgs, catalog_args: CatalogArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let catalog = load_catalog(&catalog_args.merged_with(&config.catalog))?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let services = Arc::new(TradeInServices::new(
        Arc::new(catalog),
        Arc::new(InMemoryLeadRepository::default()),
    ));

    let app = with_trade_in_routes(services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "phonexchange trade-in service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
