use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_domain_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use broker_ai::config::AppConfig;
use broker_ai::crm::{EngagementService, InMemoryEngagementStore};
use broker_ai::error::AppError;
use broker_ai::search::{ConditionResolver, InMemoryCardRepository, QuickSearchService};
use broker_ai::telemetry;
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

    let engagement = Arc::new(EngagementService::new(Arc::new(
        InMemoryEngagementStore::default(),
    )));
    let resolver = ConditionResolver::for_today();
    let quick_search = Arc::new(QuickSearchService::new(
        Arc::new(InMemoryCardRepository::standard()),
        resolver,
    ));

    let app = with_domain_routes(engagement, quick_search)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        reference_year = resolver.current_year(),
        "brokerage service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
