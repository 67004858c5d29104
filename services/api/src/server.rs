use crate::cli::ServeArgs;
use crate::demo::seed_registry;
use crate::infra::{
    default_award_rules, AppState, InMemoryAuditTrail, InMemoryAwardLedger, InMemoryDirectory,
    InMemoryRoster,
};
use crate::routes::with_registry_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use commendation::config::AppConfig;
use commendation::error::AppError;
use commendation::telemetry;
use commendation::workflows::audit::AuditLogService;
use commendation::workflows::awards::AwardsService;
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

    let roster = Arc::new(InMemoryRoster::default());
    let ledger = Arc::new(InMemoryAwardLedger::default());
    let directory = Arc::new(InMemoryDirectory::default());
    let trail = Arc::new(InMemoryAuditTrail::default());

    if args.seed_demo {
        seed_registry(&roster, &ledger, &directory, &trail)?;
    }

    let awards_service = Arc::new(AwardsService::new(roster, ledger, default_award_rules()));
    let audit_service = Arc::new(AuditLogService::new(directory, trail));

    let app = with_registry_routes(awards_service, audit_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "commendation registry ready");

    axum::serve(listener, app).await?;
    Ok(())
}
