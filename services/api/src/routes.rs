use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

use commendation::workflows::audit::{
    audit_router, AccountDirectory, AuditLogRepository, AuditLogService,
};
use commendation::workflows::awards::{
    awards_router, AwardsService, PositionHistoryRepository, UnitAwardRepository,
};

pub(crate) fn with_registry_routes<H, U, D, L>(
    awards: Arc<AwardsService<H, U>>,
    audit: Arc<AuditLogService<D, L>>,
) -> axum::Router
where
    H: PositionHistoryRepository + 'static,
    U: UnitAwardRepository + 'static,
    D: AccountDirectory + 'static,
    L: AuditLogRepository + 'static,
{
    awards_router(awards)
        .merge(audit_router(audit))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
