use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use super::domain::{AuditLogEntry, LogQuery, Role};
use super::repository::{AccountDirectory, AuditLogRepository};
use super::service::AuditLogService;
use crate::error::AppError;
use crate::workflows::awards::domain::UnitId;

/// Router builder for audit-log search. The actor identity arrives in the
/// request body; the session layer upstream is responsible for it being
/// truthful.
pub fn audit_router<D, L>(service: Arc<AuditLogService<D, L>>) -> Router
where
    D: AccountDirectory + 'static,
    L: AuditLogRepository + 'static,
{
    Router::new()
        .route("/api/v1/audit/logs/search", post(search_handler::<D, L>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct LogSearchRequest {
    pub(crate) actor_role: Role,
    #[serde(default)]
    pub(crate) actor_unit: Option<UnitId>,
    #[serde(default)]
    pub(crate) role_filter: Option<String>,
    #[serde(default)]
    pub(crate) query: LogQuery,
}

pub(crate) async fn search_handler<D, L>(
    State(service): State<Arc<AuditLogService<D, L>>>,
    Json(request): Json<LogSearchRequest>,
) -> Result<Json<Vec<AuditLogEntry>>, AppError>
where
    D: AccountDirectory + 'static,
    L: AuditLogRepository + 'static,
{
    let entries = service.visible_entries(
        request.actor_role,
        request.actor_unit.as_ref(),
        request.role_filter.as_deref(),
        &request.query,
    )?;

    Ok(Json(entries))
}
