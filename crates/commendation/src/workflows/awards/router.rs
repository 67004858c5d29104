use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;

use super::domain::{PersonnelId, UnitId};
use super::proposal::{ProposalBundleAssembler, ProposalItem};
use super::repository::{PositionHistoryRepository, RepositoryError, UnitAwardRepository};
use super::service::{AwardsService, ServiceError};

/// Router builder exposing the eligibility, continuity, and proposal
/// endpoints.
pub fn awards_router<H, U>(service: Arc<AwardsService<H, U>>) -> Router
where
    H: PositionHistoryRepository + 'static,
    U: UnitAwardRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/awards/personnel/:personnel_id/eligibility",
            get(eligibility_handler::<H, U>),
        )
        .route(
            "/api/v1/awards/units/:unit_id/continuity",
            get(continuity_handler::<H, U>),
        )
        .route("/api/v1/awards/proposals", post(proposal_handler::<H, U>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct AsOfQuery {
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProposalRequest {
    pub(crate) items: Vec<ProposalItem>,
    #[serde(default)]
    pub(crate) as_of: Option<NaiveDate>,
}

pub(crate) async fn eligibility_handler<H, U>(
    State(service): State<Arc<AwardsService<H, U>>>,
    Path(personnel_id): Path<String>,
    Query(query): Query<AsOfQuery>,
) -> Response
where
    H: PositionHistoryRepository + 'static,
    U: UnitAwardRepository + 'static,
{
    let id = PersonnelId(personnel_id);
    let result = match query.as_of {
        Some(as_of) => service.service_eligibility_on(&id, as_of),
        None => service.service_eligibility(&id),
    };

    match result {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn continuity_handler<H, U>(
    State(service): State<Arc<AwardsService<H, U>>>,
    Path(unit_id): Path<String>,
) -> Response
where
    H: PositionHistoryRepository + 'static,
    U: UnitAwardRepository + 'static,
{
    let unit = UnitId(unit_id);

    match service.unit_continuity(&unit) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn proposal_handler<H, U>(
    State(service): State<Arc<AwardsService<H, U>>>,
    axum::Json(request): axum::Json<ProposalRequest>,
) -> Response
where
    H: PositionHistoryRepository + 'static,
    U: UnitAwardRepository + 'static,
{
    let assembler = ProposalBundleAssembler::new(service);
    let today = request.as_of.unwrap_or_else(|| Utc::now().date_naive());

    match assembler.assemble(&request.items, today) {
        Ok(bundle) => (StatusCode::OK, axum::Json(bundle)).into_response(),
        Err(error) => service_error_response(error),
    }
}

fn service_error_response(error: ServiceError) -> Response {
    let status = match &error {
        ServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ServiceError::Eligibility(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
