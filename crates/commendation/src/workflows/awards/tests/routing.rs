use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::awards::domain::Gender;
use crate::workflows::awards::router::awards_router;

fn seeded_router() -> axum::Router {
    let (service, history, awards) = build_service();

    history.seed_member(member("p-400", Gender::Male));
    history.seed_span(span("p-400", 0.95, date(2014, 1, 1), 126));

    for year in 2021..=2024 {
        awards.seed_award(award("u-40", year, Some("Unit Commendation"), 0));
    }

    awards_router(Arc::new(service))
}

async fn read_json_body(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[tokio::test]
async fn eligibility_endpoint_returns_the_progress_ladder() {
    let router = seeded_router();

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/awards/personnel/p-400/eligibility?as_of=2025-06-30")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("rank"), Some(&json!("first")));
    let progress = payload
        .get("progress")
        .and_then(Value::as_array)
        .expect("progress ladder");
    assert_eq!(progress.len(), 3);
}

#[tokio::test]
async fn unknown_personnel_maps_to_not_found() {
    let router = seeded_router();

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/awards/personnel/p-999/eligibility")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn continuity_endpoint_reports_both_gates() {
    let router = seeded_router();

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/awards/units/u-40/continuity")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("current_streak"), Some(&json!(4)));
    assert_eq!(payload.get("commendable_eligible"), Some(&json!(true)));
    assert_eq!(payload.get("distinguished_eligible"), Some(&json!(false)));
}

#[tokio::test]
async fn proposal_endpoint_reports_per_item_verdicts() {
    let router = seeded_router();

    let body = json!({
        "as_of": "2025-06-30",
        "items": [
            { "kind": "personnel", "id": "p-400", "rank": "first" },
            { "kind": "unit", "id": "u-40", "tier": "distinguished" }
        ]
    });

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/awards/proposals")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let items = payload
        .get("items")
        .and_then(Value::as_array)
        .expect("item verdicts");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].get("accepted"), Some(&json!(true)));
    assert_eq!(items[1].get("accepted"), Some(&json!(false)));
    assert_eq!(payload.get("submittable"), Some(&json!(false)));
}
