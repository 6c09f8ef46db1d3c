//! HTTP API tests against the full router.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use ruleta::api::build_router;
use ruleta::api::routes::{ApiState, AppState};
use ruleta::engine::RoundRegistry;
use ruleta::storage::MemoryStore;

use crate::scripted_wheel::ScriptedWheel;

fn state_with(script: &[u8]) -> AppState {
    let registry = RoundRegistry::new(
        Box::new(MemoryStore::new()),
        Box::new(ScriptedWheel::new(script)),
    );
    Arc::new(ApiState::new(registry))
}

async fn call(state: &AppState, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(b) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = build_router(state.clone()).oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1_000_000).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_full_round_over_http() {
    let state = state_with(&[24]);

    let (status, created) = call(&state, "POST", "/api/roulettes", None).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, opened) = call(&state, "PATCH", &format!("/api/roulettes/{id}/open"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(opened["status"], "open");

    let bets = format!("/api/roulettes/{id}/bets");
    let (status, placed) = call(&state, "POST", &bets, Some(json!({"amount": 33.333, "number": 24}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(placed["wager"]["type"], "number");

    let (_, placed) = call(&state, "POST", &bets, Some(json!({"amount": 0.125, "color": "ROJO"}))).await;
    assert_eq!(placed["wager"]["color"], "rojo");

    let (status, outcome) = call(&state, "PATCH", &format!("/api/roulettes/{id}/close"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["winningNumber"], 24);
    assert_eq!(outcome["winningColor"], "rojo");
    let payout = |i: usize| outcome["results"][i]["payout"].as_f64().unwrap();
    assert!((payout(0) - 166.67).abs() < 1e-9);
    assert!((payout(1) - 0.23).abs() < 1e-9);
}

#[tokio::test]
async fn test_malformed_json_body_is_invalid_amount() {
    let state = state_with(&[1]);
    let (_, created) = call(&state, "POST", "/api/roulettes", None).await;
    let id = created["id"].as_str().unwrap().to_string();
    call(&state, "PATCH", &format!("/api/roulettes/{id}/open"), None).await;

    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/roulettes/{id}/bets"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = build_router(state.clone()).oneshot(request).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(resp.into_body(), 10_000).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["code"], "INVALID_AMOUNT");
}

#[tokio::test]
async fn test_concurrent_wagers_are_not_lost() {
    let state = state_with(&[5]);
    let (_, created) = call(&state, "POST", "/api/roulettes", None).await;
    let id = created["id"].as_str().unwrap().to_string();
    call(&state, "PATCH", &format!("/api/roulettes/{id}/open"), None).await;

    let mut handles = Vec::new();
    for i in 0..50 {
        let state = state.clone();
        let uri = format!("/api/roulettes/{id}/bets");
        handles.push(tokio::spawn(async move {
            call(&state, "POST", &uri, Some(json!({"amount": 1 + i, "number": i % 37}))).await.0
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::CREATED);
    }

    let (_, list) = call(&state, "GET", "/api/roulettes", None).await;
    assert_eq!(list[0]["totalWagers"], 50);

    let (_, outcome) = call(&state, "PATCH", &format!("/api/roulettes/{id}/close"), None).await;
    let results = outcome["results"].as_array().unwrap();
    assert_eq!(results.len(), 50);
    let winners = results.iter().filter(|r| r["result"] == "WIN").count();
    // Numbers 5 and 42 % 37 == 5 both hit.
    assert_eq!(winners, 2);
}

#[tokio::test]
async fn test_list_never_shows_outcome_for_open_rounds() {
    let state = state_with(&[9]);
    let (_, a) = call(&state, "POST", "/api/roulettes", None).await;
    let (_, b) = call(&state, "POST", "/api/roulettes", None).await;
    let a = a["id"].as_str().unwrap().to_string();
    let b = b["id"].as_str().unwrap().to_string();

    call(&state, "PATCH", &format!("/api/roulettes/{a}/open"), None).await;
    call(&state, "PATCH", &format!("/api/roulettes/{a}/close"), None).await;
    call(&state, "PATCH", &format!("/api/roulettes/{b}/open"), None).await;

    let (_, list) = call(&state, "GET", "/api/roulettes", None).await;
    let list = list.as_array().unwrap();
    assert_eq!(list[0]["id"], a.as_str());
    assert_eq!(list[0]["winningNumber"], 9);
    assert_eq!(list[0]["winningColor"], "negro");
    assert_eq!(list[1]["status"], "open");
    assert!(list[1].get("winningNumber").is_none());
    assert!(list[1].get("winningColor").is_none());
}
