//! HTTP tests for the axum router, driven with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use geopolitic::testing::{MockLanguageModel, MockWebSearcher, PromptKind};
use geopolitic::{Lens, Pipeline};
use server_core::server::build_app;

fn app_with(llm: MockLanguageModel) -> Router {
    build_app(Pipeline::new(Arc::new(llm)))
}

fn seeded_request(query: &str, infosphere: &str) -> Value {
    json!({
        "query": query,
        "infosphere": infosphere,
        "seed_sources": [
            {"id": "S1", "title": "Grid report", "url": "https://grid.test", "notes": "Demand rose."}
        ]
    })
}

async fn post_json(app: Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/run_pipeline")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let response = app_with(MockLanguageModel::new())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_seeded_run_returns_report() {
    let llm = MockLanguageModel::new()
        .with_claims(
            Lens::Left,
            json!({"claims": [{"text": "Demand is rising", "source_ids": ["S1"]}]}),
        )
        .with_synthesis(json!({"synthesis": "Demand growth is broadly accepted."}));

    let (status, body) = post_json(app_with(llm), seeded_request("energy policy", "english")).await;

    assert_eq!(status, StatusCode::OK);
    let output = body["output"].as_str().unwrap();
    assert!(output.starts_with("1. 🔎 Factual Background (from Web Searcher)\n- [S1] Grid report"));
    assert!(output.contains("- Demand is rising (Sources: S1)"));
    assert!(output.contains("Demand growth is broadly accepted."));
}

#[tokio::test]
async fn test_infosphere_defaults_to_english() {
    let mut request = seeded_request("energy policy", "english");
    request.as_object_mut().unwrap().remove("infosphere");

    let (status, body) = post_json(app_with(MockLanguageModel::new()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["output"].as_str().unwrap().contains("2. 🔴 Left Perspective"));
}

#[tokio::test]
async fn test_polish_infosphere() {
    let (status, body) =
        post_json(app_with(MockLanguageModel::new()), seeded_request("energia", "polish")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["output"].as_str().unwrap().contains("2. 🔴 Perspektywa lewicowa"));
}

#[tokio::test]
async fn test_empty_query_is_bad_request() {
    let llm = Arc::new(MockLanguageModel::new());
    let app = build_app(Pipeline::new(llm.clone()));

    let (status, body) = post_json(app, seeded_request("   ", "english")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"detail": "Query must not be empty."}));
    assert!(llm.calls().is_empty());
}

#[tokio::test]
async fn test_missing_query_is_bad_request() {
    let (status, _) =
        post_json(app_with(MockLanguageModel::new()), json!({"infosphere": "english"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unreadable_body_is_bad_request_with_detail() {
    let (status, body) = post_json(
        app_with(MockLanguageModel::new()),
        json!({"query": "energy policy", "seed_sources": 42}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_unknown_seed_scope_is_ignored() {
    let searcher = Arc::new(MockWebSearcher::new());
    let app = build_app(
        Pipeline::new(Arc::new(MockLanguageModel::new())).with_searcher(searcher.clone()),
    );

    let (status, body) = post_json(
        app,
        json!({
            "query": "energy policy",
            "seed_sources": {
                "leftist": [{"id": "S1", "title": "Ignored", "url": "https://ignored.test", "notes": "n"}],
                "right": null,
                "fact": [{"id": "S1", "title": "Checks", "url": "https://fact.test", "notes": "n"}]
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let output = body["output"].as_str().unwrap();
    assert!(output.contains("https://fact.test"));
    assert!(!output.contains("https://ignored.test"));
    // Left, centrist, right and people fall back to live search.
    assert_eq!(searcher.requests().len(), 4);
}

#[tokio::test]
async fn test_unsupported_infosphere_is_bad_request() {
    let (status, body) = post_json(
        app_with(MockLanguageModel::new()),
        seeded_request("energy policy", "german"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"detail": "Unsupported infosphere: german"}));
}

#[tokio::test]
async fn test_unseeded_run_without_searcher_is_server_error() {
    let (status, body) = post_json(
        app_with(MockLanguageModel::new()),
        json!({"query": "energy policy"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().contains("Missing TAVILY_KEY for live search."));
}

#[tokio::test]
async fn test_collaborator_failure_is_bad_gateway() {
    let llm = MockLanguageModel::new().failing_on(PromptKind::Synthesis, "model overloaded");

    let (status, body) = post_json(app_with(llm), seeded_request("energy policy", "english")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["detail"].as_str().unwrap().contains("model overloaded"));
}

#[tokio::test]
async fn test_live_search_path() {
    let searcher = Arc::new(MockWebSearcher::new());
    let app = build_app(
        Pipeline::new(Arc::new(MockLanguageModel::new())).with_searcher(searcher.clone()),
    );

    let (status, _) = post_json(app, json!({"query": "energy policy"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(searcher.requests().len(), 5);
}
