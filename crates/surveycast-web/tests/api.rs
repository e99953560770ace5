//! JSON API and liveness endpoint.

mod support;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use surveycast_client::SubmitError;
use surveycast_web::{config::Config, router::build_router, state::AppState};
use tokio_test::assert_ok;
use tower::ServiceExt;

use support::{app, body_text, get, json_post, ScriptedPredictor};

async fn json_body(resp: axum::response::Response) -> Value {
    assert_ok!(serde_json::from_str(&body_text(resp).await))
}

#[tokio::test]
async fn test_schema_lists_fields_in_order() {
    let fake = ScriptedPredictor::new(vec![]);
    let router = app(fake.clone(), fake);

    let resp = router.clone().oneshot(get("/api/schema/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    let fields = body["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 21);
    assert_eq!(fields[0]["key"], "HighBP");
    assert_eq!(fields[3]["key"], "BMI");
    assert_eq!(fields[3]["kind"]["type"], "numeric");

    let body = json_body(router.oneshot(get("/api/schema/bank")).await.unwrap()).await;
    let keys: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|f| f["key"].as_str())
        .collect();
    assert_eq!(keys, vec!["age", "duration", "campaign", "previous"]);
}

#[tokio::test]
async fn test_unknown_domain_rejected() {
    let fake = ScriptedPredictor::new(vec![]);
    let resp = app(fake.clone(), fake).oneshot(get("/api/schema/weather")).await.unwrap();
    assert!(resp.status().is_client_error());
}

#[tokio::test]
async fn test_predict_success() {
    let fake = ScriptedPredictor::new(vec![Ok("yes".to_string())]);
    let router = app(ScriptedPredictor::new(vec![]), fake.clone());

    let resp = router
        .oneshot(json_post(
            "/api/predict/bank",
            &json!({"age": 41, "duration": "300", "campaign": 2, "previous": 0}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        json_body(resp).await,
        json!({
            "prediction": "yes",
            "positive": true,
            "outcome": "Client will subscribe to term deposit",
        })
    );
    assert_eq!(fake.calls(), 1);
}

#[tokio::test]
async fn test_predict_invalid_record() {
    let fake = ScriptedPredictor::new(vec![]);
    let router = app(ScriptedPredictor::new(vec![]), fake.clone());

    let resp = router
        .oneshot(json_post(
            "/api/predict/bank",
            &json!({"age": 12, "duration": 10, "campaign": 1}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(resp).await;
    assert_eq!(body["errors"]["age"], "Must be at least 18");
    assert_eq!(body["errors"]["previous"], "This field is required");
    assert_eq!(fake.calls(), 0);
}

#[tokio::test]
async fn test_predict_non_object_body() {
    let fake = ScriptedPredictor::new(vec![]);
    let resp = app(fake.clone(), fake)
        .oneshot(json_post("/api/predict/bank", &json!([1, 2, 3])))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_predict_service_errors_map_to_status() {
    let record = json!({"age": 30, "duration": 0, "campaign": 0, "previous": 0});
    let cases = [
        (SubmitError::Timeout, StatusCode::GATEWAY_TIMEOUT, "timeout"),
        (SubmitError::Network, StatusCode::BAD_GATEWAY, "network"),
        (
            SubmitError::Server { status: 500, message: "X".to_string() },
            StatusCode::BAD_GATEWAY,
            "server",
        ),
    ];

    for (error, status, kind) in cases {
        let message = error.to_string();
        let fake = ScriptedPredictor::new(vec![Err(error)]);
        let resp = app(ScriptedPredictor::new(vec![]), fake)
            .oneshot(json_post("/api/predict/bank", &record))
            .await
            .unwrap();
        assert_eq!(resp.status(), status);
        let body = json_body(resp).await;
        assert_eq!(body["kind"], kind);
        assert_eq!(body["error"], message.as_str());
    }
}

#[tokio::test]
async fn test_predict_without_endpoint() {
    let router = build_router(AppState::from_config(Config::default()).unwrap());
    let resp = router
        .oneshot(json_post(
            "/api/predict/bank",
            &json!({"age": 30, "duration": 0, "campaign": 0, "previous": 0}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        json_body(resp).await,
        json!({"error": "API URL not configured", "kind": "configuration"})
    );
}

#[tokio::test]
async fn test_healthz() {
    let fake = ScriptedPredictor::new(vec![]);
    let resp = app(fake.clone(), fake).oneshot(get("/healthz")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["endpoints"]["health"], true);
    assert_eq!(body["health_profile"], "full");
    assert_eq!(body["sessions"], 0);
}
