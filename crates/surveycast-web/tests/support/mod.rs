//! Shared helpers for the router-level tests.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request},
    response::Response,
    Router,
};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use surveycast_client::{Predictor, SubmitError};
use surveycast_schema::{DomainSchema, HealthProfile};
use surveycast_web::{config::Config, router::build_router, state::AppState};
use tokio::sync::Notify;

/// Replies from a fixed script and records every payload it receives.
pub struct ScriptedPredictor {
    replies: Mutex<VecDeque<Result<String, SubmitError>>>,
    pub payloads: Mutex<Vec<Value>>,
}

impl ScriptedPredictor {
    pub fn new(replies: Vec<Result<String, SubmitError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            payloads: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.payloads.lock().unwrap().len()
    }
}

#[async_trait]
impl Predictor for ScriptedPredictor {
    async fn predict(&self, payload: &Value) -> Result<String, SubmitError> {
        self.payloads.lock().unwrap().push(payload.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("no".to_string()))
    }

    fn endpoint(&self) -> Option<&str> {
        Some("mock://predict")
    }
}

/// Holds its first call inside `predict` until released, so a request can be
/// kept pending. Later calls answer straight away.
#[derive(Default)]
pub struct GatedPredictor {
    pub entered: Notify,
    pub release: Notify,
    pub calls: AtomicUsize,
}

#[async_trait]
impl Predictor for GatedPredictor {
    async fn predict(&self, _payload: &Value) -> Result<String, SubmitError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            self.entered.notify_one();
            self.release.notified().await;
        }
        Ok("yes".to_string())
    }

    fn endpoint(&self) -> Option<&str> {
        Some("mock://gated")
    }
}

pub fn app(health: Arc<dyn Predictor>, bank: Arc<dyn Predictor>) -> Router {
    build_router(AppState::new(Config::default(), health, bank))
}

pub fn form_post(uri: &str, pairs: &[(String, String)]) -> Request<Body> {
    let encoded = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(encoded))
        .unwrap()
}

pub fn json_post(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_text(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

pub fn bank_form(session: &str, age: &str) -> Vec<(String, String)> {
    pairs(&[
        ("session_id", session),
        ("age", age),
        ("duration", "180"),
        ("campaign", "2"),
        ("previous", "0"),
    ])
}

/// Default health answers plus the session id.
pub fn health_form(session: &str) -> Vec<(String, String)> {
    let mut form: Vec<(String, String)> = DomainSchema::health(HealthProfile::Full)
        .defaults()
        .into_iter()
        .collect();
    form.push(("session_id".to_string(), session.to_string()));
    form
}
