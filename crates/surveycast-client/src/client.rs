//! Prediction service client.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use surveycast_common::{SubmitError, SurveyError};
use tracing::{debug, info, warn};

/// Upper bound on one submission, connect through body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

const GENERIC_SERVER_MESSAGE: &str = "Something went wrong";

// ── Trait ─────────────────────────────────────────────────────────────────────

/// Anything that can turn an ordered payload into a prediction label.
#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(&self, payload: &Value) -> Result<String, SubmitError>;
    /// Configured endpoint, if any.
    fn endpoint(&self) -> Option<&str>;
}

// ── Wire bodies ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct PredictionBody {
    prediction: Label,
}

/// Some model servers return the class as a bare number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Label {
    Text(String),
    Number(serde_json::Number),
}

impl Label {
    fn into_string(self) -> String {
        match self {
            Label::Text(s)   => s,
            Label::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<Value>,
}

/// Message for a non-2xx response: the body's `message` field, else a generic one.
fn server_message(body: &[u8]) -> String {
    let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
    match parsed.message {
        Some(Value::String(s)) if !s.trim().is_empty() => s,
        Some(Value::Null) | None => GENERIC_SERVER_MESSAGE.to_string(),
        Some(Value::String(_)) => GENERIC_SERVER_MESSAGE.to_string(),
        Some(other) => other.to_string(),
    }
}

fn classify(err: reqwest::Error) -> SubmitError {
    if err.is_timeout() {
        SubmitError::Timeout
    } else if err.is_connect() {
        SubmitError::Network
    } else {
        SubmitError::unexpected(err.to_string())
    }
}

// ── Client ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PredictionClient {
    endpoint: Option<String>,
    timeout: Duration,
    client: reqwest::Client,
}

impl PredictionClient {
    /// Build a client. A missing or blank endpoint is accepted here and
    /// reported as [`SubmitError::Configuration`] on every submission.
    pub fn new(endpoint: Option<String>, timeout: Duration) -> Result<Self, SurveyError> {
        let endpoint = endpoint
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { endpoint, timeout, client })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Predictor for PredictionClient {
    async fn predict(&self, payload: &Value) -> Result<String, SubmitError> {
        let Some(url) = self.endpoint.as_deref() else {
            warn!("prediction endpoint not configured; submission blocked");
            return Err(SubmitError::Configuration);
        };

        debug!(%url, %payload, "sending prediction request");

        let resp = self.client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(classify)?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(classify)?;

        if !status.is_success() {
            let message = server_message(&body);
            warn!(status = status.as_u16(), %message, "prediction service returned an error");
            return Err(SubmitError::Server { status: status.as_u16(), message });
        }

        let parsed: PredictionBody = serde_json::from_slice(&body)
            .map_err(|e| SubmitError::unexpected(format!("invalid prediction body: {}", e)))?;
        let label = parsed.prediction.into_string();

        info!(%url, prediction = %label, "prediction received");
        Ok(label)
    }

    fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }
}
