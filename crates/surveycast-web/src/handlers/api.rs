//! JSON endpoints: schema descriptors and direct prediction submission.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use surveycast_common::{Domain, SubmitError};
use surveycast_schema::{values_from_json, ValidationReport};

use crate::form::Outcome;
use crate::state::SharedState;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Invalid(ValidationReport),
    Submit(SubmitError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Invalid(_)    => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Submit(e) => match e {
                SubmitError::Configuration   => StatusCode::SERVICE_UNAVAILABLE,
                SubmitError::Timeout         => StatusCode::GATEWAY_TIMEOUT,
                SubmitError::Network         => StatusCode::BAD_GATEWAY,
                SubmitError::Server { .. }   => StatusCode::BAD_GATEWAY,
                SubmitError::Unexpected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl From<SubmitError> for ApiError {
    fn from(e: SubmitError) -> Self {
        ApiError::Submit(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::BadRequest(msg) => json!({ "error": msg }),
            ApiError::Invalid(report) => json!({ "errors": report.to_json() }),
            ApiError::Submit(e) => json!({ "error": e.to_string(), "kind": e.kind() }),
        };
        (status, Json(body)).into_response()
    }
}

/// GET /api/schema/{domain}: ordered field descriptors.
pub async fn api_schema(
    State(state): State<SharedState>,
    Path(domain): Path<Domain>,
) -> Json<Value> {
    let schema = state.schema(domain);
    Json(json!({
        "domain": domain,
        "fields": schema.fields(),
    }))
}

/// POST /api/predict/{domain}: validate a JSON record and submit it.
pub async fn api_predict(
    State(state): State<SharedState>,
    Path(domain): Path<Domain>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let obj = body
        .as_object()
        .ok_or_else(|| ApiError::BadRequest("expected a JSON object".to_string()))?;

    let record = state
        .schema(domain)
        .validate(&values_from_json(obj))
        .map_err(ApiError::Invalid)?;

    let label = state.predictor(domain).predict(&record.to_payload()).await?;
    let outcome = Outcome::from_label(domain, label);

    Ok(Json(json!({
        "prediction": outcome.label,
        "positive": outcome.positive,
        "outcome": outcome.text,
    })))
}
