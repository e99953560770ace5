//! Survey pages: render the form, validate on submit, call the prediction
//! service, and re-render with exactly one of {field messages, error banner,
//! prediction}.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use surveycast_common::{Domain, SubmitError};
use surveycast_schema::{DomainSchema, FieldKind, FieldSpec, FormValues};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::form::{FormSession, FormState};
use crate::session::Busy;
use crate::handlers::layout::{escape, page};
use crate::state::SharedState;

/// Hidden form field carrying the session id.
pub const SESSION_FIELD: &str = "session_id";

pub async fn health_page(State(state): State<SharedState>) -> Html<String> {
    survey_page(&state, Domain::Health).await
}

pub async fn health_submit(
    State(state): State<SharedState>,
    Form(form): Form<FormValues>,
) -> Response {
    survey_submit(&state, Domain::Health, form).await
}

pub async fn bank_page(State(state): State<SharedState>) -> Html<String> {
    survey_page(&state, Domain::Bank).await
}

pub async fn bank_submit(
    State(state): State<SharedState>,
    Form(form): Form<FormValues>,
) -> Response {
    survey_submit(&state, Domain::Bank, form).await
}

async fn survey_page(state: &SharedState, domain: Domain) -> Html<String> {
    let schema = state.schema(domain);
    let (id, session) = state.sessions.open(domain, schema.defaults()).await;
    Html(render_survey(schema, id, &session))
}

async fn survey_submit(state: &SharedState, domain: Domain, mut form: FormValues) -> Response {
    let schema = state.schema(domain);
    let id = form
        .remove(SESSION_FIELD)
        .and_then(|s| Uuid::parse_str(s.trim()).ok())
        .unwrap_or_else(Uuid::new_v4);

    let record = match schema.validate(&form) {
        Ok(record) => record,
        Err(report) => {
            warn!(%domain, session = %id, violations = report.len(), "submission blocked by validation");
            return match state.sessions.reject(id, domain, form, report).await {
                Ok(session) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Html(render_survey(schema, id, &session)),
                )
                    .into_response(),
                Err(Busy(session)) => pending_response(schema, id, &session),
            };
        }
    };

    if let Err(Busy(session)) = state.sessions.begin_submit(id, domain, form.clone()).await {
        info!(%domain, session = %id, "duplicate submission ignored while pending");
        return pending_response(schema, id, &session);
    }

    // Detached so the session settles even if this request is dropped mid-flight.
    let task = tokio::spawn({
        let state = state.clone();
        let payload = record.to_payload();
        async move {
            let result = state.predictor(domain).predict(&payload).await;
            settle(&state, domain, id, result).await
        }
    });

    let (result, session) = match task.await {
        Ok(settled) => settled,
        Err(e) => {
            let result = Err(SubmitError::unexpected(format!("prediction task failed: {}", e)));
            settle(state, domain, id, result).await
        }
    };

    match session {
        Some(session) => Html(render_survey(schema, id, &session)).into_response(),
        None => Html(render_form(schema, id, &form, &FormState::settled(domain, result))).into_response(),
    }
}

/// Record the service's answer on the session. `None` when the session is
/// gone, e.g. purged while the request was in flight.
async fn settle(
    state: &SharedState,
    domain: Domain,
    id: Uuid,
    result: Result<String, SubmitError>,
) -> (Result<String, SubmitError>, Option<FormSession>) {
    match &result {
        Err(SubmitError::Unexpected { detail }) => {
            error!(%domain, session = %id, %detail, "prediction request failed unexpectedly")
        }
        Err(e) => warn!(%domain, session = %id, kind = e.kind(), error = %e, "prediction request failed"),
        Ok(_) => {}
    }
    let session = match state.sessions.complete(id, result.clone()).await {
        Ok(session) => Some(session),
        Err(e) => {
            warn!(%domain, session = %id, error = %e, "session not pending when prediction finished");
            None
        }
    };
    (result, session)
}

/// Response for a submit that arrived while another one is still pending.
fn pending_response(schema: &DomainSchema, id: Uuid, session: &FormSession) -> Response {
    (StatusCode::CONFLICT, Html(render_survey(schema, id, session))).into_response()
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn radio(key: &str, value: i64, caption: &str, current: Option<&str>) -> String {
    let checked = if current == Some(value.to_string().as_str()) { " checked" } else { "" };
    format!(
        r#"<label><input type="radio" name="{key}" id="{key}-{value}" value="{value}"{checked}> {caption}</label>"#,
        key = escape(key),
        value = value,
        checked = checked,
        caption = escape(caption),
    )
}

fn render_control(field: &FieldSpec, current: Option<&str>) -> String {
    match field.kind {
        FieldKind::Binary { no, yes } => format!(
            r#"<div class="radio-row">{}{}</div>"#,
            radio(field.key, 1, yes, current),
            radio(field.key, 0, no, current),
        ),
        FieldKind::Ordinal { min, options, .. } => {
            let items: String = options
                .iter()
                .enumerate()
                .map(|(i, caption)| radio(field.key, min + i as i64, caption, current))
                .collect();
            format!(r#"<div class="radio-row">{}</div>"#, items)
        }
        FieldKind::Numeric { min, max } => {
            let max_attr = max.map(|m| format!(r#" max="{}""#, m)).unwrap_or_default();
            format!(
                r#"<input type="number" name="{key}" id="{key}" step="1" min="{min}"{max_attr} value="{value}">"#,
                key = escape(field.key),
                min = min,
                max_attr = max_attr,
                value = escape(current.unwrap_or("")),
            )
        }
    }
}

/// Render the whole survey page for a session.
pub fn render_survey(schema: &DomainSchema, id: Uuid, session: &FormSession) -> String {
    render_form(schema, id, session.values(), session.state())
}

fn render_form(schema: &DomainSchema, id: Uuid, values: &FormValues, state: &FormState) -> String {
    let domain = schema.domain();
    let report = match state {
        FormState::Invalid(report) => Some(report),
        _ => None,
    };

    let fields: String = schema
        .fields()
        .iter()
        .map(|field| {
            let current = values.get(field.key).map(String::as_str);
            let message = report
                .and_then(|r| r.message_for(field.key))
                .map(|m| format!(r#"<p class="field-error">{}</p>"#, escape(m)))
                .unwrap_or_default();
            format!(
                r#"
        <div class="form-item">
            <label>{label}</label>
            {control}
            {message}
        </div>"#,
                label = escape(field.label),
                control = render_control(field, current),
                message = message,
            )
        })
        .collect();

    let pending = matches!(state, FormState::Submitting);
    let button_text = match (pending, domain) {
        (false, _)             => "Submit",
        (true, Domain::Health) => "Predicting...",
        (true, Domain::Bank)   => "Processing...",
    };
    let disabled = if pending { " disabled" } else { "" };

    let banner = match state {
        FormState::Failed(e) => format!(r#"<div class="alert alert-error">{}</div>"#, escape(&e.to_string())),
        FormState::Succeeded(o) => format!(
            r#"<div class="alert prediction">Prediction: {}</div>"#,
            escape(o.text)
        ),
        FormState::Submitting => {
            r#"<div class="alert alert-info">A prediction is already being computed for this form.</div>"#.to_string()
        }
        FormState::Idle | FormState::Invalid(_) => String::new(),
    };

    let body = format!(
        r#"
    <form method="POST" action="/{slug}" onsubmit="this.querySelector('button[type=submit]').disabled = true;">
        <input type="hidden" name="{session_field}" value="{id}">
        {fields}
        <button type="submit"{disabled}>{button_text}</button>
    </form>
    {banner}"#,
        slug = domain.slug(),
        session_field = SESSION_FIELD,
        id = id,
        fields = fields,
        disabled = disabled,
        button_text = button_text,
        banner = banner,
    );

    page(domain, &body)
}
