//! Form session state machine.
//!
//! ```text
//! Idle ─┬─ invalid input ──▶ Invalid(report)
//!       └─ valid input ────▶ Submitting ─┬─▶ Succeeded(outcome)
//!                                         └─▶ Failed(error)
//! ```
//!
//! Any state except `Submitting` accepts a new submission, which clears the
//! previous outcome, error, or violation report. While `Submitting`, further
//! submissions are refused and the submit control is rendered disabled.

use chrono::{DateTime, Utc};
use serde::Serialize;
use surveycast_common::{Domain, SubmitError};
use surveycast_schema::{FormValues, ValidationReport};
use thiserror::Error;

/// Display result for a prediction label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Label exactly as returned by the service.
    pub label: String,
    pub positive: bool,
    pub text: &'static str,
}

/// "yes" and "1" are positive; anything else is negative.
pub fn is_positive(label: &str) -> bool {
    matches!(label.trim().to_ascii_lowercase().as_str(), "yes" | "1")
}

pub fn outcome_text(domain: Domain, positive: bool) -> &'static str {
    match (domain, positive) {
        (Domain::Health, true)  => "High blood sugar risk detected",
        (Domain::Health, false) => "No high blood sugar risk detected",
        (Domain::Bank, true)    => "Client will subscribe to term deposit",
        (Domain::Bank, false)   => "Client will not subscribe to term deposit",
    }
}

impl Outcome {
    pub fn from_label(domain: Domain, label: impl Into<String>) -> Self {
        let label = label.into();
        let positive = is_positive(&label);
        Self { label, positive, text: outcome_text(domain, positive) }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Idle,
    Invalid(ValidationReport),
    Submitting,
    Succeeded(Outcome),
    Failed(SubmitError),
}

impl FormState {
    /// Terminal state for a finished submission.
    pub fn settled(domain: Domain, result: Result<String, SubmitError>) -> Self {
        match result {
            Ok(label) => FormState::Succeeded(Outcome::from_label(domain, label)),
            Err(e)    => FormState::Failed(e),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("a submission is already in progress")]
    AlreadySubmitting,
    #[error("no submission is in progress")]
    NotSubmitting,
}

#[derive(Debug, Clone)]
pub struct FormSession {
    domain: Domain,
    values: FormValues,
    state: FormState,
    touched: DateTime<Utc>,
}

impl FormSession {
    pub fn new(domain: Domain, values: FormValues) -> Self {
        Self { domain, values, state: FormState::Idle, touched: Utc::now() }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn touched(&self) -> DateTime<Utc> {
        self.touched
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, FormState::Submitting)
    }

    /// Record input that failed validation.
    pub fn reject(&mut self, values: FormValues, report: ValidationReport) -> Result<(), FormError> {
        if self.is_pending() {
            return Err(FormError::AlreadySubmitting);
        }
        self.values = values;
        self.state = FormState::Invalid(report);
        self.touched = Utc::now();
        Ok(())
    }

    /// Enter `Submitting` with validated input.
    pub fn begin_submit(&mut self, values: FormValues) -> Result<(), FormError> {
        if self.is_pending() {
            return Err(FormError::AlreadySubmitting);
        }
        self.values = values;
        self.state = FormState::Submitting;
        self.touched = Utc::now();
        Ok(())
    }

    /// Leave `Submitting` with the service's answer.
    pub fn complete(&mut self, result: Result<String, SubmitError>) -> Result<(), FormError> {
        if !self.is_pending() {
            return Err(FormError::NotSubmitting);
        }
        self.state = FormState::settled(self.domain, result);
        self.touched = Utc::now();
        Ok(())
    }
}
