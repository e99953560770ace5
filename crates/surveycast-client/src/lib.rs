//! surveycast-client: Submits validated survey records to the external
//! prediction service.
//!
//! One POST per submission, bounded by a timeout, never retried. Every
//! failure is mapped onto [`SubmitError`], whose display text is what the
//! form shows to the user.

pub mod client;

pub use client::{PredictionClient, Predictor, DEFAULT_TIMEOUT};
pub use surveycast_common::SubmitError;
