//! surveycast-web: Web front end for SurveyCast.
//! Serves:
//!   - Health indicators survey (diabetes risk)
//!   - Bank-marketing survey (term deposit subscription)
//!   - JSON schema and prediction endpoints

pub mod config;
pub mod form;
pub mod handlers;
pub mod router;
pub mod session;
pub mod state;
