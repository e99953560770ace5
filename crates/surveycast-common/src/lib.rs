//! surveycast-common: Shared types and errors used across all SurveyCast crates.

pub mod domain;
pub mod error;

// Re-export commonly used types
pub use domain::Domain;
pub use error::{Result, SubmitError, SurveyError};
