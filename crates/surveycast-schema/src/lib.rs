//! surveycast-schema: Declarative field schemas for the survey forms.
//!
//! Each survey domain is described by an ordered list of [`FieldSpec`]s.
//! The order of that list is the order of keys in the submitted payload,
//! independent of how the user filled the form.
//!
//!   - field: field kinds (binary / ordinal / numeric) and per-field checks
//!   - labels: human-readable prompts and option captions
//!   - schema: the health and bank schemas
//!   - validate: raw form values → validated record or violation report
//!   - records: typed records with their default values

pub mod field;
pub mod labels;
pub mod records;
pub mod schema;
pub mod validate;

pub use field::{FieldKind, FieldSpec, WireType};
pub use records::{BankRecord, Flag, HealthRecord};
pub use schema::{DomainSchema, HealthProfile};
pub use validate::{values_from_json, FormValues, ValidatedRecord, ValidationReport, Violation};
