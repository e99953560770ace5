//! HTTP handlers for all web routes.

pub mod api;
pub mod layout;
pub mod survey;
pub mod system;
