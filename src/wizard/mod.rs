//! Guided-form definitions and draft validation.

pub mod handlers;
pub mod schema;
pub mod validation;

pub use handlers::config;
pub use schema::{FieldSchema, FieldType, WizardSchema};
pub use validation::{ValidationError, ValidationErrors};
