//! Field validation for wizard drafts.
//!
//! Messages are written for the end user filling the form.

use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

use crate::document::date::parse_date;
use crate::document::draft::DraftRecord;

/// Validation error for one field.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ValidationError {
    /// Draft key that failed validation
    pub field: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("{} is required", label))
            .with_suggestion(format!("Please enter the {}", label.to_lowercase()))
    }

    pub fn invalid_number(field: &str, label: &str, value: &str) -> Self {
        Self::new(field, format!("{} '{}' is not a number", label, value))
            .with_suggestion("Use digits only, e.g. 1200 or 1200.50")
    }

    pub fn invalid_date(field: &str, label: &str, value: &str) -> Self {
        Self::new(field, format!("{} '{}' is not a valid date", label, value))
            .with_suggestion("Use the format YYYY-MM-DD, e.g. 2024-01-05")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors.
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// One-line summary for the `error` field of a response.
    pub fn summary(&self) -> String {
        match self.errors.len() {
            0 => String::new(),
            1 => "1 field needs attention".to_string(),
            n => format!("{} fields need attention", n),
        }
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary())?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "{}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

pub fn validate_required(
    draft: &DraftRecord,
    field: &str,
    label: &str,
    errors: &mut ValidationErrors,
) {
    if draft.is_blank(field) {
        errors.add(ValidationError::empty_field(field, label));
    }
}

/// Only checked when a value is present.
pub fn validate_number(
    draft: &DraftRecord,
    field: &str,
    label: &str,
    errors: &mut ValidationErrors,
) {
    let value = draft.text(field);
    if !value.trim().is_empty() && draft.number(field).is_none() {
        errors.add(ValidationError::invalid_number(field, label, value.trim()));
    }
}

/// Only checked when a value is present.
pub fn validate_date(draft: &DraftRecord, field: &str, label: &str, errors: &mut ValidationErrors) {
    let value = draft.text(field);
    if !value.trim().is_empty() && parse_date(&value).is_none() {
        errors.add(ValidationError::invalid_date(field, label, value.trim()));
    }
}
