//! Guided-form schemas for each document kind.

use serde::Serialize;
use utoipa::ToSchema;

use super::validation::{
    validate_date, validate_number, validate_required, ValidationErrors,
};
use crate::document::draft::DraftRecord;
use crate::document::kind::DocumentKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Date,
    Textarea,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FieldSchema {
    pub key: &'static str,
    pub label: &'static str,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<&'static str>,
}

impl FieldSchema {
    const fn new(key: &'static str, label: &'static str, field_type: FieldType) -> Self {
        Self {
            key,
            label,
            field_type,
            required: false,
            placeholder: None,
            help: None,
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn placeholder(mut self, text: &'static str) -> Self {
        self.placeholder = Some(text);
        self
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WizardSchema {
    pub title: &'static str,
    pub fields: Vec<FieldSchema>,
}

impl WizardSchema {
    /// Schema for a kind; kinds without a dedicated form get the generic one.
    pub fn for_kind(kind: Option<DocumentKind>) -> Self {
        use FieldType::*;

        match kind {
            Some(DocumentKind::NoticeOfNonRenewal) => Self {
                title: "Notice of Non-Renewal",
                fields: vec![
                    FieldSchema::new("landlord_name", "Landlord name", Text)
                        .required()
                        .placeholder("e.g. John Landlord"),
                    FieldSchema::new("tenant_name", "Tenant name", Text)
                        .required()
                        .placeholder("e.g. Jane Tenant"),
                    FieldSchema::new("property_address", "Property address", Textarea)
                        .required()
                        .placeholder("Street, City, State, ZIP"),
                    FieldSchema::new("notice_date", "Notice date", Date).required(),
                    FieldSchema::new("move_out_date", "Move-out date", Date).required(),
                    FieldSchema::new("landlord_email", "Landlord email", Text)
                        .placeholder("optional"),
                    FieldSchema::new("landlord_phone", "Landlord phone", Text)
                        .placeholder("optional"),
                ],
            },
            Some(DocumentKind::PayRentOrQuit) => Self {
                title: "Pay Rent or Quit",
                fields: vec![
                    FieldSchema::new("landlord_name", "Landlord name", Text).required(),
                    FieldSchema::new("tenant_name", "Tenant name", Text).required(),
                    FieldSchema::new("property_address", "Property address", Textarea).required(),
                    FieldSchema::new("rent_amount", "Past due rent amount", Number)
                        .required()
                        .placeholder("e.g. 1200"),
                    FieldSchema::new("rent_due_date", "Rent due date", Date).required(),
                    FieldSchema::new("notice_date", "Notice date", Date).required(),
                    FieldSchema::new("payment_instructions", "How tenant can pay", Textarea)
                        .placeholder("optional"),
                ],
            },
            Some(DocumentKind::LateRentReminder) => Self {
                title: "Late Rent Reminder",
                fields: vec![
                    FieldSchema::new("tenant_name", "Tenant name", Text).required(),
                    FieldSchema::new("property_address", "Property address", Textarea).required(),
                    FieldSchema::new("rent_amount", "Rent amount", Number).required(),
                    FieldSchema::new("rent_due_date", "Rent due date", Date).required(),
                    FieldSchema::new("note", "Optional note", Textarea),
                ],
            },
            Some(DocumentKind::ItemizedDeductionsStatement) | None => Self::generic(),
        }
    }

    fn generic() -> Self {
        use FieldType::*;

        Self {
            title: "Document Wizard",
            fields: vec![
                FieldSchema::new("landlord_name", "Landlord name", Text).required(),
                FieldSchema::new("tenant_name", "Tenant name", Text).required(),
                FieldSchema::new("property_address", "Property address", Textarea).required(),
                FieldSchema::new("notice_date", "Notice date", Date),
            ],
        }
    }

    /// Check a draft against the schema.
    pub fn validate(&self, draft: &DraftRecord) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for field in &self.fields {
            if field.required {
                validate_required(draft, field.key, field.label, &mut errors);
            }
            match field.field_type {
                FieldType::Number => validate_number(draft, field.key, field.label, &mut errors),
                FieldType::Date => validate_date(draft, field.key, field.label, &mut errors),
                FieldType::Text | FieldType::Textarea => {}
            }
        }

        errors.into_result()
    }
}
