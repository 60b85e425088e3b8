use serde::{Deserialize, Serialize};

use crate::document::DraftRecord;

/// Row of `cases`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseRecord {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub state_code: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Row of `document_types`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentTypeRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Row of `case_documents`: the saved wizard draft for one document of a case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseDocument {
    pub case_id: String,
    pub document_type_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: DraftRecord,
    #[serde(default)]
    pub generated_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl CaseDocument {
    /// `generated_at`, else `updated_at`; blank values are skipped.
    pub fn stamp(&self) -> Option<&str> {
        [self.generated_at.as_deref(), self.updated_at.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_case_document_deserializes_with_null_data() {
        let row: CaseDocument = serde_json::from_value(json!({
            "case_id": "c1",
            "document_type_id": "d1",
            "status": "draft",
            "data": null,
            "generated_at": null,
            "updated_at": "2024-01-05T10:00:00Z"
        }))
        .unwrap();

        assert!(row.data.is_empty());
        assert_eq!(row.stamp(), Some("2024-01-05T10:00:00Z"));
    }

    #[test]
    fn test_stamp_prefers_generated_at() {
        let row: CaseDocument = serde_json::from_value(json!({
            "case_id": "c1",
            "document_type_id": "d1",
            "data": { "tenant_name": "Jane" },
            "generated_at": "2024-02-01T00:00:00Z",
            "updated_at": "2024-01-05T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(row.stamp(), Some("2024-02-01T00:00:00Z"));
        assert_eq!(row.data.text("tenant_name"), "Jane");
    }

    #[test]
    fn test_stamp_skips_blank_values() {
        let row: CaseDocument = serde_json::from_value(json!({
            "case_id": "c1",
            "document_type_id": "d1",
            "generated_at": "",
        }))
        .unwrap();
        assert_eq!(row.stamp(), None);
    }

    #[test]
    fn test_document_type_without_slug() {
        let row: DocumentTypeRecord =
            serde_json::from_value(json!({ "id": "d1", "name": "Notice of Non-Renewal" }))
                .unwrap();
        assert_eq!(row.slug, None);
    }
}
