//! In-memory stand-ins for the identity service and the data store.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use noticepack_server::auth::{AuthError, AuthUser, IdentityProvider};
use noticepack_server::db::{CaseDocument, CaseRecord, CaseStore, DocumentTypeRecord, StoreError};
use noticepack_server::document::DraftRecord;
use noticepack_server::AppState;

pub const VALID_TOKEN: &str = "valid-token";
pub const CASE_ID: &str = "3f1c2a9e-5b7d-4e21-9a0c-6d2f8b1e4c77";
pub const NNR_DOC_TYPE_ID: &str = "nnr";

/// Accepts exactly one token.
pub struct MockIdentity {
    token: String,
}

impl MockIdentity {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl IdentityProvider for MockIdentity {
    async fn verify(&self, token: &str) -> Result<AuthUser, AuthError> {
        if token == self.token {
            Ok(AuthUser {
                id: "user-1".to_string(),
                email: Some("landlord@example.com".to_string()),
                access_token: token.to_string(),
            })
        } else {
            Err(AuthError::Rejected("Invalid token".to_string()))
        }
    }
}

/// Mock implementation of CaseStore for testing
pub struct MockStore {
    cases: tokio::sync::Mutex<HashMap<String, CaseRecord>>,
    doc_types: tokio::sync::Mutex<HashMap<String, DocumentTypeRecord>>,
    drafts: tokio::sync::Mutex<HashMap<(String, String), CaseDocument>>,
    counts: HashMap<String, u64>,
    failing: bool,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            cases: tokio::sync::Mutex::new(HashMap::new()),
            doc_types: tokio::sync::Mutex::new(HashMap::new()),
            drafts: tokio::sync::Mutex::new(HashMap::new()),
            counts: HashMap::from([
                ("document_types".to_string(), 4),
                ("states".to_string(), 51),
                ("coverage_matrix".to_string(), 12),
            ]),
            failing: false,
        }
    }

    /// Every call fails with a 503 from upstream.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new()
        }
    }

    /// Drop a table so its count query fails.
    pub fn without_table(mut self, table: &str) -> Self {
        self.counts.remove(table);
        self
    }

    pub async fn add_case(&self, id: &str, state_code: &str) {
        self.cases.lock().await.insert(
            id.to_string(),
            CaseRecord {
                id: id.to_string(),
                title: Some("Unit 4B".to_string()),
                state_code: Some(state_code.to_string()),
                status: Some("open".to_string()),
                created_at: Some("2024-01-01T00:00:00Z".to_string()),
            },
        );
    }

    pub async fn add_doc_type(&self, id: &str, name: &str) {
        self.doc_types.lock().await.insert(
            id.to_string(),
            DocumentTypeRecord {
                id: id.to_string(),
                name: name.to_string(),
                slug: None,
            },
        );
    }

    pub async fn add_draft(&self, case_id: &str, doc_type_id: &str, data: serde_json::Value) {
        self.drafts.lock().await.insert(
            (case_id.to_string(), doc_type_id.to_string()),
            CaseDocument {
                case_id: case_id.to_string(),
                document_type_id: doc_type_id.to_string(),
                status: Some("draft".to_string()),
                data: DraftRecord::from_json(data),
                generated_at: None,
                updated_at: Some("2024-01-05T10:00:00Z".to_string()),
            },
        );
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing {
            Err(StoreError::Status(503, "upstream unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl CaseStore for MockStore {
    async fn find_case(
        &self,
        _token: &str,
        case_id: &str,
    ) -> Result<Option<CaseRecord>, StoreError> {
        self.check()?;
        Ok(self.cases.lock().await.get(case_id).cloned())
    }

    async fn find_document_type(
        &self,
        _token: &str,
        doc_type_id: &str,
    ) -> Result<Option<DocumentTypeRecord>, StoreError> {
        self.check()?;
        Ok(self.doc_types.lock().await.get(doc_type_id).cloned())
    }

    async fn find_draft(
        &self,
        _token: &str,
        case_id: &str,
        doc_type_id: &str,
    ) -> Result<Option<CaseDocument>, StoreError> {
        self.check()?;
        let key = (case_id.to_string(), doc_type_id.to_string());
        Ok(self.drafts.lock().await.get(&key).cloned())
    }

    async fn table_count(&self, table: &str) -> Result<u64, StoreError> {
        self.check()?;
        self.counts.get(table).copied().ok_or_else(|| {
            StoreError::Status(404, format!("relation \"{}\" does not exist", table))
        })
    }
}

/// State with one CA case, a Notice of Non-Renewal document type and its draft.
pub async fn seeded_state() -> AppState {
    let store = MockStore::new();
    store.add_case(CASE_ID, "CA").await;
    store
        .add_doc_type(NNR_DOC_TYPE_ID, "Notice of Non-Renewal")
        .await;
    store
        .add_draft(
            CASE_ID,
            NNR_DOC_TYPE_ID,
            serde_json::json!({
                "tenant_name": "Jane Doe",
                "property_address": "12 Elm St, Oakland, CA",
                "otice_date": "2024-01-05",
                "move_out_date": "2024-03-31",
                "landlord_name": "Acme Rentals",
                "landlord_phone": "555-0100",
                "landlord_email": "office@acme.test"
            }),
        )
        .await;
    state_with(store)
}

pub fn state_with(store: MockStore) -> AppState {
    AppState::with_backend(Arc::new(MockIdentity::new(VALID_TOKEN)), Arc::new(store))
}

pub fn bearer() -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", VALID_TOKEN))
}
