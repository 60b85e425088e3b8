//! Application state and the data-store boundary.
//!
//! - `models` - rows read from Supabase
//! - `supabase` - PostgREST-backed [`CaseStore`]

pub mod models;
pub mod supabase;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::auth::{IdentityProvider, JwtIdentity, SupabaseIdentity};
use crate::config::{AppConfig, SupabaseConfig};
use crate::document::TemplateRegistry;
use crate::error::ApiError;

pub use models::{CaseDocument, CaseRecord, DocumentTypeRecord};
pub use supabase::PostgrestStore;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("store returned {0}: {1}")]
    Status(u16, String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Read access to cases, document types and drafts.
///
/// Methods taking a `token` run with the caller's credential so row-level
/// security decides what is visible; a row the caller cannot see is `None`.
#[async_trait]
pub trait CaseStore: Send + Sync {
    async fn find_case(&self, token: &str, case_id: &str)
        -> Result<Option<CaseRecord>, StoreError>;

    async fn find_document_type(
        &self,
        token: &str,
        doc_type_id: &str,
    ) -> Result<Option<DocumentTypeRecord>, StoreError>;

    async fn find_draft(
        &self,
        token: &str,
        case_id: &str,
        doc_type_id: &str,
    ) -> Result<Option<CaseDocument>, StoreError>;

    /// Exact row count of `table`, using only the anon key.
    async fn table_count(&self, table: &str) -> Result<u64, StoreError>;
}

/// Collaborators that only exist when Supabase is configured.
#[derive(Clone)]
pub struct Backend {
    pub identity: Arc<dyn IdentityProvider>,
    pub store: Arc<dyn CaseStore>,
}

#[derive(Clone)]
pub struct AppState {
    backend: Result<Backend, String>,
    pub registry: Arc<TemplateRegistry>,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Self {
        let backend = match &config.supabase {
            Ok(supabase) => Self::connect(supabase),
            Err(e) => Err(e.to_string()),
        };
        Self {
            backend,
            registry: Arc::new(TemplateRegistry::with_defaults()),
        }
    }

    fn connect(config: &SupabaseConfig) -> Result<Backend, String> {
        let http_client = reqwest::Client::builder()
            .pool_idle_timeout(std::time::Duration::from_secs(900))
            .user_agent(concat!("noticepack-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| format!("failed to create HTTP client: {}", e))?;

        let identity: Arc<dyn IdentityProvider> = match &config.jwt_secret {
            Some(secret) => {
                log::info!("Verifying access tokens locally (SUPABASE_JWT_SECRET set)");
                Arc::new(JwtIdentity::new(secret))
            }
            None => Arc::new(SupabaseIdentity::new(config.clone(), http_client)),
        };

        Ok(Backend {
            identity,
            store: Arc::new(PostgrestStore::new(config)),
        })
    }

    /// State backed by the given collaborators, with the default templates.
    pub fn with_backend(identity: Arc<dyn IdentityProvider>, store: Arc<dyn CaseStore>) -> Self {
        Self {
            backend: Ok(Backend { identity, store }),
            registry: Arc::new(TemplateRegistry::with_defaults()),
        }
    }

    /// State whose backend endpoints answer 500 with `reason`.
    pub fn unconfigured(reason: impl Into<String>) -> Self {
        Self {
            backend: Err(reason.into()),
            registry: Arc::new(TemplateRegistry::with_defaults()),
        }
    }

    pub fn backend(&self) -> Result<&Backend, ApiError> {
        self.backend
            .as_ref()
            .map_err(|reason| ApiError::Configuration(reason.clone()))
    }
}
