use async_trait::async_trait;
use postgrest::{Builder, Postgrest};
use serde::de::DeserializeOwned;

use super::models::{CaseDocument, CaseRecord, DocumentTypeRecord};
use super::{CaseStore, StoreError};
use crate::config::SupabaseConfig;

/// [`CaseStore`] over Supabase's PostgREST API.
pub struct PostgrestStore {
    client: Postgrest,
}

/// The parts of a PostgREST response we look at.
struct Fetched {
    status: u16,
    content_range: Option<String>,
    body: String,
}

impl PostgrestStore {
    pub fn new(config: &SupabaseConfig) -> Self {
        let client = Postgrest::new(config.rest_url()).insert_header("apikey", &config.anon_key);
        Self { client }
    }

    async fn fetch(builder: Builder) -> Result<Fetched, StoreError> {
        let response = builder
            .execute()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let content_range = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !(200..300).contains(&status) {
            log::error!("PostgREST request failed with {}: {}", status, body);
            return Err(StoreError::Status(status, error_message(&body)));
        }

        Ok(Fetched {
            status,
            content_range,
            body,
        })
    }

    /// Run a `limit(1)` query and return the first row, if any.
    async fn first_row<T: DeserializeOwned>(builder: Builder) -> Result<Option<T>, StoreError> {
        let fetched = Self::fetch(builder.limit(1)).await?;
        let rows: Vec<T> = serde_json::from_str(&fetched.body)
            .map_err(|e| StoreError::Decode(format!("{} (status {})", e, fetched.status)))?;
        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl CaseStore for PostgrestStore {
    async fn find_case(
        &self,
        token: &str,
        case_id: &str,
    ) -> Result<Option<CaseRecord>, StoreError> {
        let query = self
            .client
            .from("cases")
            .auth(token)
            .select("id,title,state_code,status,created_at")
            .eq("id", case_id);
        Self::first_row(query).await
    }

    async fn find_document_type(
        &self,
        token: &str,
        doc_type_id: &str,
    ) -> Result<Option<DocumentTypeRecord>, StoreError> {
        let query = self
            .client
            .from("document_types")
            .auth(token)
            .select("*")
            .eq("id", doc_type_id);
        Self::first_row(query).await
    }

    async fn find_draft(
        &self,
        token: &str,
        case_id: &str,
        doc_type_id: &str,
    ) -> Result<Option<CaseDocument>, StoreError> {
        let query = self
            .client
            .from("case_documents")
            .auth(token)
            .select("case_id,document_type_id,status,data,generated_at,updated_at")
            .eq("case_id", case_id)
            .eq("document_type_id", doc_type_id);
        Self::first_row(query).await
    }

    async fn table_count(&self, table: &str) -> Result<u64, StoreError> {
        let query = self.client.from(table).select("*").exact_count().limit(1);
        let fetched = Self::fetch(query).await?;
        let range = fetched
            .content_range
            .ok_or_else(|| StoreError::Decode("missing Content-Range header".to_string()))?;
        parse_content_range_total(&range)
            .ok_or_else(|| StoreError::Decode(format!("bad Content-Range: {}", range)))
    }
}

/// Total from a Content-Range header such as `0-24/3573` or `*/0`.
pub fn parse_content_range_total(value: &str) -> Option<u64> {
    let (_, total) = value.trim().rsplit_once('/')?;
    total.parse().ok()
}

/// PostgREST error bodies carry a `message`; fall back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_content_range_total() {
        assert_eq!(parse_content_range_total("0-24/3573"), Some(3573));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total(" 0-0/12 "), Some(12));
        assert_eq!(parse_content_range_total("0-24/*"), None);
        assert_eq!(parse_content_range_total("garbage"), None);
    }

    #[test]
    fn test_error_message_prefers_message_field() {
        assert_eq!(
            error_message(r#"{"code":"42P01","message":"relation \"states\" does not exist"}"#),
            "relation \"states\" does not exist"
        );
        assert_eq!(error_message("  Bad Gateway \n"), "Bad Gateway");
    }
}
