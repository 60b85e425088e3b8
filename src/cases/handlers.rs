use actix_web::http::header::{CACHE_CONTROL, CONTENT_DISPOSITION};
use actix_web::{web, HttpRequest, HttpResponse};
use uuid::Uuid;

use crate::auth::authenticate;
use crate::db::{CaseDocument, CaseRecord, DocumentTypeRecord};
use crate::document::{self, DocumentKind, Jurisdiction, RenderError, TemplateContext};
use crate::error::ApiError;
use crate::AppState;

/// Assemble what the section builders see from the three stored rows.
pub fn build_context(
    case: &CaseRecord,
    doc_type: &DocumentTypeRecord,
    draft: CaseDocument,
) -> TemplateContext {
    let status = [draft.status.as_deref(), case.status.as_deref()]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .unwrap_or_default()
        .to_string();
    let generated_at = draft
        .stamp()
        .map(str::to_string)
        .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());

    TemplateContext {
        case_id: case.id.clone(),
        doc_type_id: doc_type.id.clone(),
        doc_name: doc_type.name.clone(),
        status,
        generated_at: Some(generated_at),
        state_code: case.state_code.clone(),
        jurisdiction: case.state_code.as_deref().and_then(Jurisdiction::parse),
        kind: DocumentKind::resolve(doc_type.slug.as_deref(), &doc_type.name),
        draft: draft.data,
    }
}

#[utoipa::path(
    get,
    path = "/api/cases/{case_id}/documents/{doc_type_id}/pdf",
    tag = "Documents",
    params(
        ("case_id" = String, Path, description = "Case UUID"),
        ("doc_type_id" = String, Path, description = "Document type ID")
    ),
    responses(
        (status = 200, description = "Generated PDF", content_type = "application/pdf", body = Vec<u8>),
        (status = 401, description = "Missing or rejected access token", body = crate::ErrorResponse),
        (status = 404, description = "Case, document type or draft not found", body = crate::ErrorResponse),
        (status = 500, description = "Server not configured, store failure or render failure", body = crate::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn download_pdf(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let backend = state.backend()?;
    let user = authenticate(&req, backend.identity.as_ref()).await?;

    let (case_id, doc_type_id) = path.into_inner();
    if Uuid::parse_str(&case_id).is_err() {
        return Err(ApiError::NotFound("Case not found".to_string()));
    }

    let token = user.access_token.as_str();
    let case = backend
        .store
        .find_case(token, &case_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Case not found".to_string()))?;
    let doc_type = backend
        .store
        .find_document_type(token, &doc_type_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Document type not found".to_string()))?;
    let draft = backend
        .store
        .find_draft(token, &case_id, &doc_type_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Draft not found".to_string()))?;

    let ctx = build_context(&case, &doc_type, draft);
    let registry = state.registry.clone();
    let generated = web::block(move || document::generate(&registry, &ctx))
        .await
        .map_err(|e| RenderError::Task(e.to_string()))?
        .map_err(|e| {
            log::error!("PDF render failed for case {}: {}", case_id, e);
            e
        })?;

    log::info!(
        "Rendered {} ({} bytes, template {}) for user {}",
        generated.filename,
        generated.pdf.len(),
        generated.template,
        user.id
    );

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", generated.filename),
        ))
        .insert_header((CACHE_CONTROL, "no-store"))
        .body(generated.pdf))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/cases/{case_id}/documents/{doc_type_id}/pdf")
            .route(web::get().to(download_pdf)),
    );
}
