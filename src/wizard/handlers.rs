use actix_web::error::InternalError;
use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use super::schema::WizardSchema;
use super::validation::ValidationError;
use crate::document::{DocumentKind, DraftRecord};
use crate::ErrorResponse;

/// Body of `POST /api/wizard/{kind}/validate`
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<ValidationError>,
}

#[utoipa::path(
    get,
    path = "/api/wizard/{kind}",
    tag = "Wizard",
    params(
        ("kind" = String, Path, description = "Document kind slug, e.g. notice_of_non_renewal")
    ),
    responses(
        (status = 200, description = "Form schema (generic schema for unknown kinds)", body = WizardSchema)
    )
)]
pub async fn get_schema(kind: web::Path<String>) -> HttpResponse {
    let schema = WizardSchema::for_kind(DocumentKind::from_slug(&kind));
    HttpResponse::Ok().json(schema)
}

#[utoipa::path(
    post,
    path = "/api/wizard/{kind}/validate",
    tag = "Wizard",
    params(
        ("kind" = String, Path, description = "Document kind slug")
    ),
    request_body(content = Object, description = "Draft fields keyed by field key"),
    responses(
        (status = 200, description = "Draft is complete", body = ValidationResponse),
        (status = 422, description = "Draft has invalid or missing fields", body = ValidationResponse)
    )
)]
pub async fn validate_draft(
    kind: web::Path<String>,
    draft: web::Json<DraftRecord>,
) -> HttpResponse {
    let kind = kind.into_inner();
    let schema = WizardSchema::for_kind(DocumentKind::from_slug(&kind));

    match schema.validate(&draft) {
        Ok(()) => HttpResponse::Ok().json(ValidationResponse {
            ok: true,
            error: None,
            fields: Vec::new(),
        }),
        Err(errors) => {
            log::debug!("Draft for {} failed validation: {}", kind, errors);
            HttpResponse::UnprocessableEntity().json(ValidationResponse {
                ok: false,
                error: Some(errors.summary()),
                fields: errors.errors().to_vec(),
            })
        }
    }
}

/// Malformed bodies get the same `{ ok: false, error }` envelope as every
/// other failure instead of actix's plain-text 400.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let body = ErrorResponse::with_detail("Invalid JSON body", &err.to_string());
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/wizard/{kind}").route(web::get().to(get_schema)))
        .service(
            web::resource("/wizard/{kind}/validate")
                .app_data(json_config())
                .route(web::post().to(validate_draft)),
        );
}
