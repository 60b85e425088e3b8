//! Backend connectivity check.

use std::collections::BTreeMap;

use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::AppState;

/// Reference tables every deployment is expected to have.
pub const SMOKE_TABLES: [&str; 3] = ["document_types", "states", "coverage_matrix"];

#[derive(Debug, Serialize, ToSchema)]
pub struct SmokeResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub counts: BTreeMap<String, u64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, String>,
}

#[utoipa::path(
    get,
    path = "/api/supabase-smoke",
    tag = "Health",
    responses(
        (status = 200, description = "All reference tables reachable", body = SmokeResponse),
        (status = 500, description = "Not configured or a table query failed", body = SmokeResponse)
    )
)]
pub async fn supabase_smoke(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let backend = state.backend()?;

    let mut counts = BTreeMap::new();
    let mut errors = BTreeMap::new();
    for table in SMOKE_TABLES {
        match backend.store.table_count(table).await {
            Ok(count) => {
                counts.insert(table.to_string(), count);
            }
            Err(e) => {
                log::error!("Smoke check on {} failed: {}", table, e);
                errors.insert(table.to_string(), e.to_string());
            }
        }
    }

    if errors.is_empty() {
        Ok(HttpResponse::Ok().json(SmokeResponse {
            ok: true,
            counts,
            errors,
        }))
    } else {
        Ok(HttpResponse::InternalServerError().json(SmokeResponse {
            ok: false,
            counts: BTreeMap::new(),
            errors,
        }))
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/supabase-smoke").route(web::get().to(supabase_smoke)));
}
