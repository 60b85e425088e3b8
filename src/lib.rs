use actix_cors::Cors;
use actix_web::middleware::{Compress, Logger};
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod auth;
pub mod cases;
pub mod config;
pub mod db;
pub mod document;
pub mod error;
pub mod health;
pub mod wizard;

pub use crate::db::AppState;

/// JSON body of every failed request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: &str) -> Self {
        Self {
            ok: false,
            error: error.to_string(),
            detail: None,
        }
    }

    pub fn with_detail(error: &str, detail: &str) -> Self {
        Self {
            ok: false,
            error: error.to_string(),
            detail: Some(detail.to_string()),
        }
    }
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::cases::handlers::download_pdf,
        crate::wizard::handlers::get_schema,
        crate::wizard::handlers::validate_draft,
        crate::health::supabase_smoke
    ),
    components(
        schemas(
            ErrorResponse,
            wizard::WizardSchema,
            wizard::FieldSchema,
            wizard::FieldType,
            wizard::ValidationError,
            wizard::handlers::ValidationResponse,
            health::SmokeResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Documents", description = "PDF export of case documents."),
        (name = "Wizard", description = "Guided-form schemas and draft validation."),
        (name = "Health", description = "Backend connectivity checks.")
    ),
    servers(
        (url = "http://127.0.0.1:8080", description = "Local development server")
    )
)]
pub struct ApiDoc;

/// Mount every `/api` route. Shared by the server and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(cases::config)
            .configure(wizard::config)
            .configure(health::config),
    );
}

pub async fn run() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config::AppConfig::from_env();
    let app_state = web::Data::new(AppState::from_config(&config));

    let prometheus = PrometheusMetricsBuilder::new("noticepack_server")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::other(format!("failed to create metrics middleware: {}", e)))?;

    log::info!("Starting server at http://{}", config.bind_addr);

    let origins = config.cors_origins.clone();
    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();
        let cors = origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::ACCEPT,
                header::CONTENT_TYPE,
            ])
            .expose_headers(vec![header::CONTENT_DISPOSITION])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus)
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(app_state)
            .configure(configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .keep_alive(actix_web::http::KeepAlive::Os)
    .bind(config.bind_addr.as_str())?
    .run()
    .await
}
