//! HTTP-facing error type.
//!
//! Every failure surfaced by a handler is turned into an [`ErrorResponse`]
//! body with the matching status code.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::auth::AuthError;
use crate::config::ConfigError;
use crate::db::StoreError;
use crate::document::RenderError;
use crate::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("server is not configured: {0}")]
    Configuration(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("upstream request failed: {0}")]
    Store(#[from] StoreError),
    #[error("failed to render PDF")]
    Render(#[from] RenderError),
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::Configuration(err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Upstream(detail) => ApiError::Store(StoreError::Transport(detail)),
            other => ApiError::Unauthorized(other.to_string()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Render(err) => {
                ErrorResponse::with_detail(&self.to_string(), &err.to_string())
            }
            _ => ErrorResponse::new(&self.to_string()),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Unauthorized("Missing access token".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::NotFound("Case not found".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(ConfigError::Missing("SUPABASE_URL")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_auth_rejection_maps_to_unauthorized() {
        let err = ApiError::from(AuthError::Rejected("Invalid token".into()));
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let err = ApiError::from(AuthError::Upstream("timeout".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn test_render_error_body_has_detail() {
        let err = ApiError::from(RenderError::Save("disk full".into()));
        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["ok"], false);
        assert_eq!(json["error"], "failed to render PDF");
        assert_eq!(json["detail"], "failed to write PDF: disk full");
    }
}
