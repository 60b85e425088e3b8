use actix_web::http::header::AUTHORIZATION;
use actix_web::HttpRequest;

use super::identity::IdentityProvider;
use super::model::{AuthError, AuthUser};

/// Extract token from Authorization header. The scheme is matched
/// case-insensitively.
pub fn extract_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|auth| {
            let (scheme, token) = auth.trim().split_once(' ')?;
            let token = token.trim();
            (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty())
                .then(|| token.to_string())
        })
}

/// Validate the request's bearer token and return the caller
pub async fn authenticate(
    req: &HttpRequest,
    identity: &dyn IdentityProvider,
) -> Result<AuthUser, AuthError> {
    let token = extract_token(req).ok_or(AuthError::MissingToken)?;

    identity.verify(&token).await.map_err(|e| {
        log::warn!("Token validation failed: {}", e);
        e
    })
}
