//! Bearer-token verification against the hosted identity service.

use async_trait::async_trait;
use reqwest::StatusCode;

use super::model::{AuthError, AuthUser, GoTrueUser};
use crate::config::SupabaseConfig;

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve the caller behind `token`, or reject it.
    async fn verify(&self, token: &str) -> Result<AuthUser, AuthError>;
}

/// Asks GoTrue (`/auth/v1/user`) who owns the token.
pub struct SupabaseIdentity {
    config: SupabaseConfig,
    client: reqwest::Client,
}

impl SupabaseIdentity {
    pub fn new(config: SupabaseConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl IdentityProvider for SupabaseIdentity {
    async fn verify(&self, token: &str) -> Result<AuthUser, AuthError> {
        let response = self
            .client
            .get(self.config.auth_user_url())
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let user: GoTrueUser = response
            .json()
            .await
            .map_err(|e| AuthError::Upstream(format!("invalid user payload: {}", e)))?;
        if user.id.is_empty() {
            return Err(AuthError::Rejected("Invalid token".to_string()));
        }

        Ok(AuthUser {
            id: user.id,
            email: user.email,
            access_token: token.to_string(),
        })
    }
}

/// Any client error means GoTrue refused the token; everything else is the
/// service's own failure.
pub fn status_error(status: StatusCode, body: &str) -> AuthError {
    if status.is_client_error() {
        AuthError::Rejected(rejection_message(body))
    } else {
        AuthError::Upstream(format!("identity service returned {}", status))
    }
}

/// Pull a human-readable message out of a GoTrue error body.
pub fn rejection_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["msg", "message", "error_description", "error"]
                .iter()
                .find_map(|k| v.get(*k).and_then(|m| m.as_str()).map(str::to_string))
        })
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "Invalid token".to_string())
}
