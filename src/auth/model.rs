use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Caller identity established from a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
    /// The raw access token, forwarded to the data store so row-level
    /// security applies to every query.
    pub access_token: String,
}

/// Subset of the Supabase access-token claims we rely on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    #[serde(default)]
    pub email: Option<String>,
    pub exp: usize,
    #[serde(default)]
    pub iat: usize,
    #[serde(default)]
    pub aud: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// User payload returned by `GET /auth/v1/user`
#[derive(Debug, Clone, Deserialize)]
pub struct GoTrueUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing access token")]
    MissingToken,
    #[error("{0}")]
    Rejected(String),
    #[error("identity service unavailable: {0}")]
    Upstream(String),
}
