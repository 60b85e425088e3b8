//! Runtime configuration read from the environment (and `.env`).

use std::env;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_CORS_ORIGINS: [&str; 3] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
];

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

/// Connection details for the hosted backend.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL without a trailing slash, e.g. `https://xyz.supabase.co`.
    pub url: String,
    pub anon_key: String,
    /// When set, access tokens are verified locally instead of via `/auth/v1/user`.
    pub jwt_secret: Option<String>,
}

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            jwt_secret: None,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |keys: &[&str]| {
            keys.iter()
                .filter_map(|k| lookup(*k))
                .map(|v| v.trim().to_string())
                .find(|v| !v.is_empty())
        };

        let url = get(&["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"])
            .ok_or(ConfigError::Missing("SUPABASE_URL"))?;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid("SUPABASE_URL", url));
        }
        let anon_key = get(&["SUPABASE_ANON_KEY", "NEXT_PUBLIC_SUPABASE_ANON_KEY"])
            .ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?;

        let mut config = Self::new(url, anon_key);
        config.jwt_secret = get(&["SUPABASE_JWT_SECRET"]);
        Ok(config)
    }

    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.url)
    }

    pub fn auth_user_url(&self) -> String {
        format!("{}/auth/v1/user", self.url)
    }
}

/// Server settings plus the (possibly missing) backend configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub cors_origins: Vec<String>,
    pub supabase: Result<SupabaseConfig, ConfigError>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let bind_addr = env::var("BIND_ADDR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let cors_origins = env::var("CORS_ALLOWED_ORIGINS")
            .ok()
            .map(|v| parse_origins(&v))
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect());

        let supabase = SupabaseConfig::from_env();
        if let Err(ref e) = supabase {
            log::error!("Supabase is not configured ({}); backend endpoints will return 500", e);
        }

        Self {
            bind_addr,
            cors_origins,
            supabase,
        }
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
