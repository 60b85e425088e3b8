use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use super::identity::IdentityProvider;
use super::model::{AuthError, AuthUser, Claims};

/// Audience Supabase puts on tokens of signed-in users
pub const AUTHENTICATED_AUDIENCE: &str = "authenticated";

/// Verifies Supabase access tokens locally with the project's JWT secret.
pub struct JwtIdentity {
    key: DecodingKey,
    validation: Validation,
}

impl JwtIdentity {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[AUTHENTICATED_AUDIENCE]);
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Validate and decode a token
    pub fn validate_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(token, &self.key, &self.validation)?;
        Ok(token_data.claims)
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentity {
    async fn verify(&self, token: &str) -> Result<AuthUser, AuthError> {
        let claims = self
            .validate_token(token)
            .map_err(|_| AuthError::Rejected("Invalid or expired token".to_string()))?;

        if claims.sub.is_empty() {
            return Err(AuthError::Rejected("Invalid token subject".to_string()));
        }

        Ok(AuthUser {
            id: claims.sub,
            email: claims.email,
            access_token: token.to_string(),
        })
    }
}
