//! Unit tests for authentication module

#[cfg(test)]
mod tests {
    use crate::auth::identity::{rejection_message, status_error, IdentityProvider};
    use crate::auth::jwt::{JwtIdentity, AUTHENTICATED_AUDIENCE};
    use crate::auth::middleware::{authenticate, extract_token};
    use crate::auth::model::{AuthError, Claims};
    use actix_web::test::TestRequest;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use uuid::Uuid;

    const SECRET: &str = "test-jwt-secret";

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("Failed to sign token")
    }

    fn claims_for(sub: &str, exp_offset: i64) -> Claims {
        let now = chrono::Utc::now().timestamp();
        Claims {
            sub: sub.to_string(),
            email: Some("landlord@example.com".to_string()),
            exp: (now + exp_offset) as usize,
            iat: now as usize,
            aud: Some(AUTHENTICATED_AUDIENCE.to_string()),
            role: Some("authenticated".to_string()),
        }
    }

    #[test]
    fn test_extract_token_bearer() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer abc.def.ghi"))
            .to_http_request();
        assert_eq!(extract_token(&req), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn test_extract_token_scheme_is_case_insensitive() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "bearer token-1"))
            .to_http_request();
        assert_eq!(extract_token(&req), Some("token-1".to_string()));
    }

    #[test]
    fn test_extract_token_missing_or_malformed() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(extract_token(&req), None);

        let req = TestRequest::default()
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_http_request();
        assert_eq!(extract_token(&req), None);

        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer    "))
            .to_http_request();
        assert_eq!(extract_token(&req), None);
    }

    #[actix_web::test]
    async fn test_jwt_identity_accepts_valid_token() {
        let user_id = Uuid::new_v4().to_string();
        let token = sign(&claims_for(&user_id, 3600), SECRET);

        let user = JwtIdentity::new(SECRET)
            .verify(&token)
            .await
            .expect("Failed to verify token");

        assert_eq!(user.id, user_id);
        assert_eq!(user.email.as_deref(), Some("landlord@example.com"));
        assert_eq!(user.access_token, token);
    }

    #[actix_web::test]
    async fn test_jwt_identity_rejects_wrong_secret() {
        let token = sign(&claims_for("user-1", 3600), "another-secret");
        let err = JwtIdentity::new(SECRET).verify(&token).await.unwrap_err();
        assert_eq!(
            err,
            AuthError::Rejected("Invalid or expired token".to_string())
        );
    }

    #[actix_web::test]
    async fn test_jwt_identity_rejects_expired_token() {
        let token = sign(&claims_for("user-1", -3600), SECRET);
        let result = JwtIdentity::new(SECRET).verify(&token).await;
        assert!(matches!(result, Err(AuthError::Rejected(_))));
    }

    #[actix_web::test]
    async fn test_jwt_identity_rejects_wrong_audience() {
        let mut claims = claims_for("user-1", 3600);
        claims.aud = Some("anon".to_string());
        let token = sign(&claims, SECRET);
        assert!(JwtIdentity::new(SECRET).verify(&token).await.is_err());
    }

    #[actix_web::test]
    async fn test_authenticate_without_header_is_missing_token() {
        let req = TestRequest::default().to_http_request();
        let err = authenticate(&req, &JwtIdentity::new(SECRET))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::MissingToken);
        assert_eq!(err.to_string(), "Missing access token");
    }

    #[actix_web::test]
    async fn test_authenticate_with_valid_header() {
        let token = sign(&claims_for("user-42", 3600), SECRET);
        let req = TestRequest::default()
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();
        let user = authenticate(&req, &JwtIdentity::new(SECRET))
            .await
            .expect("Failed to authenticate");
        assert_eq!(user.id, "user-42");
    }

    #[test]
    fn test_rejection_message_prefers_body_fields() {
        assert_eq!(
            rejection_message(r#"{"msg":"JWT expired","code":401}"#),
            "JWT expired"
        );
        assert_eq!(
            rejection_message(r#"{"error_description":"bad jwt"}"#),
            "bad jwt"
        );
        assert_eq!(rejection_message("not json"), "Invalid token");
        assert_eq!(rejection_message(r#"{"msg":""}"#), "Invalid token");
    }

    #[test]
    fn test_client_errors_from_identity_service_reject_the_token() {
        for status in [
            reqwest::StatusCode::BAD_REQUEST,
            reqwest::StatusCode::UNAUTHORIZED,
            reqwest::StatusCode::FORBIDDEN,
            reqwest::StatusCode::UNPROCESSABLE_ENTITY,
        ] {
            match status_error(status, r#"{"msg":"invalid JWT: unable to parse or verify signature"}"#) {
                AuthError::Rejected(msg) => {
                    assert_eq!(msg, "invalid JWT: unable to parse or verify signature")
                }
                other => panic!("{} should reject, got {:?}", status, other),
            }
        }
        assert!(matches!(
            status_error(reqwest::StatusCode::BAD_REQUEST, ""),
            AuthError::Rejected(ref m) if m == "Invalid token"
        ));
    }

    #[test]
    fn test_server_errors_from_identity_service_are_upstream() {
        for status in [
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            reqwest::StatusCode::SERVICE_UNAVAILABLE,
        ] {
            assert!(matches!(
                status_error(status, r#"{"msg":"down"}"#),
                AuthError::Upstream(_)
            ));
        }
    }
}
