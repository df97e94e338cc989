use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, StatusCode};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::problem::{Problem, ProblemResponse};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("failed to create token")]
    TokenCreation,

    #[error("invalid or expired token")]
    InvalidToken,
}

/// Bearer token payload. `sub` carries the user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub exp: i64,
}

/// HS256 signing/verification keys with a fixed token lifetime.
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtKeys {
    /// Tokens live for 7 days, like the reference deployment.
    pub fn new(secret: &[u8]) -> Self {
        Self::with_ttl(secret, Duration::days(7))
    }

    pub fn with_ttl(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn sign(&self, user_id: Uuid, email: &str) -> Result<String, AuthError> {
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            exp: (Utc::now() + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding).map_err(|_| AuthError::TokenCreation)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }
}

/// Identity of the authenticated caller, extracted from the bearer token.
/// Requires an `Extension<Arc<JwtKeys>>` layer on the router.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ProblemResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let keys = parts
            .extensions
            .get::<Arc<JwtKeys>>()
            .cloned()
            .ok_or_else(|| unauthorized("authentication is not configured"))?;

        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| unauthorized("authentication required"))?;

        let claims = keys
            .verify(token)
            .map_err(|e| unauthorized(e.to_string()))?;

        Ok(AuthUser {
            id: claims.sub,
            email: claims.email,
        })
    }
}

fn unauthorized(detail: impl Into<String>) -> ProblemResponse {
    Problem::new(StatusCode::UNAUTHORIZED, "Unauthorized", detail)
        .with_code("AUTH_REQUIRED")
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_verify_roundtrip() {
        let keys = JwtKeys::new(b"test-secret");
        let id = Uuid::new_v4();

        let token = keys.sign(id, "user@example.com").unwrap();
        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.sub, id);
        assert_eq!(claims.email, "user@example.com");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let keys = JwtKeys::new(b"secret-a");
        let other = JwtKeys::new(b"secret-b");

        let token = keys.sign(Uuid::new_v4(), "user@example.com").unwrap();
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = JwtKeys::with_ttl(b"test-secret", Duration::seconds(-120));
        let token = keys.sign(Uuid::new_v4(), "user@example.com").unwrap();
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let keys = JwtKeys::new(b"test-secret");
        assert!(keys.verify("not-a-token").is_err());
    }
}
