//! JWT Token Handler
//! Mission: Issue and verify HS256 session tokens bound to the server secret

use crate::auth::models::Claims;
use anyhow::{bail, Result};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid token signature: {0}")]
    InvalidSignature(#[source] jsonwebtoken::errors::Error),
    #[error("failed to sign token: {0}")]
    Issue(#[source] jsonwebtoken::errors::Error),
    #[error("token expiry overflows the timestamp range")]
    ExpiryOverflow,
}

/// Upper bound on a configurable token lifetime (100 years)
pub const MAX_TOKEN_TTL_SECS: u64 = 100 * 365 * 24 * 3600;

/// JWT Handler for token operations
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: Option<u64>,
}

impl JwtHandler {
    /// Create a handler whose tokens never expire
    pub fn new(secret: &str) -> Result<Self> {
        Self::with_ttl(secret, None)
    }

    /// Create a handler that stamps an `exp` claim `ttl_secs` after issuance
    pub fn with_ttl(secret: &str, ttl_secs: Option<u64>) -> Result<Self> {
        if secret.is_empty() {
            bail!("JWT secret must not be empty");
        }
        if let Some(ttl) = ttl_secs {
            if ttl == 0 || ttl > MAX_TOKEN_TTL_SECS {
                bail!(
                    "token TTL {}s out of range 1..={}",
                    ttl,
                    MAX_TOKEN_TTL_SECS
                );
            }
        }

        // exp is optional; when present it is still checked
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = true;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs,
        })
    }

    pub fn ttl_secs(&self) -> Option<u64> {
        self.ttl_secs
    }

    /// Generate a JWT token for a user
    pub fn issue(&self, username: &str) -> Result<String, TokenError> {
        let iat = Utc::now().timestamp().max(0) as usize;
        let exp = match self.ttl_secs {
            Some(ttl) => Some(
                usize::try_from(ttl)
                    .ok()
                    .and_then(|ttl| iat.checked_add(ttl))
                    .ok_or(TokenError::ExpiryOverflow)?,
            ),
            None => None,
        };
        let claims = Claims {
            username: username.to_string(),
            iat,
            exp,
        };

        debug!("Generating JWT for user {}", username);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Issue)
    }

    /// Validate a JWT token and extract claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let decoded = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(TokenError::InvalidSignature)?;

        debug!("Validated JWT for user {}", decoded.claims.username);

        Ok(decoded.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_generation_and_validation() {
        let handler = JwtHandler::new("test-secret-key-12345").unwrap();

        let token = handler.issue("testuser").unwrap();
        assert!(!token.is_empty());

        let claims = handler.verify(&token).unwrap();
        assert_eq!(claims.username, "testuser");
        assert!(claims.iat > 0);
        assert!(claims.exp.is_none());
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(JwtHandler::new("").is_err());
    }

    #[test]
    fn test_invalid_token_rejected() {
        let handler = JwtHandler::new("test-secret-key-12345").unwrap();

        let result = handler.verify("invalid.token.here");
        assert!(matches!(result, Err(TokenError::InvalidSignature(_))));

        assert!(handler.verify("").is_err());
    }

    #[test]
    fn test_different_secrets_reject() {
        let handler1 = JwtHandler::new("secret1").unwrap();
        let handler2 = JwtHandler::new("secret2").unwrap();

        let token = handler1.issue("alice").unwrap();

        let result = handler2.verify(&token);
        assert!(matches!(result, Err(TokenError::InvalidSignature(_))));
    }

    #[test]
    fn test_ttl_adds_expiry() {
        let handler = JwtHandler::with_ttl("test-secret-key-12345", Some(3600)).unwrap();
        let token = handler.issue("alice").unwrap();

        let claims = handler.verify(&token).unwrap();
        assert_eq!(claims.exp, Some(claims.iat + 3600));
    }

    #[test]
    fn test_out_of_range_ttl_rejected() {
        assert!(JwtHandler::with_ttl("secret", Some(u64::MAX)).is_err());
        assert!(JwtHandler::with_ttl("secret", Some(MAX_TOKEN_TTL_SECS + 1)).is_err());
        assert!(JwtHandler::with_ttl("secret", Some(0)).is_err());

        let handler = JwtHandler::with_ttl("secret", Some(MAX_TOKEN_TTL_SECS)).unwrap();
        let claims = handler.verify(&handler.issue("alice").unwrap()).unwrap();
        assert_eq!(claims.exp, Some(claims.iat + MAX_TOKEN_TTL_SECS as usize));
    }

    #[test]
    fn test_expired_token_rejected() {
        let secret = "test-secret-key-12345";
        let handler = JwtHandler::new(secret).unwrap();

        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            username: "alice".to_string(),
            iat: now - 7200,
            exp: Some(now - 3600),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            handler.verify(&token),
            Err(TokenError::InvalidSignature(_))
        ));
    }
}
