//! Session Service
//! Mission: Drive the register / login / logout / identify lifecycle
//!
//! Sessions move `Anonymous -> Authenticated -> Revoked`. Tokens are stateless
//! until logout, at which point they are added to the revocation registry.

use crate::auth::{
    jwt::{JwtHandler, TokenError},
    models::Claims,
    password::PasswordHasher,
    revocation::RevocationRegistry,
    user_store::{StoreError, UserStore},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

const MIN_PASSWORD_LEN: usize = 6;

/// Failure kinds surfaced by the session lifecycle
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("User already exists")]
    DuplicateUser,
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("User has been logged out. Please login again to continue.")]
    Revoked,
    #[error("Forbidden")]
    Forbidden,
    #[error("Failed to hash password")]
    HashingFailure,
    #[error("Failed to issue token")]
    TokenIssuance,
}

impl From<StoreError> for SessionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUser(_) => SessionError::DuplicateUser,
        }
    }
}

/// Orchestrates credential storage, hashing, token issuance and revocation
pub struct SessionService {
    users: Arc<UserStore>,
    hasher: PasswordHasher,
    tokens: Arc<JwtHandler>,
    revoked: Arc<RevocationRegistry>,
}

impl SessionService {
    pub fn new(
        users: Arc<UserStore>,
        hasher: PasswordHasher,
        tokens: Arc<JwtHandler>,
        revoked: Arc<RevocationRegistry>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            revoked,
        }
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    pub fn revocations(&self) -> &RevocationRegistry {
        &self.revoked
    }

    /// Register a new account. Does not log the user in.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), SessionError> {
        validate_registration(username, password)?;

        // Cheap rejection before paying for a bcrypt round
        if self.users.find(username).is_some() {
            warn!("❌ Registration rejected, user exists: {}", username);
            return Err(SessionError::DuplicateUser);
        }

        let password_hash = self.hasher.hash(password).await.map_err(|e| {
            error!("Failed to hash password for {}: {:#}", username, e);
            SessionError::HashingFailure
        })?;

        self.users.insert(username, password_hash).map_err(|e| {
            warn!("❌ Registration lost race: {}", e);
            SessionError::from(e)
        })?;

        Ok(())
    }

    /// Verify credentials and issue a token
    pub async fn login(&self, username: &str, password: &str) -> Result<String, SessionError> {
        info!("🔐 Login attempt: {}", username);

        let user = self.users.find(username).ok_or(SessionError::UserNotFound)?;

        if !self.hasher.verify(password, &user.password_hash).await {
            warn!("❌ Failed login attempt: {}", username);
            return Err(SessionError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user.username).map_err(|e| {
            error!("Token issuance failed for {}: {}", username, e);
            SessionError::TokenIssuance
        })?;

        info!("✅ Login successful: {}", username);
        Ok(token)
    }

    /// Revoke whatever token string is presented, valid or not
    pub fn logout(&self, token: Option<&str>) -> Result<(), SessionError> {
        let token = present(token)?;

        if self.revoked.revoke(token) {
            info!("🚪 Token revoked ({} total)", self.revoked.len());
        }

        Ok(())
    }

    /// Resolve a presented token to its claims
    pub fn identify(&self, token: Option<&str>) -> Result<Claims, SessionError> {
        let token = present(token)?;

        if self.revoked.is_revoked(token) {
            return Err(SessionError::Revoked);
        }

        self.tokens.verify(token).map_err(|e| match e {
            TokenError::InvalidSignature(_)
            | TokenError::Issue(_)
            | TokenError::ExpiryOverflow => SessionError::Forbidden,
        })
    }
}

fn present(token: Option<&str>) -> Result<&str, SessionError> {
    match token {
        Some(t) if !t.is_empty() => Ok(t),
        _ => Err(SessionError::Unauthorized),
    }
}

fn validate_registration(username: &str, password: &str) -> Result<(), SessionError> {
    if username.is_empty() {
        return Err(SessionError::Validation("username should not be empty"));
    }
    if password.is_empty() {
        return Err(SessionError::Validation("password should not be empty"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SessionError::Validation(
            "password should contain atleast 6 characters",
        ));
    }
    Ok(())
}
