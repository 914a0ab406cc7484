//! Authentication API Endpoints
//! Mission: Expose register, login, logout and the protected profile route

use crate::api::{error_response, Payload};
use crate::auth::{
    middleware::{extract_claims, token_from_headers},
    models::{Credentials, LoginResponse, MessageResponse, ProfileResponse},
    session::{SessionError, SessionService},
};
use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::info;

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub sessions: Arc<SessionService>,
}

impl AuthState {
    pub fn new(sessions: Arc<SessionService>) -> Self {
        Self { sessions }
    }
}

/// Register endpoint - POST /register (JSON or form body)
pub async fn register(
    State(state): State<AuthState>,
    Payload(payload): Payload<Credentials>,
) -> Result<(StatusCode, Json<MessageResponse>), SessionError> {
    state
        .sessions
        .register(&payload.username, &payload.password)
        .await?;

    info!("📝 Registered user: {}", payload.username);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

/// Login endpoint - POST /login
pub async fn login(
    State(state): State<AuthState>,
    Payload(payload): Payload<Credentials>,
) -> Result<Json<LoginResponse>, SessionError> {
    let token = state
        .sessions
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(LoginResponse { token }))
}

/// Logout endpoint - POST /logout (blacklists the presented token)
pub async fn logout(
    State(state): State<AuthState>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, SessionError> {
    state
        .sessions
        .logout(token_from_headers(&headers).as_deref())?;

    Ok(Json(MessageResponse::new("Logged out successfully")))
}

/// Current user - GET /me (behind auth middleware)
pub async fn me(req: Request) -> Result<Json<ProfileResponse>, SessionError> {
    let claims = extract_claims(&req).ok_or(SessionError::Unauthorized)?;

    Ok(Json(ProfileResponse {
        message: "This is a protected route".to_string(),
        user: claims.clone(),
    }))
}

impl SessionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SessionError::Validation(_) => StatusCode::BAD_REQUEST,
            SessionError::DuplicateUser => StatusCode::CONFLICT,
            SessionError::UserNotFound => StatusCode::NOT_FOUND,
            SessionError::InvalidCredentials | SessionError::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            SessionError::Revoked | SessionError::Forbidden => StatusCode::FORBIDDEN,
            SessionError::HashingFailure | SessionError::TokenIssuance => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        error_response(self.status_code(), &self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_statuses() {
        let cases = [
            (SessionError::Validation("x"), StatusCode::BAD_REQUEST),
            (SessionError::DuplicateUser, StatusCode::CONFLICT),
            (SessionError::HashingFailure, StatusCode::INTERNAL_SERVER_ERROR),
            (SessionError::UserNotFound, StatusCode::NOT_FOUND),
            (SessionError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (SessionError::Unauthorized, StatusCode::UNAUTHORIZED),
            (SessionError::Revoked, StatusCode::FORBIDDEN),
            (SessionError::Forbidden, StatusCode::FORBIDDEN),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
