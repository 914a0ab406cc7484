//! Authentication Middleware
//! Mission: Protect routes by resolving the Authorization header to claims

use crate::auth::{models::Claims, session::SessionError, session::SessionService};
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::debug;

/// Raw token from the Authorization header. The value is taken verbatim,
/// no "Bearer " prefix handling.
// Non-UTF-8 bytes become U+FFFD, so such a value still counts as a token
// and logout can revoke it.
pub fn token_from_headers(headers: &HeaderMap) -> Option<Cow<'_, str>> {
    headers
        .get(AUTHORIZATION)
        .map(|h| String::from_utf8_lossy(h.as_bytes()))
}

/// Auth middleware that validates tokens through the session service
pub async fn auth_middleware(
    State(sessions): State<Arc<SessionService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, SessionError> {
    let claims = sessions.identify(token_from_headers(req.headers()).as_deref())?;

    debug!("Authenticated request for {}", claims.username);

    // Add claims to request extensions so handlers can access them
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Extract claims from request (use after auth middleware)
pub fn extract_claims(req: &Request) -> Option<&Claims> {
    req.extensions().get::<Claims>()
}
