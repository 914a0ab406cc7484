use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::api::error_response;
use crate::auth::{api as auth_api, auth_middleware, AuthState, SessionService};
use crate::feed::{FeedError, FeedQuery, PublicFeedClient, MAX_LIMIT};
use crate::middleware::request_logging_simple;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionService>,
    pub feed: Arc<PublicFeedClient>,
}

impl AppState {
    pub fn new(sessions: Arc<SessionService>, feed: Arc<PublicFeedClient>) -> Self {
        Self { sessions, feed }
    }
}

/// Create the gateway router
pub fn create_router(state: AppState) -> Router {
    let auth_router = Router::new()
        .route("/register", post(auth_api::register))
        .route("/login", post(auth_api::login))
        .route("/logout", post(auth_api::logout))
        .with_state(AuthState::new(state.sessions.clone()));

    let protected_routes = Router::new()
        .route("/me", get(auth_api::me))
        .route_layer(middleware::from_fn_with_state(
            state.sessions.clone(),
            auth_middleware,
        ));

    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/data", get(get_data))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(auth_router)
        .layer(middleware::from_fn(request_logging_simple))
        .layer(CorsLayer::permissive())
}

// ===== Route Handlers =====

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        users: state.sessions.users().len(),
        revoked_tokens: state.sessions.revocations().len(),
    })
}

/// Proxy the public API catalogue - GET /data?category=&limit=
async fn get_data(
    State(state): State<AppState>,
    query: Result<Query<DataQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(params) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    if let Some(limit) = params.limit {
        if limit == 0 || limit > MAX_LIMIT {
            return Err(ApiError::BadRequest(format!(
                "limit must be between 1 and {}",
                MAX_LIMIT
            )));
        }
    }

    let query = FeedQuery {
        category: params.category,
        limit: params.limit,
    };

    let body = state.feed.fetch(&query).await?;
    Ok(Json(body))
}

// ===== Request/Response Types =====

#[derive(Debug, Deserialize)]
struct DataQuery {
    /// Category of the public API data
    category: Option<String>,
    /// Number of entries to return
    limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub users: usize,
    pub revoked_tokens: usize,
}

// ===== Error Handling =====

#[derive(Debug)]
enum ApiError {
    Upstream(FeedError),
    BadRequest(String),
}

impl From<FeedError> for ApiError {
    fn from(err: FeedError) -> Self {
        ApiError::Upstream(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Upstream(err) => {
                tracing::error!("Error fetching data: {}", err);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            ApiError::BadRequest(msg) => error_response(StatusCode::BAD_REQUEST, msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let err = FeedError::Status(reqwest::StatusCode::BAD_GATEWAY);
        let api_err: ApiError = err.into();

        assert_eq!(
            api_err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_bad_request_response() {
        let response = ApiError::BadRequest("nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
