pub mod extract;
pub mod routes;

pub use extract::Payload;
pub use routes::{create_router, AppState};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

/// JSON error body shared by every route: `{"error": ..., "statusCode": ...}`
pub fn error_response(status: StatusCode, message: &str) -> Response {
    let body = Json(json!({
        "error": message,
        "statusCode": status.as_u16(),
    }));

    (status, body).into_response()
}
