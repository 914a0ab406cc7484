//! Custom extractors for API handlers.

use axum::{
    async_trait,
    body::Body,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    response::Response,
    Form,
};
use serde::de::DeserializeOwned;

use crate::api::error_response;

const BODY_LIMIT: usize = 64 * 1024;

/// Request body accepted as JSON or as `application/x-www-form-urlencoded`.
///
/// An absent or blank body yields `T::default()`, so field validation stays
/// with the handler. Every rejection uses the JSON error shape.
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();

        let bytes = axum::body::to_bytes(body, BODY_LIMIT)
            .await
            .map_err(|_| {
                error_response(StatusCode::BAD_REQUEST, "Failed to read request body")
            })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Payload(T::default()));
        }

        let is_form = parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let req = Request::from_parts(parts, Body::from(bytes));
            return Form::<T>::from_request(req, state)
                .await
                .map(|Form(value)| Payload(value))
                .map_err(|e| error_response(e.status(), &e.body_text()));
        }

        // Anything else is read as JSON, content type or not
        serde_json::from_slice(&bytes).map(Payload).map_err(|e| {
            error_response(StatusCode::BAD_REQUEST, &format!("Invalid JSON body: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::Credentials;
    use axum::http::Method;
    use axum::response::IntoResponse;

    async fn extract(content_type: Option<&str>, body: &str) -> Result<Credentials, Response> {
        let mut builder = Request::builder().method(Method::POST).uri("/register");
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        let req = builder.body(Body::from(body.to_string())).unwrap();
        Payload::<Credentials>::from_request(req, &())
            .await
            .map(|Payload(c)| c)
    }

    #[tokio::test]
    async fn test_json_body() {
        let creds = extract(
            Some("application/json"),
            r#"{"username":"alice","password":"secret1"}"#,
        )
        .await
        .unwrap();
        assert_eq!(creds.username, "alice");
        assert_eq!(creds.password, "secret1");
    }

    #[tokio::test]
    async fn test_form_body() {
        let creds = extract(
            Some("application/x-www-form-urlencoded"),
            "username=alice&password=secret%211",
        )
        .await
        .unwrap();
        assert_eq!(creds.username, "alice");
        assert_eq!(creds.password, "secret!1");
    }

    #[tokio::test]
    async fn test_empty_body_defaults() {
        let creds = extract(None, "").await.unwrap();
        assert!(creds.username.is_empty());
        assert!(creds.password.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let rejection = extract(Some("application/json"), "{not json")
            .await
            .unwrap_err();
        assert_eq!(rejection.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
