//! API utilities for frontend-backend communication
//!
//! Builds URLs from [`config`](super::config) and wraps `gloo-net` requests
//! with a typed error. Every request carries the session cookie.

use gloo_net::http::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use web_sys::RequestCredentials;

use super::config::config;

/// Failure of a backend call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found")]
    NotFound,

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Failed to serialize request: {0}")]
    Encode(String),
}

/// Get the base URL for API requests
///
/// Uses the configured base when set, otherwise the page's protocol and
/// host on the configured backend port.
///
/// # Returns
/// - API base URL like "http://localhost:8080"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let api = &config().api;
    if !api.base_url.is_empty() {
        return api.base_url.clone();
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, api.port)
}

/// Build a full API URL from a path (should start with "/api/")
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

fn prepare(builder: RequestBuilder) -> RequestBuilder {
    builder
        .credentials(RequestCredentials::Include)
        .header("Accept", "application/json")
}

/// Human readable message out of an error body: `error`/`message` of a JSON
/// object, otherwise the trimmed text itself.
pub fn error_message_from_body(body: &str) -> String {
    let trimmed = body.trim();
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        for key in ["error", "message"] {
            if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
                return msg.to_string();
            }
        }
    }
    trimmed.chars().take(300).collect()
}

async fn check(response: Response) -> Result<Response, ApiError> {
    if response.status() == 404 {
        return Err(ApiError::NotFound);
    }
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let mut message = error_message_from_body(&body);
        if message.is_empty() {
            message = response.status_text();
        }
        return Err(ApiError::Http { status, message });
    }
    Ok(response)
}

async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
    let response = prepare(builder)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    check(response).await
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// GET a JSON document
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    send_for_json(Method::GET, path).await
}

/// Send a request without body and decode the JSON answer
pub async fn send_for_json<T: DeserializeOwned>(method: Method, path: &str) -> Result<T, ApiError> {
    let response = send(RequestBuilder::new(&api_url(path)).method(method)).await?;
    decode(response).await
}

/// Send a request without body, expecting no meaningful answer
pub async fn send_empty(method: Method, path: &str) -> Result<(), ApiError> {
    send(RequestBuilder::new(&api_url(path)).method(method))
        .await
        .map(|_| ())
}

/// Send a JSON body, ignoring whatever the backend answers with
pub async fn send_json<B: Serialize>(method: Method, path: &str, body: &B) -> Result<(), ApiError> {
    let request = prepare(RequestBuilder::new(&api_url(path)).method(method))
        .json(body)
        .map_err(|e| ApiError::Encode(e.to_string()))?;
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    check(response).await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_json() {
        assert_eq!(
            error_message_from_body(r#"{"error":"programName or programCode required"}"#),
            "programName or programCode required"
        );
        assert_eq!(error_message_from_body(r#"{"message":"boom"}"#), "boom");
    }

    #[test]
    fn test_error_message_from_text() {
        assert_eq!(error_message_from_body("Admin access required\n"), "Admin access required");
        assert_eq!(error_message_from_body(""), "");
    }

    #[test]
    fn test_error_display() {
        let e = ApiError::Http { status: 403, message: "Admin access required".into() };
        assert_eq!(e.to_string(), "HTTP 403: Admin access required");
    }
}
