//! Reqwest-backed REST transport adapter.
//!
//! This adapter owns transport details only: request dispatch against the
//! configured base URL, bearer-token attachment read from the session store,
//! and mapping of connection, HTTP-status, and JSON failures onto
//! [`ApiError`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use serde_json::Value;
use tracing::debug;

use crate::domain::ports::{ApiTransport, HttpMethod};
use crate::domain::session::SessionStore;
use crate::domain::{ApiError, ApiResult};

const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Transport adapter that performs JSON requests against one REST base URL.
///
/// Every request re-reads the session store, so a login or logout on the
/// shared store takes effect on the next call without rebuilding the adapter.
pub struct RestTransport {
    client: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl RestTransport {
    /// Build an adapter using a reqwest client with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: impl Into<String>,
        session: Arc<SessionStore>,
    ) -> Result<Self, reqwest::Error> {
        Self::with_timeout(
            base_url,
            session,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECONDS),
        )
    }

    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(
        base_url: impl Into<String>,
        session: Arc<SessionStore>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: normalise_base_url(base_url.into()),
            session,
        })
    }
}

#[async_trait]
impl ApiTransport for RestTransport {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> ApiResult<Value> {
        let url = format!("{}{path}", self.base_url);
        let mut request = self.client.request(method_for(method), &url);
        if let Some(bearer) = self.session.bearer_header() {
            request = request.header(header::AUTHORIZATION, bearer);
        }
        if let Some(payload) = &body {
            request = request.json(payload);
        }

        let response = request
            .send()
            .await
            .map_err(|error| map_transport_error(&error, path))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|error| map_transport_error(&error, path))?;
        if !status.is_success() {
            return Err(map_status_error(status, bytes.as_ref(), path));
        }
        parse_success_body(bytes.as_ref())
    }
}

fn method_for(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

fn normalise_base_url(raw: String) -> String {
    raw.trim_end_matches('/').to_owned()
}

/// Map connection-level reqwest failures to network errors and emit debug context.
fn map_transport_error(error: &reqwest::Error, path: &str) -> ApiError {
    let error_message = error.to_string();
    debug!(%error_message, path, "API request failed in transit");
    ApiError::network(error_message)
}

/// Map a non-success HTTP status to an [`ApiError::Http`] carrying the server
/// message when the body follows the `{"error": "..."}` convention.
fn map_status_error(status: StatusCode, body: &[u8], path: &str) -> ApiError {
    let message = extract_error_message(body).unwrap_or_else(|| {
        let preview = body_preview(body);
        if preview.is_empty() {
            format!("status {}", status.as_u16())
        } else {
            format!("status {}: {preview}", status.as_u16())
        }
    });
    debug!(status = status.as_u16(), path, %message, "API request was rejected");
    ApiError::http(status.as_u16(), message)
}

fn extract_error_message(body: &[u8]) -> Option<String> {
    let decoded: Value = serde_json::from_slice(body).ok()?;
    decoded
        .get("error")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_owned)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

/// Decode a success body, treating an empty body as an explicit JSON null.
fn parse_success_body(body: &[u8]) -> ApiResult<Value> {
    if body.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body)
        .map_err(|error| ApiError::decode(format!("invalid JSON in API response: {error}")))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network transport mapping helpers.

    use super::*;
    use rstest::rstest;

    #[test]
    fn prefers_server_error_field_over_status_text() {
        let error = map_status_error(
            StatusCode::UNAUTHORIZED,
            r#"{"error": "Credenciais inválidas"}"#.as_bytes(),
            "/auth/login",
        );
        assert_eq!(error, ApiError::http(401_u16, "Credenciais inválidas"));
    }

    #[rstest]
    #[case::not_json(b"upstream exploded".as_slice(), "status 500: upstream exploded")]
    #[case::missing_field(br#"{"message": "nope"}"#.as_slice(), r#"status 500: {"message": "nope"}"#)]
    #[case::non_string_field(br#"{"error": 42}"#.as_slice(), r#"status 500: {"error": 42}"#)]
    #[case::blank_field(br#"{"error": "  "}"#.as_slice(), r#"status 500: {"error": " "}"#)]
    #[case::empty_body(b"".as_slice(), "status 500")]
    fn falls_back_to_status_and_preview(#[case] body: &[u8], #[case] expected: &str) {
        let error = map_status_error(StatusCode::INTERNAL_SERVER_ERROR, body, "/alunos");
        assert_eq!(error, ApiError::http(500_u16, expected));
    }

    #[test]
    fn truncates_long_bodies_in_previews() {
        let body = "x".repeat(500);
        let preview = body_preview(body.as_bytes());
        assert_eq!(preview.chars().count(), 163, "160 characters plus ellipsis");
        assert!(preview.ends_with("..."), "long previews should be elided");
    }

    #[test]
    fn collapses_whitespace_in_previews() {
        let preview = body_preview(b"<html>\n  <body>\n    oops\n  </body>\n</html>");
        assert_eq!(preview, "<html> <body> oops </body> </html>");
    }

    #[rstest]
    #[case::empty(b"".as_slice(), Value::Null)]
    #[case::object(br#"{"id": 7}"#.as_slice(), serde_json::json!({"id": 7}))]
    #[case::array(b"[1, 2]".as_slice(), serde_json::json!([1, 2]))]
    fn parses_success_bodies(#[case] body: &[u8], #[case] expected: Value) {
        let decoded = parse_success_body(body).expect("body should decode");
        assert_eq!(decoded, expected);
    }

    #[test]
    fn rejects_malformed_success_bodies() {
        let error = parse_success_body(b"<html>maintenance</html>").expect_err("decode must fail");
        assert!(
            matches!(error, ApiError::Decode { .. }),
            "non-JSON success bodies should map to decode errors",
        );
    }

    #[rstest]
    #[case::trailing_slash("https://api.example.test/api/", "https://api.example.test/api")]
    #[case::doubled_slash("https://api.example.test/api//", "https://api.example.test/api")]
    #[case::already_bare("https://api.example.test/api", "https://api.example.test/api")]
    fn normalises_base_urls(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalise_base_url(raw.to_owned()), expected);
    }

    #[rstest]
    #[case::get(HttpMethod::Get, reqwest::Method::GET)]
    #[case::post(HttpMethod::Post, reqwest::Method::POST)]
    #[case::put(HttpMethod::Put, reqwest::Method::PUT)]
    #[case::delete(HttpMethod::Delete, reqwest::Method::DELETE)]
    fn maps_methods_onto_reqwest(#[case] method: HttpMethod, #[case] expected: reqwest::Method) {
        assert_eq!(method_for(method), expected);
    }
}
