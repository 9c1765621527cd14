//! Driven port for dispatching requests to the remote gym API.
//!
//! The domain owns the method/path/body contract so services stay agnostic
//! of the HTTP library behind it. Adapters classify every outcome into the
//! [`ApiError`] taxonomy; services only add local validation on top.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::{ApiError, ApiResult};

/// Request methods used by the gym API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Canonical wire spelling of the method.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Port for issuing one JSON request against the remote service.
///
/// Implementations resolve `path` relative to their configured base URL,
/// attach authentication when a session is present, and report the outcome
/// through the shared [`ApiError`] classification: transport failures as
/// `Network`, non-2xx statuses as `Http`, unreadable bodies as `Decode`.
/// A 2xx response with an empty body resolves to JSON `null`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Dispatch a request and return the decoded JSON body.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use client::domain::ports::{ApiTransport, FixtureApiTransport, HttpMethod};
    ///
    /// let transport = FixtureApiTransport;
    /// let payload = transport
    ///     .request(HttpMethod::Get, "/alunos", None)
    ///     .await?;
    /// assert!(payload.is_null());
    /// # Ok::<(), client::ApiError>(())
    /// ```
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> ApiResult<Value>;
}

/// Fixture implementation resolving every request to JSON `null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureApiTransport;

#[async_trait]
impl ApiTransport for FixtureApiTransport {
    async fn request(
        &self,
        _method: HttpMethod,
        _path: &str,
        _body: Option<Value>,
    ) -> ApiResult<Value> {
        Ok(Value::Null)
    }
}

/// Decode a transport payload into a typed value.
///
/// `context` names the expected payload in the error message, e.g.
/// `"student list"`.
pub fn decode_payload<T: DeserializeOwned>(payload: Value, context: &str) -> ApiResult<T> {
    serde_json::from_value(payload).map_err(|error| {
        ApiError::decode(format!(
            "{context} payload did not match the expected shape: {error}"
        ))
    })
}

/// Serialize a request payload for the transport.
///
/// Failures are local, so they surface as validation errors and no request
/// is issued.
pub fn encode_payload<T: Serialize>(payload: &T, context: &str) -> ApiResult<Value> {
    serde_json::to_value(payload).map_err(|error| {
        ApiError::validation(format!("{context} payload could not be serialised: {error}"))
    })
}
