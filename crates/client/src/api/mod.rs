//! Authenticated JSON-over-HTTP client for the wallet API.
//!
//! Every call goes through [`ApiClient::request`]:
//!
//! - URL is the configured API root with the path appended verbatim
//! - `Content-Type: application/json` is always sent; caller headers are
//!   merged on top
//! - `Authorization: Bearer <token>` is attached when the session holds a
//!   token, replacing any caller-supplied `Authorization`
//! - 2xx bodies are returned as parsed JSON, unchanged
//! - non-2xx bodies become [`ApiError::Api`] with the body's `error` field,
//!   or a fixed fallback when the body has none or is not JSON
//!
//! There is no retry, backoff, de-duplication or cancellation. Two calls in
//! flight at once are independent.
//!
//! Endpoint wrappers live in the submodules, one per dashboard.

mod admin;
mod auth;
mod canteen;
mod parent;
mod student;
mod vendor;

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, FALLBACK_ERROR_MESSAGE};
use crate::session::SessionStore;

/// Per-call options for [`ApiClient::request`].
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// JSON body to send.
    pub body: Option<Value>,
    /// Extra headers merged over the defaults.
    pub headers: HeaderMap,
}

impl RequestOptions {
    /// Options with a JSON body.
    #[must_use]
    pub fn with_body(body: Value) -> Self {
        Self {
            body: Some(body),
            headers: HeaderMap::new(),
        }
    }

    /// Add a header.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidHeader` if the name or value is not valid.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self, ApiError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ApiError::InvalidHeader(format!("{name}: {e}")))?;
        let value =
            HeaderValue::from_str(value).map_err(|e| ApiError::InvalidHeader(e.to_string()))?;
        self.headers.insert(name, value);
        Ok(self)
    }
}

/// Wallet API client.
///
/// Holds the injected [`SessionStore`] and reads the token from it on every
/// call, so a login performed through one clone is visible to all clones.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for the configured API root.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig, session: SessionStore) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.api_url.trim_end_matches('/').to_owned(),
                session,
            }),
        })
    }

    /// The session this client reads its token from.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// API root requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Full URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Issue one request and return the parsed JSON body.
    ///
    /// # Errors
    ///
    /// - `ApiError::Transport` if no response was received
    /// - `ApiError::Api` for non-2xx responses
    /// - `ApiError::Decode` if a 2xx body is not JSON
    /// - `ApiError::InvalidHeader` if the token or a caller header is not a
    ///   valid header value
    #[instrument(skip_all, fields(method = %method, path = %path))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value, ApiError> {
        let token = self.inner.session.read_token();
        let headers = build_headers(token.as_ref(), options.headers)?;

        let mut request = self
            .inner
            .http
            .request(method, self.url(path))
            .headers(headers);
        if let Some(body) = options.body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        match interpret_response(status, &body) {
            Ok(value) => {
                debug!(status = status.as_u16(), "API request succeeded");
                Ok(value)
            }
            Err(e) => {
                warn!(status = status.as_u16(), error = %e, "API request failed");
                Err(e)
            }
        }
    }

    /// GET a path and deserialize the response.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let value = self
            .request(Method::GET, path, RequestOptions::default())
            .await?;
        decode(value)
    }

    /// POST a JSON body and deserialize the response.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        let value = self
            .request(Method::POST, path, RequestOptions::with_body(body))
            .await?;
        decode(value)
    }
}

/// Assemble request headers: JSON content type, then caller headers, then the
/// bearer token (if any) so exactly one `Authorization` header is sent.
///
/// # Errors
///
/// Returns `ApiError::InvalidHeader` if the token is not a valid header value.
pub fn build_headers(
    token: Option<&SecretString>,
    extra: HeaderMap,
) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.extend(extra);

    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|_| ApiError::InvalidHeader("stored token is not header-safe".to_string()))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

/// Turn a status and raw body into the call's result.
///
/// # Errors
///
/// `ApiError::Api` for non-2xx statuses; `ApiError::Decode` for a 2xx body
/// that is not JSON.
pub fn interpret_response(status: StatusCode, body: &[u8]) -> Result<Value, ApiError> {
    if status.is_success() {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        return serde_json::from_slice(body)
            .map_err(|e| ApiError::Decode(format!("response body is not JSON: {e}")));
    }

    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| error_field(&value))
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());

    Err(ApiError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Non-empty string `error` field of an error body.
fn error_field(value: &Value) -> Option<String> {
    value
        .get("error")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map(str::to_owned)
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use serde_json::json;

    use super::*;

    #[test]
    fn test_headers_without_token() {
        let headers = build_headers(None, HeaderMap::new()).expect("headers");
        assert_eq!(headers.get(CONTENT_TYPE).expect("content type"), "application/json");
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_headers_with_token() {
        let token = SecretString::from("t1");
        let headers = build_headers(Some(&token), HeaderMap::new()).expect("headers");
        let auth: Vec<_> = headers.get_all(AUTHORIZATION).iter().collect();
        assert_eq!(auth.len(), 1);
        assert_eq!(auth.first().copied().expect("one header"), "Bearer t1");
        assert!(auth.first().expect("one header").is_sensitive());
    }

    #[test]
    fn test_caller_headers_merge_but_do_not_override_bearer() {
        let token = SecretString::from("t1");
        let extra = RequestOptions::default()
            .header("Authorization", "Bearer forged")
            .and_then(|o| o.header("X-Request-Id", "abc"))
            .and_then(|o| o.header("Content-Type", "application/json; charset=utf-8"))
            .expect("valid headers")
            .headers;

        let headers = build_headers(Some(&token), extra).expect("headers");
        assert_eq!(headers.get_all(AUTHORIZATION).iter().count(), 1);
        assert_eq!(headers.get(AUTHORIZATION).expect("auth"), "Bearer t1");
        assert_eq!(headers.get("x-request-id").expect("custom"), "abc");
        assert_eq!(
            headers.get(CONTENT_TYPE).expect("content type"),
            "application/json; charset=utf-8"
        );
    }

    #[test]
    fn test_token_with_newline_is_rejected() {
        let token = SecretString::from("bad\ntoken");
        let result = build_headers(Some(&token), HeaderMap::new());
        assert!(matches!(result, Err(ApiError::InvalidHeader(_))));
    }

    #[test]
    fn test_success_body_is_returned_unchanged() {
        let body = json!({"balance": 250, "nested": {"a": [1, 2, 3]}});
        let value = interpret_response(StatusCode::OK, body.to_string().as_bytes())
            .expect("success");
        assert_eq!(value, body);

        let created = interpret_response(StatusCode::CREATED, b"[1,2]").expect("success");
        assert_eq!(created, json!([1, 2]));
    }

    #[test]
    fn test_empty_success_body_is_null() {
        let value = interpret_response(StatusCode::NO_CONTENT, b"").expect("success");
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn test_non_json_success_body_is_decode_error() {
        let result = interpret_response(StatusCode::OK, b"<html>");
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_error_field_becomes_message() {
        let err = interpret_response(StatusCode::CONFLICT, br#"{"error":"insufficient link"}"#)
            .expect_err("failure");
        assert_eq!(err.message(), "insufficient link");
        assert_eq!(err.status(), Some(409));
    }

    #[test]
    fn test_missing_error_field_uses_fallback() {
        let err = interpret_response(StatusCode::UNAUTHORIZED, br#"{"msg":"Token has expired"}"#)
            .expect_err("failure");
        assert_eq!(err.message(), FALLBACK_ERROR_MESSAGE);
        assert!(err.is_unauthorized());

        let err = interpret_response(StatusCode::BAD_REQUEST, br#"{"error":""}"#)
            .expect_err("failure");
        assert_eq!(err.message(), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn test_non_json_error_body_keeps_status() {
        let err = interpret_response(StatusCode::BAD_GATEWAY, b"<h1>502 Bad Gateway</h1>")
            .expect_err("failure");
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.message(), FALLBACK_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_refused_connection_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let config = ClientConfig::new(&format!("http://{addr}/api"), PathBuf::from("s.json"))
            .expect("config");
        let client = ApiClient::new(&config, SessionStore::in_memory()).expect("client");

        let err = client
            .request(Method::GET, "/canteen/menu", RequestOptions::default())
            .await
            .expect_err("nothing listening");
        assert!(err.is_transport());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_url_concatenates_path() {
        let config = ClientConfig::new("http://localhost:5000/api/", PathBuf::from("s.json"))
            .expect("config");
        let client = ApiClient::new(&config, SessionStore::in_memory()).expect("client");
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(
            client.url("/parent/spending?student_id=5&month=2026-02"),
            "http://localhost:5000/api/parent/spending?student_id=5&month=2026-02"
        );
    }
}
