//! Integration test harness for the CampusChain wallet client.
//!
//! [`StubApi`] is an in-process axum server on an ephemeral port. Each test
//! registers canned responses per `METHOD /path`; every request the client
//! sends is recorded so tests can assert on headers and bodies.
//!
//! ```rust,ignore
//! let stub = StubApi::builder()
//!     .json("GET", "/student/balance", 200, json!({"balance": 250}))
//!     .start()
//!     .await;
//! let ctx = TestContext::new(&stub);
//! ctx.client().student_balance().await?;
//! assert_eq!(stub.requests().len(), 1);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use tempfile::TempDir;
use tokio::task::JoinHandle;

use campus_wallet_cli::App;
use campus_wallet_client::{ApiClient, ClientConfig, SessionStore, UserIdentity};
use campus_wallet_core::{Role, UserId};

/// API root path the stub serves under.
pub const API_PREFIX: &str = "/api";

// =============================================================================
// Recorded requests
// =============================================================================

/// A request received by the stub.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path below [`API_PREFIX`], without the query string.
    pub path: String,
    pub query: Option<String>,
    /// Every `Authorization` value sent, in order.
    pub authorization: Vec<String>,
    pub content_type: Option<String>,
    pub headers: HeaderMap,
    /// Body parsed as JSON, if it was JSON.
    pub body: Option<Value>,
}

impl RecordedRequest {
    /// The single `Authorization` value, if exactly one was sent.
    #[must_use]
    pub fn bearer(&self) -> Option<&str> {
        match self.authorization.as_slice() {
            [value] => Some(value.as_str()),
            _ => None,
        }
    }
}

// =============================================================================
// Stub server
// =============================================================================

#[derive(Debug, Clone)]
struct CannedResponse {
    status: StatusCode,
    body: String,
}

#[derive(Default)]
struct StubState {
    routes: HashMap<(String, String), CannedResponse>,
    recorded: Mutex<Vec<RecordedRequest>>,
}

/// Builder for [`StubApi`].
#[derive(Default)]
pub struct StubApiBuilder {
    routes: HashMap<(String, String), CannedResponse>,
}

impl StubApiBuilder {
    /// Answer `method path` with a JSON body.
    #[must_use]
    pub fn json(self, method: &str, path: &str, status: u16, body: Value) -> Self {
        self.raw(method, path, status, &body.to_string())
    }

    /// Answer `method path` with a raw body.
    ///
    /// # Panics
    ///
    /// Panics if `status` is not a valid HTTP status code.
    #[must_use]
    pub fn raw(mut self, method: &str, path: &str, status: u16, body: &str) -> Self {
        let status = StatusCode::from_u16(status).expect("valid status code");
        self.routes.insert(
            (method.to_uppercase(), path.to_string()),
            CannedResponse {
                status,
                body: body.to_string(),
            },
        );
        self
    }

    /// Bind an ephemeral port and start serving.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start(self) -> StubApi {
        let state = Arc::new(StubState {
            routes: self.routes,
            recorded: Mutex::new(Vec::new()),
        });

        let router = Router::new().fallback(handle).with_state(Arc::clone(&state));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub listener address");

        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        StubApi {
            base_url: format!("http://{addr}"),
            state,
            server,
        }
    }
}

/// In-process stand-in for the wallet API.
pub struct StubApi {
    base_url: String,
    state: Arc<StubState>,
    server: JoinHandle<()>,
}

impl StubApi {
    #[must_use]
    pub fn builder() -> StubApiBuilder {
        StubApiBuilder::default()
    }

    /// API root to configure the client with.
    #[must_use]
    pub fn api_url(&self) -> String {
        format!("{}{API_PREFIX}", self.base_url)
    }

    /// All requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Requests received for one path.
    #[must_use]
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    /// Most recent request for one path.
    #[must_use]
    pub fn last_request_to(&self, method: &str, path: &str) -> Option<RecordedRequest> {
        self.requests_to(method, path).pop()
    }
}

impl Drop for StubApi {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn handle(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri
        .path()
        .strip_prefix(API_PREFIX)
        .unwrap_or_else(|| uri.path())
        .to_string();

    let recorded = RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().map(str::to_owned),
        authorization: headers
            .get_all(header::AUTHORIZATION)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_owned)
            .collect(),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
        headers: headers.clone(),
        body: serde_json::from_slice(&body).ok(),
    };
    state
        .recorded
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(recorded);

    match state.routes.get(&(method.to_string(), path)) {
        Some(canned) => (
            canned.status,
            [(header::CONTENT_TYPE, "application/json")],
            canned.body.clone(),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            r#"{"error":"Not found"}"#,
        )
            .into_response(),
    }
}

/// URL on which nothing is listening.
///
/// # Panics
///
/// Panics if no ephemeral port can be reserved.
pub async fn unreachable_api_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("reserve port");
    let addr = listener.local_addr().expect("reserved address");
    drop(listener);
    format!("http://{addr}{API_PREFIX}")
}

// =============================================================================
// Test context
// =============================================================================

/// Client and CLI app wired to an API, with a session file in a temp dir.
pub struct TestContext {
    app: App,
    config: ClientConfig,
    _dir: TempDir,
}

impl TestContext {
    /// Context pointing at a stub, with no stored session.
    ///
    /// # Panics
    ///
    /// Panics if the temp dir or client cannot be created.
    #[must_use]
    pub fn new(stub: &StubApi) -> Self {
        Self::with_api_url(&stub.api_url())
    }

    /// Context pointing at an arbitrary API root.
    ///
    /// # Panics
    ///
    /// Panics if the temp dir or client cannot be created.
    #[must_use]
    pub fn with_api_url(api_url: &str) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let config = ClientConfig::new(api_url, dir.path().join("session.json"))
            .expect("client config");
        let app = App::from_config(&config).expect("app");
        Self {
            app,
            config,
            _dir: dir,
        }
    }

    /// Store a session as if `role` user `id` had logged in with `token`.
    ///
    /// # Panics
    ///
    /// Panics if the session cannot be written.
    #[must_use]
    pub fn logged_in(self, token: &str, id: i32, role: Role) -> Self {
        self.session().save_token(token).expect("save token");
        self.session()
            .save_user(&UserIdentity::new(UserId::new(id), role))
            .expect("save user");
        self
    }

    #[must_use]
    pub const fn app(&self) -> &App {
        &self.app
    }

    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        self.app.client()
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        self.app.session()
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// A fresh session store over the same file, as a new process would see it.
    #[must_use]
    pub fn reopened_session(&self) -> SessionStore {
        SessionStore::file(&self.config.session_file)
    }
}
