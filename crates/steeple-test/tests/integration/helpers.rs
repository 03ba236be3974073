#![allow(clippy::unused_async, clippy::expect_used, dead_code)]
//! Test helpers for integration tests.
//!
//! Provides utilities for:
//! - Building an isolated Salvo service per test (in-memory store, temp-dir uploads)
//! - Making HTTP requests
//! - Asserting on responses and store state
//!
//! ## Isolation
//! Every [`TestApp`] owns its own `MemoryDocumentStore` and upload directory,
//! so tests run in parallel without sharing state. The clock is pinned to
//! [`TODAY`] (a Wednesday) so calendar output is deterministic.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::NaiveDate;
use salvo::http::header::HeaderName;
use salvo::http::{Method, ReqBody, StatusCode};
use salvo::prelude::*;
use salvo::test::{RequestBuilder, ResponseExt, TestClient};
use serde::de::DeserializeOwned;
use serde_json::Value;

use steeple_test::app::context::{AppContext, ContextHandler};
use steeple_test::component::config::*;
use steeple_test::component::constants::{ADMIN_ROUTE_PREFIX, APP_ROUTE_PREFIX};
use steeple_test::component::model::{Document, Record};
use steeple_test::component::service::calendar::FixedClock;
use steeple_test::component::store::fs::FsObjectStore;
use steeple_test::component::store::memory::MemoryDocumentStore;
use steeple_test::component::store::repository::Repository;

/// Date every test service treats as today: Wednesday 2024-01-10.
pub const TODAY: &str = "2024-01-10";

pub const ADMIN_NAME: &str = "Test Admin";
pub const ADMIN_EMAIL: &str = "admin@example.org";

/// Parses a `YYYY-MM-DD` literal.
#[must_use]
pub fn date(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").expect("valid date literal")
}

/// Test configuration - static struct instead of loading from the environment.
fn test_config(method: AuthMethod, uploads: &tempfile::TempDir) -> Settings {
    Settings {
        database: DatabaseConfig {
            backend: DatabaseBackend::Memory,
            url: None,
            max_connections: 4,
        },
        auth: AuthConfig {
            method,
            single_user: Some(SingleUserAuthConfig {
                name: ADMIN_NAME.to_string(),
                email: ADMIN_EMAIL.to_string(),
            }),
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5800,
            serve_origin: None,
        },
        storage: StorageConfig {
            root: uploads.path().display().to_string(),
            public_base_url: "/uploads".to_string(),
            max_upload_bytes: 64 * 1024,
        },
        calendar: CalendarConfig {
            timezone: "America/New_York".to_string(),
            weeks_ahead: 4,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
    }
}

/// A running service plus direct access to the state behind it.
pub struct TestApp {
    pub service: Service,
    pub store: Arc<MemoryDocumentStore>,
    pub uploads: tempfile::TempDir,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// ## Summary
    /// Service in single-user mode: every admin request is authenticated.
    #[must_use]
    pub fn new() -> Self {
        Self::with_auth(AuthMethod::SingleUser)
    }

    /// ## Summary
    /// Service that checks HTTP Basic credentials against `adminUsers`.
    #[must_use]
    pub fn with_basic_auth() -> Self {
        Self::with_auth(AuthMethod::BasicAuth)
    }

    fn with_auth(method: AuthMethod) -> Self {
        let uploads = tempfile::tempdir().expect("Failed to create upload directory");
        let config = test_config(method, &uploads);

        let store = Arc::new(MemoryDocumentStore::new());
        let objects = Arc::new(FsObjectStore::new(
            uploads.path(),
            config.storage.public_base_url.clone(),
        ));
        let clock = Arc::new(FixedClock(date(TODAY)));

        let router = Router::new()
            .hoop(ContextHandler {
                context: AppContext::new(store.clone(), objects, clock),
            })
            .hoop(ConfigHandler::new(config))
            .push(steeple_test::app::api::routes());

        Self {
            service: Service::new(router),
            store,
            uploads,
        }
    }

    /// ## Summary
    /// Stores a record directly, bypassing the API.
    pub async fn seed<T: Record>(&self, record: &T) -> Document<T> {
        Repository::<T>::new(self.store.as_ref())
            .create(record)
            .await
            .expect("Failed to seed record")
    }

    /// ## Summary
    /// Reads every record of a type directly from the store.
    pub async fn all<T: Record>(&self) -> Vec<Document<T>> {
        Repository::<T>::new(self.store.as_ref())
            .list(None)
            .await
            .expect("Failed to list records")
    }
}

/// Full admin API path for a collection, optionally with a suffix.
#[must_use]
pub fn admin_path(suffix: &str) -> String {
    format!("{ADMIN_ROUTE_PREFIX}/{suffix}")
}

/// Full app API path.
#[must_use]
pub fn app_path(suffix: &str) -> String {
    format!("{APP_ROUTE_PREFIX}/{suffix}")
}

/// Builder for HTTP test requests.
pub struct TestRequest {
    method: Method,
    path: String,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl TestRequest {
    #[must_use]
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: &str) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn delete(path: &str) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Adds a header to the request.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Sets the Content-Type header.
    #[must_use]
    pub fn content_type(self, content_type: &str) -> Self {
        self.header("Content-Type", content_type)
    }

    /// Sets HTTP Basic credentials.
    #[must_use]
    pub fn basic_auth(self, email: &str, password: &str) -> Self {
        let encoded = STANDARD.encode(format!("{email}:{password}"));
        self.header("Authorization", &format!("Basic {encoded}"))
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets a JSON request body.
    #[must_use]
    pub fn json(self, value: &Value) -> Self {
        self.content_type("application/json")
            .body(serde_json::to_vec(value).expect("JSON body serializes"))
    }

    /// Sends the request to the test service and returns the response.
    ///
    /// ## Panics
    /// Panics if the response body cannot be read.
    pub async fn send(self, service: &Service) -> TestResponse {
        let url = format!("http://127.0.0.1:5800{}", self.path);

        let mut client = match self.method.as_str() {
            "GET" => TestClient::get(&url),
            "POST" => TestClient::post(&url),
            "PUT" => TestClient::put(&url),
            "DELETE" => TestClient::delete(&url),
            _ => RequestBuilder::new(&url, self.method.clone()),
        };

        for (name, value) in self.headers {
            if let Ok(header_name) = HeaderName::try_from(name.as_str()) {
                client = client.add_header(header_name, value, true);
            }
        }

        if let Some(body_bytes) = self.body {
            client = client.body(ReqBody::Once(body_bytes.into()));
        }

        let mut response = client.send(service).await;

        let status = response
            .status_code
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();

        let body: Vec<u8> = response.take_bytes(None).await.unwrap_or_default().to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Represents an HTTP test response for assertions.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Asserts that the response status matches the expected code.
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {expected} but got {}: {}",
            self.status,
            self.body_string()
        );
        self
    }

    /// Asserts that the response body contains the expected substring.
    pub fn assert_body_contains(self, expected: &str) -> Self {
        let body = self.body_string();
        assert!(
            body.contains(expected),
            "Expected body to contain '{expected}' but got:\n{body}"
        );
        self
    }

    /// Asserts that the response body does not contain the specified substring.
    pub fn assert_body_not_contains(self, unexpected: &str) -> Self {
        let body = self.body_string();
        assert!(
            !body.contains(unexpected),
            "Expected body to NOT contain '{unexpected}' but got:\n{body}"
        );
        self
    }

    /// Returns the body as a UTF-8 string.
    #[must_use]
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decodes the JSON body.
    #[must_use]
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!("Body is not the expected JSON ({e}):\n{}", self.body_string())
        })
    }

    /// The `error` message of a JSON error body.
    #[must_use]
    pub fn error_message(&self) -> String {
        self.json::<Value>()["error"]
            .as_str()
            .expect("error body has a message")
            .to_string()
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
