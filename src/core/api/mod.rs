//! HTTP client for the health-record API
//!
//! A single [`ApiClient`] owns the base URL, attaches the bearer token held by
//! the [`SessionStore`], decodes JSON answers and turns failures into
//! [`ApiError`]. The network itself sits behind the [`Transport`] trait so the
//! browser (`gloo-net`), the server render and tests plug in their own.
//!
//! GET requests are retried once on network errors and 5xx answers. Writes are
//! never retried. A 401 on a request that carried a token signs the session
//! out, which in turn lets the route guard send the user back to `/login`.

mod auth;
mod cpn;
mod patients;
mod transport;

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;

pub use transport::*;

use super::config::ClientConfig;
use super::error::ApiError;
use super::session::SessionStore;
use super::storage::TokenStorage;

/// HTTP verbs used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// Safe to repeat without side effects
    pub fn is_idempotent_read(&self) -> bool {
        matches!(self, Method::Get)
    }
}

/// Fully resolved request handed to a [`Transport`]
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response returned by a [`Transport`]
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and waits for one response.
///
/// Implementations report connection-level failures as [`ApiError::Network`];
/// any HTTP status, including errors, is a successful send.
pub trait Transport {
    fn send(&self, request: HttpRequest)
    -> impl Future<Output = Result<HttpResponse, ApiError>>;
}

/// Description of an API call, relative to the configured base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<String>,
    /// Attach the bearer token when one is available
    pub authenticated: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            authenticated: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query(mut self, params: Vec<(String, String)>) -> Self {
        self.query = params;
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_string(body)?);
        Ok(self)
    }

    /// Never send the bearer token (sign-in, token refresh)
    pub fn anonymous(mut self) -> Self {
        self.authenticated = false;
        self
    }
}

/// JSON API client bound to a session store
pub struct ApiClient<T: Transport, S: TokenStorage> {
    transport: T,
    session: Arc<SessionStore<S>>,
    config: ClientConfig,
}

impl<T: Transport, S: TokenStorage> ApiClient<T, S> {
    pub fn new(transport: T, session: Arc<SessionStore<S>>, config: ClientConfig) -> Self {
        Self {
            transport,
            session,
            config,
        }
    }

    pub fn session(&self) -> &Arc<SessionStore<S>> {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a request and decode the JSON answer
    pub async fn send<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let response = self.execute(request).await?;
        decode_body(&response.body)
    }

    /// Send a request whose answer body is irrelevant
    pub async fn send_empty(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.execute(request).await.map(|_| ())
    }

    /// Send a request and return the successful raw response
    pub async fn execute(&self, request: ApiRequest) -> Result<HttpResponse, ApiError> {
        let http_request = self.build(&request);
        let carried_token = http_request.header("Authorization").is_some();
        let attempts = if request.method.is_idempotent_read() {
            1 + self.config.max_retries
        } else {
            1
        };

        let mut attempt = 1;
        let error = loop {
            tracing::debug!(
                method = request.method.as_str(),
                path = %request.path,
                attempt,
                "api request"
            );

            let error = match self.transport.send(http_request.clone()).await {
                Ok(response) if response.is_success() => return Ok(response),
                Ok(response) => ApiError::from_response(response.status, &response.body),
                Err(e) => e,
            };

            if attempt < attempts && error.is_transient() {
                tracing::warn!(path = %request.path, error = %error, "retrying request");
                attempt += 1;
                continue;
            }
            break error;
        };

        if carried_token && error.is_unauthorized() {
            tracing::warn!(path = %request.path, "token rejected, signing out");
            self.session.logout();
        }
        Err(error)
    }

    fn build(&self, request: &ApiRequest) -> HttpRequest {
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        if request.body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        if request.authenticated {
            if let Some(token) = self.session.access_token() {
                headers.push(("Authorization".to_string(), format!("Bearer {token}")));
            }
        }

        HttpRequest {
            method: request.method,
            url: self.config.url(&request.path),
            query: request.query.clone(),
            headers,
            body: request.body.clone(),
        }
    }
}

fn decode_body<R: DeserializeOwned>(body: &str) -> Result<R, ApiError> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(ApiError::from)
}

/// List answers come either as a bare array or as a paginated envelope
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(untagged)]
pub(crate) enum ListResponse<T> {
    Plain(Vec<T>),
    Paged { results: Vec<T> },
}

impl<T> ListResponse<T> {
    pub(crate) fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Plain(items) | ListResponse::Paged { results: items } => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStorage;
    use crate::core::test_support::{MockTransport, sample_user};
    use serde_json::json;

    type TestClient = ApiClient<MockTransport, MemoryStorage>;

    fn client(transport: MockTransport) -> TestClient {
        let session = Arc::new(SessionStore::new(MemoryStorage::new()));
        ApiClient::new(
            transport,
            session,
            ClientConfig::new("http://api.test/api/v1"),
        )
    }

    #[tokio::test]
    async fn test_bearer_token_is_attached() {
        let client = client(MockTransport::with_json(200, json!({ "ok": true })));
        client.session().login(sample_user(), "t1", "t2").unwrap();

        let _: serde_json::Value = client.send(ApiRequest::get("/auth/users/me/")).await.unwrap();

        let requests = client.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "http://api.test/api/v1/auth/users/me/");
        assert_eq!(requests[0].header("authorization"), Some("Bearer t1"));
        assert_eq!(requests[0].header("Content-Type"), None);
    }

    #[tokio::test]
    async fn test_no_token_without_session() {
        let client = client(MockTransport::with_json(200, json!([])));
        let _: serde_json::Value = client.send(ApiRequest::get("/patients/")).await.unwrap();
        assert!(client.transport().requests()[0].header("Authorization").is_none());
    }

    #[tokio::test]
    async fn test_anonymous_request_skips_token() {
        let client = client(MockTransport::with_json(200, json!({})));
        client.session().login(sample_user(), "t1", "t2").unwrap();

        let request = ApiRequest::post("/auth/login/")
            .json(&json!({ "email": "a@b.com" }))
            .unwrap()
            .anonymous();
        let _: serde_json::Value = client.send(request).await.unwrap();

        let sent = &client.transport().requests()[0];
        assert!(sent.header("Authorization").is_none());
        assert_eq!(sent.header("Content-Type"), Some("application/json"));
        assert_eq!(sent.body.as_deref(), Some(r#"{"email":"a@b.com"}"#));
    }

    #[tokio::test]
    async fn test_get_is_retried_once_on_server_error() {
        let transport = MockTransport::new();
        transport.push_status(503, "");
        transport.push_status(503, "");
        transport.push_json(200, json!({ "total": 1 }));
        let client = client(transport);

        let result: Result<serde_json::Value, _> =
            client.send(ApiRequest::get("/patients/stats/")).await;

        assert_eq!(result, Err(ApiError::Http { status: 503 }));
        assert_eq!(client.transport().requests().len(), 2);
    }

    #[tokio::test]
    async fn test_retry_recovers_from_network_error() {
        let transport = MockTransport::new();
        transport.push_error(ApiError::Network("connection reset".into()));
        transport.push_json(200, json!({ "total": 42 }));
        let client = client(transport);

        let value: serde_json::Value = client.send(ApiRequest::get("/patients/stats/")).await.unwrap();

        assert_eq!(value["total"], 42);
        assert_eq!(client.transport().requests().len(), 2);
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let transport = MockTransport::new();
        transport.push_status(404, "");
        let client = client(transport);

        let result: Result<serde_json::Value, _> =
            client.send(ApiRequest::get("/patients/99/")).await;

        assert_eq!(result, Err(ApiError::Http { status: 404 }));
        assert_eq!(client.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_writes_are_not_retried() {
        let transport = MockTransport::new();
        transport.push_error(ApiError::Network("timeout".into()));
        let client = client(transport);

        let result = client
            .send_empty(ApiRequest::post("/patients/").json(&json!({})).unwrap())
            .await;

        assert!(matches!(result, Err(ApiError::Network(_))));
        assert_eq!(client.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_zero_retries_configured() {
        let transport = MockTransport::new();
        transport.push_status(500, "");
        let session = Arc::new(SessionStore::new(MemoryStorage::new()));
        let client = ApiClient::new(
            transport,
            session,
            ClientConfig::new("http://api.test").with_max_retries(0),
        );

        let result = client.send_empty(ApiRequest::get("/patients/")).await;
        assert!(result.is_err());
        assert_eq!(client.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_error_envelope_is_surfaced() {
        let transport = MockTransport::new();
        transport.push_json(
            400,
            json!({
                "success": false,
                "error": { "message": "Téléphone déjà utilisé", "code": 400, "details": { "phone": ["exists"] } }
            }),
        );
        let client = client(transport);

        let err = client
            .send_empty(ApiRequest::post("/patients/").json(&json!({})).unwrap())
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "Téléphone déjà utilisé");
        assert_eq!(err.to_payload().error.code, 400);
    }

    #[tokio::test]
    async fn test_rejected_token_signs_out() {
        let transport = MockTransport::new();
        transport.push_status(401, "");
        let client = client(transport);
        client.session().login(sample_user(), "stale", "r").unwrap();

        let err = client
            .send_empty(ApiRequest::get("/patients/"))
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::Unauthorized);
        assert!(!client.session().is_authenticated());
        assert!(client.session().storage().is_empty());
    }

    #[tokio::test]
    async fn test_anonymous_401_keeps_session() {
        let transport = MockTransport::new();
        transport.push_status(401, "");
        let client = client(transport);
        client.session().login(sample_user(), "t1", "t2").unwrap();

        let result = client
            .send_empty(ApiRequest::post("/auth/login/").anonymous())
            .await;

        assert!(result.is_err());
        assert!(client.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_decode_error() {
        let transport = MockTransport::new();
        transport.push_status(200, "not json");
        let client = client(transport);

        let result: Result<Vec<u32>, _> = client.send(ApiRequest::get("/patients/")).await;
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_empty_body_decodes_as_unit() {
        let transport = MockTransport::new();
        transport.push_status(204, "");
        let client = client(transport);

        let result: Result<(), _> = client.send(ApiRequest::delete("/patients/3/")).await;
        assert!(result.is_ok());
    }

    #[test]
    fn test_list_response_shapes() {
        let plain: ListResponse<u32> = serde_json::from_value(json!([1, 2])).unwrap();
        assert_eq!(plain.into_items(), vec![1, 2]);

        let paged: ListResponse<u32> =
            serde_json::from_value(json!({ "count": 2, "next": null, "results": [3, 4] })).unwrap();
        assert_eq!(paged.into_items(), vec![3, 4]);
    }
}
