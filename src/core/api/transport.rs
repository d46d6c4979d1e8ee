//! Network backends for [`ApiClient`](super::ApiClient)
//!
//! Browser builds talk through `gloo-net` (the Fetch API). The server build
//! only renders the shell and never calls the backend.

#[cfg(not(feature = "ssr"))]
use super::Method;
use super::{HttpRequest, HttpResponse, Transport};
use crate::core::error::ApiError;

/// Fetch-based transport for the hydrated app
#[cfg(not(feature = "ssr"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchTransport;

#[cfg(not(feature = "ssr"))]
impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        use gloo_net::http::{Request, RequestBuilder};

        let url = request.url.as_str();
        let mut builder: RequestBuilder = match request.method {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
            Method::Put => Request::put(url),
            Method::Patch => Request::patch(url),
            Method::Delete => Request::delete(url),
        };

        if !request.query.is_empty() {
            builder = builder.query(
                request
                    .query
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str())),
            );
        }
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

/// Server-side stand-in: pages only fetch after hydration, so the server
/// never reaches the backend and every call fails as a network error
#[cfg(feature = "ssr")]
#[derive(Debug, Default, Clone, Copy)]
pub struct ServerTransport;

#[cfg(feature = "ssr")]
impl Transport for ServerTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        Err(ApiError::Network(format!(
            "{} {} is not available during server rendering",
            request.method.as_str(),
            request.url
        )))
    }
}

/// Transport used by the running application
#[cfg(not(feature = "ssr"))]
pub type AppTransport = FetchTransport;

/// Transport used by the running application
#[cfg(feature = "ssr")]
pub type AppTransport = ServerTransport;
