//! HTTP transport abstraction.
//!
//! The transport only moves bytes: authentication, envelope decoding and
//! rate-limit extraction happen one layer up in [`crate::client`].

use crate::errors::{DropboxResult, NetworkError};
use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method};
use std::time::Duration;

/// HTTP request definition
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute request URL
    pub url: String,
    /// Request headers
    pub headers: HeaderMap,
    /// Encoded request body
    pub body: Option<Bytes>,
}

impl HttpRequest {
    /// Create a request without headers or body
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

/// HTTP response definition
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw response body
    pub body: Bytes,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP transport interface (for dependency injection)
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send an HTTP request
    async fn send(&self, request: HttpRequest) -> DropboxResult<HttpResponse>;
}

/// Default reqwest-based HTTP transport
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with the given request timeout
    pub fn new(timeout: Duration) -> DropboxResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("dropbox-team-connector/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(NetworkError::from)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> DropboxResult<HttpResponse> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(NetworkError::from)?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(NetworkError::from)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_success_range() {
        let mut response = HttpResponse {
            status: 200,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        };
        assert!(response.is_success());

        response.status = 409;
        assert!(!response.is_success());
    }

    #[test]
    fn test_request_new_is_bare() {
        let request = HttpRequest::new(Method::POST, "https://api.dropboxapi.com/2/x");
        assert!(request.headers.is_empty());
        assert!(request.body.is_none());
    }
}
