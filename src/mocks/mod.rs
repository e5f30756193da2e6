//! Mock implementations for testing.
//!
//! [`MockHttpTransport`] answers from a queue of canned responses and records
//! every request it receives.

use crate::errors::{DropboxResult, NetworkError};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use async_trait::async_trait;
use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::HeaderMap;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Mock response configuration
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// Response body
    pub body: String,
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Vec<(String, String)>,
    /// Delay before response
    pub delay_ms: Option<u64>,
    /// Connection failure to return instead
    pub connection_error: Option<String>,
}

impl MockResponse {
    /// Create a successful JSON response
    pub fn json(data: serde_json::Value) -> Self {
        Self::raw(200, data.to_string())
    }

    /// Create a response with a raw body
    pub fn raw(status: u16, body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            status,
            headers: Vec::new(),
            delay_ms: None,
            connection_error: None,
        }
    }

    /// Create a Dropbox error-envelope response
    pub fn dropbox_error(status: u16, tag: &str, summary: Option<&str>) -> Self {
        let mut body = serde_json::json!({ "error": { ".tag": tag } });
        if let Some(summary) = summary {
            body["error_summary"] = serde_json::Value::String(summary.to_string());
        }
        Self::raw(status, body.to_string())
    }

    /// Create a transport-level failure
    pub fn connection_failure(message: impl Into<String>) -> Self {
        Self {
            connection_error: Some(message.into()),
            ..Self::raw(0, "")
        }
    }

    /// Add a response header
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Add delay to response
    pub fn with_delay(mut self, ms: u64) -> Self {
        self.delay_ms = Some(ms);
        self
    }
}

/// Recorded request for verification
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL
    pub url: String,
    /// Request method
    pub method: String,
    /// Request body
    pub body: Option<String>,
    /// Request headers, lower-cased names
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Value of a header, if sent
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
    }

    /// Body parsed as JSON
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|b| serde_json::from_str(b).ok())
    }

    /// Path component of the URL
    pub fn path(&self) -> String {
        url::Url::parse(&self.url)
            .map(|u| u.path().to_string())
            .unwrap_or_else(|_| self.url.clone())
    }
}

/// Mock HTTP transport for testing
#[derive(Default)]
pub struct MockHttpTransport {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    default_response: Mutex<Option<MockResponse>>,
}

impl MockHttpTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a response to the queue
    pub fn add_response(&self, response: MockResponse) -> &Self {
        self.responses.lock().push_back(response);
        self
    }

    /// Add multiple responses
    pub fn add_responses(&self, responses: impl IntoIterator<Item = MockResponse>) -> &Self {
        self.responses.lock().extend(responses);
        self
    }

    /// Set default response when queue is empty
    pub fn set_default_response(&self, response: MockResponse) -> &Self {
        *self.default_response.lock() = Some(response);
        self
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Get the last recorded request
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().last().cloned()
    }

    /// Number of requests received
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Get remaining response count
    pub fn remaining_responses(&self) -> usize {
        self.responses.lock().len()
    }

    fn record_request(&self, request: &HttpRequest) {
        let headers = request
            .headers
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();

        self.requests.lock().push(RecordedRequest {
            url: request.url.clone(),
            method: request.method.to_string(),
            body: request
                .body
                .as_ref()
                .map(|b| String::from_utf8_lossy(b).into_owned()),
            headers,
        });
    }

    fn next_response(&self) -> Option<MockResponse> {
        let mut queue = self.responses.lock();
        queue
            .pop_front()
            .or_else(|| self.default_response.lock().clone())
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(&self, request: HttpRequest) -> DropboxResult<HttpResponse> {
        self.record_request(&request);

        let response = self.next_response().ok_or_else(|| NetworkError::ConnectionFailed {
            message: format!("no mock response queued for {}", request.url),
        })?;

        if let Some(delay) = response.delay_ms {
            tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
        }

        if let Some(message) = response.connection_error {
            return Err(NetworkError::ConnectionFailed { message }.into());
        }

        let mut headers = HeaderMap::new();
        for (name, value) in &response.headers {
            if let (Ok(name), Ok(value)) = (
                name.parse::<HeaderName>(),
                HeaderValue::from_str(value),
            ) {
                headers.insert(name, value);
            }
        }

        Ok(HttpResponse {
            status: response.status,
            headers,
            body: Bytes::from(response.body),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    #[tokio::test]
    async fn test_mock_transport_queue_order() {
        let mock = MockHttpTransport::new();
        mock.add_response(MockResponse::raw(200, "first"))
            .add_response(MockResponse::raw(409, "second"));

        let first = mock
            .send(HttpRequest::new(Method::POST, "http://mock/a"))
            .await
            .unwrap();
        let second = mock
            .send(HttpRequest::new(Method::POST, "http://mock/b"))
            .await
            .unwrap();

        assert_eq!(first.body, Bytes::from("first"));
        assert_eq!(second.status, 409);
        assert_eq!(mock.request_count(), 2);
        assert_eq!(mock.last_request().unwrap().path(), "/b");
    }

    #[tokio::test]
    async fn test_mock_transport_empty_queue_fails() {
        let mock = MockHttpTransport::new();
        let result = mock
            .send(HttpRequest::new(Method::POST, "http://mock/a"))
            .await;
        assert!(result.is_err());
    }
}
