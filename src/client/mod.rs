//! Authenticated JSON client for the team administration API.
//!
//! [`DropboxClient`] attaches the bearer credential, encodes request bodies,
//! decodes answers and the upstream error envelope, and reports the
//! rate-limit descriptor of every response. It never retries or throttles.

use crate::auth::TokenProvider;
use crate::endpoints::{EndpointTable, Operation};
use crate::errors::{
    ApiError, AuthenticationError, DropboxResult, ErrorEnvelope, InvalidArgumentError,
    RateLimitInfo, ResponseError,
};
use crate::observability::truncate_body;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use bytes::Bytes;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::HeaderValue;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Decoded answer plus the rate-limit descriptor observed on it
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    /// Decoded body
    pub value: T,
    /// Rate-limit descriptor
    pub rate_limit: RateLimitInfo,
}

/// Client composed of a transport, a token provider and an endpoint table
#[derive(Clone)]
pub struct DropboxClient {
    transport: Arc<dyn HttpTransport>,
    tokens: Arc<dyn TokenProvider>,
    endpoints: Arc<EndpointTable>,
}

impl DropboxClient {
    /// Create a client
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        tokens: Arc<dyn TokenProvider>,
        endpoints: Arc<EndpointTable>,
    ) -> Self {
        Self {
            transport,
            tokens,
            endpoints,
        }
    }

    /// Endpoint table in use
    pub fn endpoints(&self) -> &EndpointTable {
        &self.endpoints
    }

    /// Call an operation and decode the answer into `T`
    #[instrument(skip(self, body), fields(operation = op.name()))]
    pub async fn call<B, T>(&self, op: Operation, body: Option<&B>) -> DropboxResult<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call_inner(op, body)
            .await
            .map_err(|e| e.context(op.name()))
    }

    /// Call an operation and ignore the answer body
    #[instrument(skip(self, body), fields(operation = op.name()))]
    pub async fn call_discard<B>(&self, op: Operation, body: Option<&B>) -> DropboxResult<RateLimitInfo>
    where
        B: Serialize + ?Sized,
    {
        self.execute(op, body)
            .await
            .map(|(_, rate_limit)| rate_limit)
            .map_err(|e| e.context(op.name()))
    }

    async fn call_inner<B, T>(&self, op: Operation, body: Option<&B>) -> DropboxResult<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let (response, rate_limit) = self.execute(op, body).await?;

        let value = serde_json::from_slice(&response.body).map_err(|e| {
            warn!(
                status = response.status,
                body = %truncate_body(&response.body),
                error = %e,
                "Failed to decode response"
            );
            ResponseError::from(e)
        })?;

        Ok(ApiResponse { value, rate_limit })
    }

    async fn execute<B>(
        &self,
        op: Operation,
        body: Option<&B>,
    ) -> DropboxResult<(HttpResponse, RateLimitInfo)>
    where
        B: Serialize + ?Sized,
    {
        let endpoint = self.endpoints.get(op);
        if endpoint.requires_body && body.is_none() {
            return Err(InvalidArgumentError::Invalid {
                message: format!("{} requires a request body", op.name()),
            }
            .into());
        }
        let token = self.tokens.get_token().await?;

        let mut request = HttpRequest::new(endpoint.method.clone(), endpoint.url.clone());

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|_| AuthenticationError::InvalidHeaderValue)?;
        auth.set_sensitive(true);
        request.headers.insert(AUTHORIZATION, auth);
        request
            .headers
            .insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(body) = body {
            let encoded = serde_json::to_vec(body).map_err(|e| ResponseError::Serialization {
                message: e.to_string(),
            })?;
            request
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            request.body = Some(Bytes::from(encoded));
        }

        debug!(path = endpoint.path, "Sending request");
        let response = self.transport.send(request).await?;
        let rate_limit = RateLimitInfo::from_response(response.status, &response.headers);

        if !response.is_success() {
            warn!(
                status = response.status,
                path = endpoint.path,
                body = %truncate_body(&response.body),
                "Request failed"
            );
            let envelope = ErrorEnvelope::parse(&response.body);
            return Err(ApiError::from_envelope(response.status, envelope, rate_limit).into());
        }

        Ok((response, rate_limit))
    }
}
