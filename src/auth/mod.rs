//! Bearer credential supply.
//!
//! Two modes: a refresh-token exchange performed once at construction, whose
//! result is cached for the lifetime of the provider, or an externally
//! rotated [`TokenSource`] consulted on every call.

use crate::errors::{AuthenticationError, DropboxResult};
use crate::observability::{redact_token, truncate_body};
use crate::transport::{HttpRequest, HttpTransport};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderValue, Method};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Path of the OAuth token endpoint, relative to the API base URL
pub const TOKEN_PATH: &str = "/oauth2/token";

/// Supplies a bearer credential on demand
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Get a bearer token for the next request
    async fn get_token(&self) -> DropboxResult<SecretString>;
}

/// Externally rotated credential source
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Produce the current access token
    async fn token(&self) -> DropboxResult<SecretString>;
}

/// Short-lived access credential
#[derive(Clone)]
pub struct Credential {
    access_token: SecretString,
    expires_at: Option<DateTime<Utc>>,
}

impl Credential {
    /// Create a credential
    pub fn new(access_token: SecretString, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            access_token,
            expires_at,
        }
    }

    /// Expiry reported by the token endpoint
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Whether the credential has passed its reported expiry
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= Utc::now())
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

fn expiry_from_now(expires_in: i64) -> DropboxResult<DateTime<Utc>> {
    Some(expires_in)
        .filter(|secs| *secs >= 0)
        .and_then(chrono::Duration::try_seconds)
        .and_then(|d| Utc::now().checked_add_signed(d))
        .ok_or_else(|| {
            AuthenticationError::InvalidTokenResponse {
                message: format!("expires_in out of range: {}", expires_in),
            }
            .into()
        })
}

/// Inputs of the refresh-token exchange
pub struct RefreshGrant<'a> {
    /// Absolute token endpoint URL
    pub token_url: String,
    /// App key
    pub app_key: &'a str,
    /// App secret
    pub app_secret: &'a SecretString,
    /// Long-lived refresh token
    pub refresh_token: &'a SecretString,
}

impl RefreshGrant<'_> {
    fn form_body(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", "refresh_token")
            .append_pair("refresh_token", self.refresh_token.expose_secret())
            .append_pair("client_id", self.app_key)
            .append_pair("client_secret", self.app_secret.expose_secret())
            .finish()
    }
}

/// Token provider backed by a one-time refresh-token exchange.
///
/// The exchanged credential is never refreshed again; syncs that outlive its
/// expiry will start failing with authentication errors from upstream.
pub struct RefreshTokenProvider {
    credential: Credential,
}

impl RefreshTokenProvider {
    /// Exchange the refresh token for an access token.
    ///
    /// Any non-200 answer or undecodable body is fatal.
    #[instrument(skip_all, fields(token_url = %grant.token_url))]
    pub async fn exchange(
        transport: &dyn HttpTransport,
        grant: RefreshGrant<'_>,
    ) -> DropboxResult<Self> {
        if grant.refresh_token.expose_secret().is_empty() {
            return Err(AuthenticationError::EmptyRefreshToken.into());
        }

        let mut request = HttpRequest::new(Method::POST, grant.token_url.clone());
        request.headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        request
            .headers
            .insert(ACCEPT, HeaderValue::from_static("application/json"));
        request.body = Some(Bytes::from(grant.form_body()));

        let response = transport.send(request).await?;
        if response.status != 200 {
            warn!(
                status = response.status,
                body = %truncate_body(&response.body),
                "Token exchange rejected"
            );
            return Err(AuthenticationError::TokenExchangeFailed {
                status: response.status,
            }
            .into());
        }

        let decoded: TokenResponse = serde_json::from_slice(&response.body).map_err(|e| {
            AuthenticationError::InvalidTokenResponse {
                message: e.to_string(),
            }
        })?;
        if decoded.access_token.is_empty() {
            return Err(AuthenticationError::InvalidTokenResponse {
                message: "empty access_token".to_string(),
            }
            .into());
        }

        let expires_at = decoded.expires_in.map(expiry_from_now).transpose()?;
        debug!(
            token = %redact_token(&decoded.access_token),
            ?expires_at,
            "Access token obtained"
        );

        Ok(Self {
            credential: Credential::new(SecretString::new(decoded.access_token), expires_at),
        })
    }

    /// Create a provider from an already obtained credential
    pub fn from_credential(credential: Credential) -> Self {
        Self { credential }
    }

    /// The cached credential
    pub fn credential(&self) -> &Credential {
        &self.credential
    }
}

#[async_trait]
impl TokenProvider for RefreshTokenProvider {
    async fn get_token(&self) -> DropboxResult<SecretString> {
        Ok(self.credential.access_token.clone())
    }
}

/// Token provider delegating to an external source without caching
pub struct ExternalTokenProvider {
    source: Arc<dyn TokenSource>,
}

impl ExternalTokenProvider {
    /// Wrap a token source
    pub fn new(source: Arc<dyn TokenSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl TokenProvider for ExternalTokenProvider {
    async fn get_token(&self) -> DropboxResult<SecretString> {
        self.source.token().await
    }
}

/// Token source that always yields the same token
#[derive(Clone)]
pub struct StaticTokenSource {
    token: SecretString,
}

impl StaticTokenSource {
    /// Create a static source
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::new(token.into()),
        }
    }
}

impl std::fmt::Debug for StaticTokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StaticTokenSource([REDACTED])")
    }
}

#[async_trait]
impl TokenSource for StaticTokenSource {
    async fn token(&self) -> DropboxResult<SecretString> {
        Ok(self.token.clone())
    }
}
