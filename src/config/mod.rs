//! Configuration management for the Dropbox connector.
//!
//! Supports configuration via:
//! - Explicit values
//! - Environment variables
//! - Builder pattern

use crate::errors::{ConfigurationError, DropboxError, DropboxResult};
use crate::services::mutation::{IdempotencyTags, MutationKind};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

/// Largest page size accepted by the team listing endpoints
pub const MAX_PAGE_LIMIT: u32 = 1000;

/// Configuration for the Dropbox connector
#[derive(Clone)]
pub struct DropboxConfig {
    /// App key (OAuth client id)
    pub(crate) app_key: String,
    /// App secret (OAuth client secret)
    pub(crate) app_secret: Option<SecretString>,
    /// Long-lived refresh token
    pub(crate) refresh_token: Option<SecretString>,
    /// Base URL for API requests
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Page size for list calls, kept within 1..=MAX_PAGE_LIMIT
    pub(crate) page_limit: u32,
    /// Upstream tags treated as "already in desired state"
    pub idempotency: IdempotencyTags,
}

impl std::fmt::Debug for DropboxConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DropboxConfig")
            .field("app_key", &self.app_key)
            .field("app_secret", &self.app_secret.is_some())
            .field("refresh_token", &self.refresh_token.is_some())
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("page_limit", &self.page_limit)
            .field("idempotency", &self.idempotency)
            .finish()
    }
}

impl Default for DropboxConfig {
    fn default() -> Self {
        Self {
            app_key: String::new(),
            app_secret: None,
            refresh_token: None,
            base_url: crate::DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(crate::DEFAULT_TIMEOUT_SECS),
            page_limit: crate::DEFAULT_PAGE_LIMIT,
            idempotency: IdempotencyTags::default(),
        }
    }
}

impl DropboxConfig {
    /// Create a new configuration builder
    pub fn builder() -> DropboxConfigBuilder {
        DropboxConfigBuilder::new()
    }

    /// Create configuration from environment variables
    pub fn from_env() -> DropboxResult<Self> {
        let mut builder = DropboxConfigBuilder::new();

        if let Ok(key) = std::env::var("DROPBOX_APP_KEY") {
            builder = builder.app_key(&key);
        }
        if let Ok(secret) = std::env::var("DROPBOX_APP_SECRET") {
            builder = builder.app_secret(&secret);
        }
        if let Ok(token) = std::env::var("DROPBOX_REFRESH_TOKEN") {
            builder = builder.refresh_token(&token);
        }

        if let Ok(url) = std::env::var("DROPBOX_BASE_URL") {
            builder = builder.base_url(&url)?;
        }

        if let Ok(timeout) = std::env::var("DROPBOX_TIMEOUT") {
            if let Ok(secs) = timeout.parse::<u64>() {
                builder = builder.timeout(Duration::from_secs(secs));
            }
        }

        if let Ok(limit) = std::env::var("DROPBOX_PAGE_LIMIT") {
            if let Ok(n) = limit.parse::<u32>() {
                builder = builder.page_limit(n);
            }
        }

        builder.build()
    }

    /// Get the app key
    pub fn app_key(&self) -> &str {
        &self.app_key
    }

    /// Get the app secret if configured
    pub fn app_secret(&self) -> Option<&SecretString> {
        self.app_secret.as_ref()
    }

    /// Get the refresh token if configured
    pub fn refresh_token(&self) -> Option<&SecretString> {
        self.refresh_token.as_ref()
    }

    /// Whether the connector should run in refresh-token mode
    pub fn uses_refresh_token(&self) -> bool {
        self.refresh_token
            .as_ref()
            .is_some_and(|t| !t.expose_secret().is_empty())
    }

    /// Page size for list calls
    pub fn page_limit(&self) -> u32 {
        self.page_limit
    }

    /// Validate the configuration
    pub fn validate(&self) -> DropboxResult<()> {
        if self.app_key.trim().is_empty() {
            return Err(DropboxError::Configuration(ConfigurationError::MissingAppKey));
        }

        let has_secret = self
            .app_secret
            .as_ref()
            .is_some_and(|s| !s.expose_secret().is_empty());
        if self.uses_refresh_token() && !has_secret {
            return Err(DropboxError::Configuration(
                ConfigurationError::MissingAppSecret,
            ));
        }

        Ok(())
    }
}

/// Builder for DropboxConfig
#[derive(Default)]
pub struct DropboxConfigBuilder {
    config: DropboxConfig,
}

impl DropboxConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: DropboxConfig::default(),
        }
    }

    /// Set the app key
    pub fn app_key(mut self, key: &str) -> Self {
        self.config.app_key = key.to_string();
        self
    }

    /// Set the app secret
    pub fn app_secret(mut self, secret: &str) -> Self {
        self.config.app_secret = Some(SecretString::new(secret.to_string()));
        self
    }

    /// Set the refresh token
    pub fn refresh_token(mut self, token: &str) -> Self {
        self.config.refresh_token = Some(SecretString::new(token.to_string()));
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, url: &str) -> Result<Self, ConfigurationError> {
        let parsed = Url::parse(url).map_err(|e| ConfigurationError::InvalidConfiguration {
            message: format!("Invalid URL: {}", e),
        })?;
        self.config.base_url = parsed.as_str().trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Set the timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the page size, clamped to the upstream range
    pub fn page_limit(mut self, limit: u32) -> Self {
        self.config.page_limit = limit.clamp(1, MAX_PAGE_LIMIT);
        self
    }

    /// Replace the idempotent tag set for one mutation kind
    pub fn idempotent_tags<I, S>(mut self, kind: MutationKind, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.idempotency.set(kind, tags);
        self
    }

    /// Build the configuration
    pub fn build(self) -> DropboxResult<DropboxConfig> {
        self.config.validate()?;
        Ok(self.config)
    }

    /// Build the configuration without validation (for testing)
    pub fn build_unchecked(self) -> DropboxConfig {
        self.config
    }
}
