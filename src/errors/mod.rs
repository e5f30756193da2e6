//! Error types for the Dropbox connector.
//!
//! Provides an error hierarchy mapping transport failures, Dropbox API error
//! envelopes and caller contract violations onto semantic error types, plus
//! the rate-limit descriptor that travels with every upstream answer.

use chrono::{DateTime, Utc};
use http::HeaderMap;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type for Dropbox operations
pub type DropboxResult<T> = Result<T, DropboxError>;

/// Fallback message when an error envelope carries neither summary nor tag
pub const UNKNOWN_ERROR_MESSAGE: &str = "unknown dropbox error";

/// Root error type for the Dropbox connector
#[derive(Error, Debug)]
pub enum DropboxError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Authentication error
    #[error("Authentication error: {0}")]
    Authentication(#[from] AuthenticationError),

    /// Caller contract violation, raised before any network call
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgumentError),

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Response parsing error
    #[error("Response error: {0}")]
    Response(#[from] ResponseError),

    /// Cursor protocol misuse
    #[error("Pagination error: {0}")]
    Pagination(#[from] PaginationError),

    /// Non-2xx answer carrying the Dropbox error envelope
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Account provisioning did not complete
    #[error("Provisioning error: {0}")]
    Provisioning(#[from] ProvisioningError),

    /// Error annotated with the operation that produced it
    #[error("{operation}: {source}")]
    Context {
        /// Operation name
        operation: &'static str,
        /// Wrapped error
        #[source]
        source: Box<DropboxError>,
    },
}

impl DropboxError {
    /// Wrap this error with the name of the operation that failed
    pub fn context(self, operation: &'static str) -> Self {
        Self::Context {
            operation,
            source: Box::new(self),
        }
    }

    /// The innermost error, looking through operation context
    pub fn root(&self) -> &DropboxError {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Context { source, .. } => source.error_code(),
            Self::Configuration(_) => "DROPBOX_CONFIG",
            Self::Authentication(_) => "DROPBOX_AUTH",
            Self::InvalidArgument(_) => "DROPBOX_INVALID_ARGUMENT",
            Self::Network(_) => "DROPBOX_NETWORK",
            Self::Response(_) => "DROPBOX_RESPONSE",
            Self::Pagination(_) => "DROPBOX_PAGINATION",
            Self::Api(_) => "DROPBOX_API",
            Self::Provisioning(_) => "DROPBOX_PROVISIONING",
        }
    }

    /// Map the error onto the host framework's error taxonomy
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Context { source, .. } => source.class(),
            Self::Configuration(_) => ErrorClass::FailedPrecondition,
            Self::Authentication(_) => ErrorClass::Unauthenticated,
            Self::InvalidArgument(_) => ErrorClass::InvalidArgument,
            Self::Network(_) => ErrorClass::Unavailable,
            Self::Response(_) => ErrorClass::Internal,
            Self::Pagination(_) => ErrorClass::Internal,
            Self::Api(api) => api.class(),
            Self::Provisioning(_) => ErrorClass::Internal,
        }
    }

    /// The decoded `.tag` of an upstream error envelope, if any
    pub fn upstream_tag(&self) -> Option<&str> {
        match self.root() {
            Self::Api(api) => api.tag.as_deref(),
            _ => None,
        }
    }

    /// The upstream HTTP status, if the error came from an API answer
    pub fn http_status(&self) -> Option<u16> {
        match self.root() {
            Self::Api(api) => Some(api.status),
            _ => None,
        }
    }

    /// Rate-limit descriptor observed on the failing response
    pub fn rate_limit(&self) -> Option<&RateLimitInfo> {
        match self.root() {
            Self::Api(api) => Some(&api.rate_limit),
            _ => None,
        }
    }

    /// Shorthand for an invalid-argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(InvalidArgumentError::Invalid {
            message: message.into(),
        })
    }
}

/// Host-facing error classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Caller supplied a malformed or unsupported argument
    InvalidArgument,
    /// Credential missing or rejected
    Unauthenticated,
    /// Target does not exist upstream
    NotFound,
    /// Target already exists upstream
    AlreadyExists,
    /// Upstream quota exhausted
    ResourceExhausted,
    /// Upstream unreachable or temporarily failing
    Unavailable,
    /// Connector defect or undecodable upstream answer
    Internal,
    /// Connector is not in a state to perform the call
    FailedPrecondition,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// Missing app key
    #[error("App key is missing")]
    MissingAppKey,

    /// Refresh token configured without an app secret
    #[error("App secret is required when a refresh token is configured")]
    MissingAppSecret,

    /// Neither refresh token nor external token source provided
    #[error("No credential configured: provide a refresh token or a token source")]
    MissingCredential,

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Error message
        message: String,
    },
}

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthenticationError {
    /// Refresh token was empty
    #[error("Refresh token is empty")]
    EmptyRefreshToken,

    /// Token endpoint rejected the exchange
    #[error("Token exchange failed with status {status}")]
    TokenExchangeFailed {
        /// HTTP status returned by the token endpoint
        status: u16,
    },

    /// Token endpoint answered with an undecodable body
    #[error("Token response could not be decoded: {message}")]
    InvalidTokenResponse {
        /// Error message
        message: String,
    },

    /// Token source failed to yield a credential
    #[error("Token source failed: {message}")]
    TokenSource {
        /// Error message
        message: String,
    },

    /// Credential is not a valid header value
    #[error("Access token is not a valid header value")]
    InvalidHeaderValue,
}

/// Caller contract violations
#[derive(Error, Debug)]
pub enum InvalidArgumentError {
    /// Principal is of a kind that cannot hold the entitlement
    #[error("Principal must be a {expected}, got {actual}")]
    WrongPrincipalKind {
        /// Expected resource kind
        expected: String,
        /// Supplied resource kind
        actual: String,
    },

    /// Resource is of an unexpected kind
    #[error("Invalid resource type: expected {expected}, got {actual}")]
    WrongResourceKind {
        /// Expected resource kind
        expected: String,
        /// Supplied resource kind
        actual: String,
    },

    /// A required field is absent or empty
    #[error("Missing required field: {field}")]
    MissingField {
        /// Field name
        field: String,
    },

    /// Entitlement slug is not defined for the resource kind
    #[error("Unknown entitlement '{slug}' for {resource_kind}")]
    UnknownEntitlement {
        /// Entitlement slug
        slug: String,
        /// Resource kind
        resource_kind: String,
    },

    /// Generic invalid argument
    #[error("{message}")]
    Invalid {
        /// Error message
        message: String,
    },
}

/// Network errors
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Connection failed
    #[error("Connection failed: {message}")]
    ConnectionFailed {
        /// Error message
        message: String,
    },

    /// Request timeout
    #[error("Request timed out")]
    Timeout,

    /// Request could not be built
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Error message
        message: String,
    },

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NetworkError::Timeout
        } else if err.is_connect() {
            NetworkError::ConnectionFailed {
                message: err.to_string(),
            }
        } else if err.is_builder() {
            NetworkError::InvalidRequest {
                message: err.to_string(),
            }
        } else {
            NetworkError::Http(err.to_string())
        }
    }
}

/// Response parsing errors
#[derive(Error, Debug)]
pub enum ResponseError {
    /// JSON deserialization error
    #[error("Deserialization error: {message}")]
    Deserialization {
        /// Error message
        message: String,
    },

    /// Request body could not be encoded
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message
        message: String,
    },

    /// Unexpected response content
    #[error("Unexpected response: {message}")]
    Unexpected {
        /// Error message
        message: String,
    },
}

impl From<serde_json::Error> for ResponseError {
    fn from(err: serde_json::Error) -> Self {
        ResponseError::Deserialization {
            message: err.to_string(),
        }
    }
}

/// Cursor protocol misuse
#[derive(Error, Debug)]
pub enum PaginationError {
    /// A continue call was issued without a cursor
    #[error("{listing} continue called with an empty cursor")]
    EmptyCursor {
        /// Listing name
        listing: &'static str,
    },

    /// Upstream reported more pages but returned no cursor
    #[error("{listing} page reported has_more without a cursor")]
    MissingCursor {
        /// Listing name
        listing: &'static str,
    },
}

/// Account provisioning errors
#[derive(Error, Debug)]
pub enum ProvisioningError {
    /// Add-member completion record was not tagged success
    #[error("Member was not created: completion tag '{tag}'")]
    NotCompleted {
        /// Completion tag returned upstream
        tag: String,
    },

    /// Add-member answer carried no completion record
    #[error("Add-member response carried no completion record")]
    EmptyCompletion,
}

/// Dropbox error envelope: `{"error_summary": ..., "error": {".tag": ...}}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorEnvelope {
    /// Human-readable summary
    #[serde(default)]
    pub error_summary: String,
    /// Discriminated error union
    #[serde(default)]
    pub error: Option<ErrorTag>,
}

/// The `.tag` discriminator of an error union
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorTag {
    /// Tag value
    #[serde(rename = ".tag", default)]
    pub tag: String,
}

impl ErrorEnvelope {
    /// Parse an envelope from a raw response body
    pub fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }

    /// The decoded tag, if present and non-empty
    pub fn tag(&self) -> Option<&str> {
        self.error
            .as_ref()
            .map(|e| e.tag.as_str())
            .filter(|t| !t.is_empty())
    }

    /// Effective message: summary, then tag, then a generic fallback
    pub fn message(&self) -> &str {
        if !self.error_summary.is_empty() {
            return &self.error_summary;
        }
        self.tag().unwrap_or(UNKNOWN_ERROR_MESSAGE)
    }
}

/// Upstream API error decoded from a non-2xx response
#[derive(Error, Debug, Clone)]
pub struct ApiError {
    /// HTTP status code
    pub status: u16,
    /// Decoded `.tag`
    pub tag: Option<String>,
    /// Decoded `error_summary`
    pub summary: Option<String>,
    /// Rate-limit descriptor observed on the response
    pub rate_limit: RateLimitInfo,
}

impl ApiError {
    /// Build an API error from a status and the decoded envelope
    pub fn from_envelope(status: u16, envelope: Option<ErrorEnvelope>, rate_limit: RateLimitInfo) -> Self {
        let envelope = envelope.unwrap_or_default();
        let tag = envelope.tag().map(String::from);
        let summary = Some(envelope.error_summary).filter(|s| !s.is_empty());
        Self {
            status,
            tag,
            summary,
            rate_limit,
        }
    }

    /// Effective message: summary, then tag, then a generic fallback
    pub fn message(&self) -> &str {
        self.summary
            .as_deref()
            .or(self.tag.as_deref())
            .unwrap_or(UNKNOWN_ERROR_MESSAGE)
    }

    /// Whether this answer is a conflict-family response
    pub fn is_conflict_or_not_found(&self) -> bool {
        self.status == 409 || self.status == 404
    }

    fn class(&self) -> ErrorClass {
        match self.status {
            400 => ErrorClass::InvalidArgument,
            401 => ErrorClass::Unauthenticated,
            403 => ErrorClass::FailedPrecondition,
            404 => ErrorClass::NotFound,
            409 => ErrorClass::FailedPrecondition,
            429 => ErrorClass::ResourceExhausted,
            500..=599 => ErrorClass::Unavailable,
            _ => ErrorClass::Internal,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.message())?;
        if let Some(tag) = &self.tag {
            if self.summary.is_some() {
                write!(f, " (tag: {})", tag)?;
            }
        }
        Ok(())
    }
}

/// Rate-limit state reported by the upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RateLimitStatus {
    /// No rate-limit metadata was present
    #[default]
    Unknown,
    /// Within quota
    Ok,
    /// Quota exhausted
    Overlimit,
}

/// Advisory rate-limit descriptor; never used to throttle internally
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RateLimitInfo {
    /// Rate-limit state
    pub status: RateLimitStatus,
    /// Maximum requests allowed in the window
    pub limit: Option<u64>,
    /// Remaining requests in the window
    pub remaining: Option<u64>,
    /// When the window resets
    pub reset_at: Option<DateTime<Utc>>,
    /// Retry-After header value
    pub retry_after: Option<Duration>,
}

/// Reset values below this are seconds-from-now; above it, Unix timestamps
const RESET_EPOCH_THRESHOLD: i64 = 1_000_000_000;

impl RateLimitInfo {
    /// Extract rate-limit metadata from response headers and status
    pub fn from_response(status: u16, headers: &HeaderMap) -> Self {
        Self::from_response_at(status, headers, Utc::now())
    }

    /// Same as [`RateLimitInfo::from_response`] with an explicit clock
    pub fn from_response_at(status: u16, headers: &HeaderMap, now: DateTime<Utc>) -> Self {
        let header_u64 = |name: &str| -> Option<u64> {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok())
        };

        let limit = header_u64("x-ratelimit-limit");
        let remaining = header_u64("x-ratelimit-remaining");
        let retry_after = header_u64("retry-after").map(Duration::from_secs);
        let reset_at = headers
            .get("x-ratelimit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<i64>().ok())
            .and_then(|reset| match reset {
                r if r < 0 => None,
                r if r < RESET_EPOCH_THRESHOLD => chrono::Duration::try_seconds(r)
                    .and_then(|d| now.checked_add_signed(d)),
                r => DateTime::from_timestamp(r, 0),
            })
            .or_else(|| {
                retry_after
                    .and_then(|d| chrono::Duration::from_std(d).ok())
                    .and_then(|d| now.checked_add_signed(d))
            });

        let seen_any = limit.is_some() || remaining.is_some() || reset_at.is_some();
        let status = if status == 429 || remaining == Some(0) {
            RateLimitStatus::Overlimit
        } else if seen_any {
            RateLimitStatus::Ok
        } else {
            RateLimitStatus::Unknown
        };

        Self {
            status,
            limit,
            remaining,
            reset_at,
            retry_after,
        }
    }

    /// Whether the upstream reported an exhausted quota
    pub fn is_overlimit(&self) -> bool {
        self.status == RateLimitStatus::Overlimit
    }
}
