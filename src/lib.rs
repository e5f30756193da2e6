//! Dropbox Team Connector
//!
//! Identity sync for Dropbox Business teams:
//! - Cursor-paginated listing of members, groups and group members
//! - Role discovery from member listings
//! - Idempotent grant/revoke of group and role memberships
//! - Account provisioning, deprovisioning, suspension
//! - Rate-limit metadata surfaced on every call, never used to throttle
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use dropbox_team_connector::connector::ResourceSyncer;
//! use dropbox_team_connector::pagination::PageToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Refresh-token credentials from DROPBOX_* variables
//!     let connector = dropbox_team_connector::create_connector_from_env().await?;
//!
//!     let users = connector.users();
//!     let mut token = PageToken::start();
//!     loop {
//!         let page = users.list(None, &token).await?;
//!         for user in &page.items {
//!             println!("{} {}", user.id, user.display_name);
//!         }
//!         if page.next_page_token.is_start() {
//!             break;
//!         }
//!         token = page.next_page_token;
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// Core modules
pub mod auth;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod errors;
pub mod pagination;
pub mod transport;
pub mod types;

// Services
pub mod services;

// Sync orchestration
pub mod connector;

// Observability
pub mod observability;

// Testing utilities
pub mod fixtures;
pub mod mocks;

// Tests
#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use client::DropboxClient;
pub use config::{DropboxConfig, DropboxConfigBuilder};
pub use connector::DropboxConnector;
pub use errors::{DropboxError, DropboxResult};

/// Default base URL for the Dropbox API
pub const DEFAULT_BASE_URL: &str = "https://api.dropboxapi.com";

/// Default timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default page size for list calls
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Create a connector with the given configuration
///
/// `token_source` is consulted only when no refresh token is configured.
pub async fn create_connector(
    config: DropboxConfig,
    token_source: Option<std::sync::Arc<dyn auth::TokenSource>>,
) -> DropboxResult<DropboxConnector> {
    DropboxConnector::new(config, token_source).await
}

/// Create a refresh-token connector from environment variables
///
/// Reads:
/// - `DROPBOX_APP_KEY` - App key
/// - `DROPBOX_APP_SECRET` - App secret
/// - `DROPBOX_REFRESH_TOKEN` - Long-lived refresh token
/// - `DROPBOX_BASE_URL` - API base URL override
/// - `DROPBOX_TIMEOUT` - Request timeout in seconds
/// - `DROPBOX_PAGE_LIMIT` - Page size for list calls
pub async fn create_connector_from_env() -> DropboxResult<DropboxConnector> {
    let config = DropboxConfig::from_env()?;
    create_connector(config, None).await
}
