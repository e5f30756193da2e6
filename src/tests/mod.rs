//! Tests for the Dropbox team connector.

use crate::auth::{Credential, RefreshTokenProvider};
use crate::client::DropboxClient;
use crate::config::DropboxConfig;
use crate::connector::DropboxConnector;
use crate::endpoints::EndpointTable;
use crate::mocks::MockHttpTransport;
use secrecy::SecretString;
use std::sync::Arc;

#[cfg(test)]
mod sync_tests;



#[cfg(test)]
mod actions_tests;

pub(crate) const TEST_BASE_URL: &str = "https://api.dropbox.test";

pub(crate) fn test_config() -> DropboxConfig {
    DropboxConfig::builder()
        .app_key("app-key")
        .base_url(TEST_BASE_URL)
        .unwrap()
        .build_unchecked()
}

/// Connector over a mock transport with a pre-exchanged token
pub(crate) fn mock_connector() -> (DropboxConnector, Arc<MockHttpTransport>) {
    mock_connector_with(test_config())
}

pub(crate) fn mock_connector_with(config: DropboxConfig) -> (DropboxConnector, Arc<MockHttpTransport>) {
    let (client, transport) = client_for(&config);
    (DropboxConnector::from_client(client, &config), transport)
}

/// Client over a mock transport with a pre-exchanged token
pub(crate) fn mock_client() -> (DropboxClient, Arc<MockHttpTransport>) {
    client_for(&test_config())
}

fn client_for(config: &DropboxConfig) -> (DropboxClient, Arc<MockHttpTransport>) {
    let transport = Arc::new(MockHttpTransport::new());
    let tokens = Arc::new(RefreshTokenProvider::from_credential(Credential::new(
        SecretString::new("sl.test-token".to_string()),
        None,
    )));
    let endpoints = Arc::new(EndpointTable::new(&config.base_url));
    (DropboxClient::new(transport.clone(), tokens, endpoints), transport)
}
