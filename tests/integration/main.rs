//! Integration tests using WireMock
//!
//! These tests drive the connector through the real reqwest transport
//! against a mock server: token exchange, paging, idempotent mutations and
//! rate-limit reporting.

mod provisioning;
mod sync;

use dropbox_team_connector::{create_connector, DropboxConfig, DropboxConnector};
use dropbox_team_connector::fixtures;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

pub const ACCESS_TOKEN: &str = "sl.integration-token";

/// Start a mock server that answers the refresh-token exchange
pub async fn setup_mock_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string(
            "grant_type=refresh_token&refresh_token=test-refresh&client_id=test-key&client_secret=test-secret",
        ))
        .respond_with(success_response(fixtures::token_response(ACCESS_TOKEN)))
        .expect(1)
        .mount(&server)
        .await;

    server
}

/// Connector pointed at the mock server
pub async fn connect(server: &MockServer) -> DropboxConnector {
    let config = DropboxConfig::builder()
        .app_key("test-key")
        .app_secret("test-secret")
        .refresh_token("test-refresh")
        .base_url(&server.uri())
        .expect("mock server uri")
        .build()
        .expect("valid config");

    create_connector(config, None)
        .await
        .expect("token exchange against mock server")
}

/// Authenticated POST to an API path
pub fn api_call(api_path: &str) -> MockBuilder {
    Mock::given(method("POST"))
        .and(path(api_path))
        .and(header("authorization", format!("Bearer {}", ACCESS_TOKEN).as_str()))
}

/// Success response template
pub fn success_response(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

/// Dropbox error-envelope response template
pub fn error_response(status: u16, tag: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(serde_json::json!({
        "error_summary": format!("{}/..", tag),
        "error": { ".tag": tag }
    }))
}
