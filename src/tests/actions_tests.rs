//! Custom action tests.

use super::mock_connector;
use crate::connector::actions::ActionType;
use crate::errors::DropboxError;
use crate::mocks::MockResponse;
use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};

fn args(user_id: &str) -> Map<String, Value> {
    let mut args = Map::new();
    args.insert("user_id".into(), json!(user_id));
    args
}

#[tokio::test]
async fn test_disable_user() {
    let (connector, transport) = mock_connector();
    transport.add_response(MockResponse::raw(200, "null"));

    let (result, annotations) = connector
        .invoke_action("disable_user", &args("dbmid:1"))
        .await
        .unwrap();

    assert_eq!(result, json!({ "success": true }));
    assert!(annotations.rate_limit().is_some());

    let request = transport.last_request().unwrap();
    assert_eq!(request.path(), "/2/team/members/suspend");
    assert_eq!(
        request.json_body().unwrap(),
        json!({ "user": { ".tag": "team_member_id", "team_member_id": "dbmid:1" } })
    );
}

#[tokio::test]
async fn test_enable_already_active_user_succeeds() {
    let (connector, transport) = mock_connector();
    transport.add_response(MockResponse::dropbox_error(
        409,
        "unsuspend_non_suspended_member",
        Some("unsuspend_non_suspended_member/.."),
    ));

    let (result, _) = connector
        .invoke_action("enable_user", &args("dbmid:1"))
        .await
        .unwrap();

    assert_eq!(result, json!({ "success": true }));
    assert_eq!(
        transport.last_request().unwrap().path(),
        "/2/team/members/unsuspend"
    );
}

#[tokio::test]
async fn test_action_upstream_failure() {
    let (connector, transport) = mock_connector();
    transport.add_response(MockResponse::dropbox_error(409, "suspend_last_admin", None));

    let err = connector
        .invoke_action("disable_user", &args("dbmid:1"))
        .await
        .unwrap_err();
    assert_eq!(err.upstream_tag(), Some("suspend_last_admin"));
}

#[tokio::test]
async fn test_action_invalid_arguments_make_no_request() {
    let (connector, transport) = mock_connector();

    let err = connector
        .invoke_action("disable_user", &Map::new())
        .await
        .unwrap_err();
    assert!(matches!(err, DropboxError::InvalidArgument(_)));

    let err = connector
        .invoke_action("rename_user", &args("dbmid:1"))
        .await
        .unwrap_err();
    assert!(matches!(err, DropboxError::InvalidArgument(_)));

    assert_eq!(transport.request_count(), 0);
}

#[test]
fn test_action_schemas() {
    let (connector, _) = mock_connector();
    let schemas = connector.action_schemas();

    let names: Vec<_> = schemas.iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["disable_user", "enable_user"]);
    assert_eq!(schemas[0].action_type, ActionType::AccountDisable);
    assert_eq!(schemas[1].action_type, ActionType::AccountEnable);
}

#[test]
fn test_connector_metadata() {
    let (connector, _) = mock_connector();
    let metadata = connector.metadata();

    assert_eq!(metadata.display_name, "Dropbox Business Connector");
    let field = &metadata.account_creation_schema[0];
    assert_eq!(field.name, "email");
    assert!(field.required);
    assert_eq!(field.placeholder, "john@doe.com");
}
