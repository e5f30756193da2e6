//! Mutation integration tests

use super::*;
use dropbox_team_connector::connector::{
    Annotation, Entitlement, Grant, GrantProvisioner, Resource, ResourceId, ResourceSyncer,
    ResourceType,
};
use dropbox_team_connector::pagination::PageToken;
use serde_json::json;
use wiremock::matchers::body_json;

async fn engineering(connector: &DropboxConnector, server: &MockServer) -> Resource {
    api_call("/2/team/groups/list")
        .respond_with(success_response(fixtures::groups_page(
            vec![fixtures::group("g:1", "Engineering", 1)],
            "",
            false,
        )))
        .mount(server)
        .await;

    let mut page = connector
        .groups()
        .list(None, &PageToken::start())
        .await
        .unwrap();
    page.items.remove(0)
}

fn member_entitlement(entitlements: &[Entitlement]) -> Entitlement {
    entitlements
        .iter()
        .find(|e| e.slug == "member")
        .cloned()
        .unwrap()
}

#[tokio::test]
async fn test_repeated_group_grant_is_idempotent() {
    let server = setup_mock_server().await;
    let connector = connect(&server).await;
    let group = engineering(&connector, &server).await;
    let entitlement = member_entitlement(&connector.groups().entitlements(&group).await.unwrap());

    api_call("/2/team/groups/members/add")
        .respond_with(error_response(409, "duplicate_user"))
        .expect(1)
        .mount(&server)
        .await;

    let principal = Resource {
        id: ResourceId::new(ResourceType::User, "dbmid:AAD00001"),
        display_name: "user00001@example.com".into(),
        parent_id: None,
        profile: Default::default(),
        user: None,
    };
    let annotations = connector
        .groups()
        .grant(&principal, &entitlement)
        .await
        .unwrap();

    assert!(annotations.contains(&Annotation::GrantAlreadyExists));
}

#[tokio::test]
async fn test_group_revoke_of_absent_member() {
    let server = setup_mock_server().await;
    let connector = connect(&server).await;
    let group = engineering(&connector, &server).await;
    let entitlement = member_entitlement(&connector.groups().entitlements(&group).await.unwrap());

    api_call("/2/team/groups/members/remove")
        .and(body_json(json!({
            "group": { ".tag": "group_id", "group_id": "g:1" },
            "users": [{ ".tag": "team_member_id", "team_member_id": "dbmid:AAD00002" }],
            "return_members": false
        })))
        .respond_with(error_response(409, "members_not_in_group"))
        .expect(1)
        .mount(&server)
        .await;

    let grant = Grant::new(
        entitlement,
        ResourceId::new(ResourceType::User, "dbmid:AAD00002"),
    );
    let annotations = connector.groups().revoke(&grant).await.unwrap();

    assert!(annotations.contains(&Annotation::GrantAlreadyRevoked));
}

#[tokio::test]
async fn test_suspend_action_over_http() {
    let server = setup_mock_server().await;
    let connector = connect(&server).await;

    api_call("/2/team/members/suspend")
        .and(body_json(json!({
            "user": { ".tag": "team_member_id", "team_member_id": "dbmid:AAD00003" }
        })))
        .respond_with(success_response(json!(null)))
        .expect(1)
        .mount(&server)
        .await;

    let mut args = serde_json::Map::new();
    args.insert("user_id".into(), json!("dbmid:AAD00003"));
    let (result, _) = connector.invoke_action("disable_user", &args).await.unwrap();

    assert_eq!(result, json!({ "success": true }));
}
