//! Listing and pagination tests.

use super::{mock_client, mock_connector, mock_connector_with};
use crate::connector::groups::group_resource;
use crate::connector::resource::{GROUP_MEMBER, GROUP_OWNER};
use crate::connector::{Resource, ResourceId, ResourceSyncer, ResourceType};
use crate::errors::{DropboxError, PaginationError};
use crate::fixtures;
use crate::mocks::MockResponse;
use crate::pagination::PageToken;
use crate::services::{GroupsApi, GroupsService, IdempotencyTags, MembersApi, MembersService};
use crate::types::{Group, GroupId, Tag};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn engineering() -> Resource {
    group_resource(
        &Group {
            group_id: GroupId::new("g:1"),
            group_name: "Engineering".into(),
            group_management_type: Tag::new("company_managed"),
            member_count: 3,
        },
        None,
    )
}

#[tokio::test]
async fn test_users_paginate_to_completion() {
    let (connector, transport) = mock_connector();
    transport.add_responses(
        fixtures::synthetic_member_pages(250, 100)
            .into_iter()
            .map(MockResponse::json),
    );

    let users = connector.users();
    let mut token = PageToken::start();
    let mut ids = Vec::new();
    let mut tokens = Vec::new();
    loop {
        let page = users.list(None, &token).await.unwrap();
        ids.extend(page.items.iter().map(|r| r.id.resource.clone()));
        tokens.push(page.next_page_token.clone());
        if page.next_page_token.is_start() {
            break;
        }
        token = page.next_page_token;
    }

    assert_eq!(ids.len(), 250);
    assert_eq!(ids[0], fixtures::team_member_id(0));
    assert_eq!(ids[249], fixtures::team_member_id(249));
    assert_eq!(
        tokens,
        vec![
            PageToken::new(fixtures::cursor(0)),
            PageToken::new(fixtures::cursor(1)),
            PageToken::start(),
        ]
    );

    let requests = transport.recorded_requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].path(), "/2/team/members/list_v2");
    assert_eq!(
        requests[0].json_body().unwrap(),
        json!({ "limit": 100, "include_removed": true })
    );
    assert_eq!(requests[1].path(), "/2/team/members/list/continue_v2");
    assert_eq!(requests[1].json_body().unwrap(), json!({ "cursor": fixtures::cursor(0) }));
    assert_eq!(requests[2].json_body().unwrap(), json!({ "cursor": fixtures::cursor(1) }));
}

#[tokio::test]
async fn test_configured_page_limit_is_sent() {
    let config = crate::DropboxConfig::builder()
        .app_key("app-key")
        .page_limit(25)
        .build_unchecked();
    let (connector, transport) = mock_connector_with(config);
    transport.add_response(MockResponse::json(fixtures::members_page(vec![], "", false)));

    let page = connector.users().list(None, &PageToken::start()).await.unwrap();
    assert!(page.items.is_empty());
    assert!(page.next_page_token.is_start());
    assert_eq!(transport.last_request().unwrap().json_body().unwrap()["limit"], json!(25));
}

#[tokio::test]
async fn test_user_resource_fields_from_listing() {
    let (connector, transport) = mock_connector();
    transport.add_response(MockResponse::json(fixtures::members_page(
        vec![fixtures::member(7, vec![])],
        "AAGend",
        false,
    )));

    let page = connector.users().list(None, &PageToken::start()).await.unwrap();
    let user = &page.items[0];
    assert_eq!(user.id, ResourceId::new(ResourceType::User, fixtures::team_member_id(7)));
    assert_eq!(user.display_name, fixtures::email(7));
    assert_eq!(user.profile["status"], json!("active"));
    assert_eq!(user.user.as_ref().unwrap().login, fixtures::email(7));
}

#[tokio::test]
async fn test_has_more_without_cursor_is_pagination_error() {
    let (connector, transport) = mock_connector();
    transport.add_response(MockResponse::json(fixtures::members_page(
        vec![fixtures::member(1, vec![])],
        "",
        true,
    )));

    let err = connector
        .users()
        .list(None, &PageToken::start())
        .await
        .unwrap_err();
    assert!(matches!(
        err.root(),
        DropboxError::Pagination(PaginationError::MissingCursor { .. })
    ));
}

#[tokio::test]
async fn test_empty_continue_cursor_makes_no_request() {
    let (client, transport) = mock_client();
    let members = MembersService::new(client.clone(), Arc::new(IdempotencyTags::default()), 100);
    let groups = GroupsService::new(client, Arc::new(IdempotencyTags::default()), 100);

    let err = members.list_continue("").await.unwrap_err();
    assert!(matches!(
        err.root(),
        DropboxError::Pagination(PaginationError::EmptyCursor { listing: "members" })
    ));

    let err = groups.members_continue("").await.unwrap_err();
    assert!(matches!(
        err.root(),
        DropboxError::Pagination(PaginationError::EmptyCursor { .. })
    ));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_roles_derived_across_pages() {
    let (connector, transport) = mock_connector();
    let admin = fixtures::role("pid_dbtmr:1", "Team admin");
    let billing = fixtures::role("pid_dbtmr:2", "Billing admin");
    transport
        .add_response(MockResponse::json(fixtures::members_page(
            vec![
                fixtures::member(0, vec![billing.clone()]),
                fixtures::member(1, vec![]),
            ],
            "AAGpage-1",
            true,
        )))
        .add_response(MockResponse::json(fixtures::members_page(
            vec![
                fixtures::member(2, vec![admin, billing]),
                fixtures::member(3, vec![]),
            ],
            "AAGpage-2",
            false,
        )));

    let page = connector.roles().list(None, &PageToken::start()).await.unwrap();

    let ids: Vec<_> = page.items.iter().map(|r| r.id.resource.as_str()).collect();
    assert_eq!(ids, vec!["pid_dbtmr:2", "pid_dbtmr:1"]);
    assert!(page.next_page_token.is_start());
    assert_eq!(transport.request_count(), 2);
}

#[tokio::test]
async fn test_role_grants_filter_members() {
    let (connector, transport) = mock_connector();
    let admin = fixtures::role("pid_dbtmr:1", "Team admin");
    transport
        .add_response(MockResponse::json(fixtures::members_page(
            vec![fixtures::member(0, vec![admin.clone()]), fixtures::member(1, vec![])],
            "AAGpage-1",
            true,
        )))
        .add_response(MockResponse::json(fixtures::members_page(
            vec![fixtures::member(2, vec![admin])],
            "AAGpage-2",
            false,
        )))
        .add_response(MockResponse::json(fixtures::members_page(
            vec![fixtures::member(3, vec![fixtures::role("pid_dbtmr:1", "Team admin")])],
            "",
            false,
        )));

    let roles = connector.roles();
    let listed = roles.list(None, &PageToken::start()).await.unwrap();
    assert_eq!(listed.items.len(), 1);

    let grants = roles
        .grants(&listed.items[0], &PageToken::start())
        .await
        .unwrap();
    let principals: Vec<_> = grants.items.iter().map(|g| g.principal.resource.clone()).collect();
    assert_eq!(principals, vec![fixtures::team_member_id(3)]);
    assert_eq!(grants.items[0].id, format!("role:pid_dbtmr:1:member:user:{}", fixtures::team_member_id(3)));
    assert_eq!(transport.request_count(), 3);
}

#[tokio::test]
async fn test_groups_listing() {
    let (connector, transport) = mock_connector();
    transport
        .add_response(MockResponse::json(fixtures::groups_page(
            vec![fixtures::group("g:1", "Engineering", 3)],
            "AAGgroups-1",
            true,
        )))
        .add_response(MockResponse::json(fixtures::groups_page(
            vec![fixtures::group("g:2", "Sales", 1)],
            "AAGgroups-2",
            false,
        )));

    let groups = connector.groups();
    let first = groups.list(None, &PageToken::start()).await.unwrap();
    assert_eq!(first.items[0].display_name, "Engineering");
    assert_eq!(first.next_page_token, PageToken::new("AAGgroups-1"));

    let second = groups.list(None, &first.next_page_token).await.unwrap();
    assert_eq!(second.items[0].id, ResourceId::new(ResourceType::Group, "g:2"));
    assert!(second.next_page_token.is_start());

    let requests = transport.recorded_requests();
    assert_eq!(requests[0].path(), "/2/team/groups/list");
    assert_eq!(requests[1].path(), "/2/team/groups/list/continue");
    assert_eq!(requests[1].json_body().unwrap(), json!({ "cursor": "AAGgroups-1" }));
}

#[tokio::test]
async fn test_group_entitlements() {
    let (connector, transport) = mock_connector();
    let entitlements = connector.groups().entitlements(&engineering()).await.unwrap();

    let slugs: Vec<_> = entitlements.iter().map(|e| e.slug.as_str()).collect();
    assert_eq!(slugs, vec![GROUP_MEMBER, GROUP_OWNER]);
    assert_eq!(entitlements[0].id, "group:g:1:member");
    assert_eq!(entitlements[1].display_name, "Engineering Group owner");
    assert_eq!(entitlements[1].description, "Owner of Engineering Dropbox group");
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_group_grants_skip_unknown_access() {
    let (connector, transport) = mock_connector();
    transport.add_response(MockResponse::json(fixtures::group_members_page(
        vec![
            fixtures::group_member(1, "owner"),
            fixtures::group_member(2, "member"),
            fixtures::group_member(3, "viewer"),
        ],
        "AAGmembers-1",
        false,
    )));

    let page = connector
        .groups()
        .grants(&engineering(), &PageToken::start())
        .await
        .unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].entitlement.slug, GROUP_OWNER);
    assert_eq!(page.items[1].entitlement.slug, GROUP_MEMBER);
    assert_eq!(
        page.items[0].id,
        format!("group:g:1:owner:user:{}", fixtures::team_member_id(1))
    );
    assert!(page.next_page_token.is_start());

    let request = transport.last_request().unwrap();
    assert_eq!(request.path(), "/2/team/groups/members/list");
    assert_eq!(
        request.json_body().unwrap(),
        json!({ "group": { ".tag": "group_id", "group_id": "g:1" }, "limit": 100 })
    );
}

#[tokio::test]
async fn test_listing_carries_rate_limit_annotation() {
    let (connector, transport) = mock_connector();
    transport.add_response(
        MockResponse::json(fixtures::groups_page(vec![], "", false))
            .with_header("X-RateLimit-Limit", "100")
            .with_header("X-RateLimit-Remaining", "99"),
    );

    let page = connector.groups().list(None, &PageToken::start()).await.unwrap();
    let rate_limit = page.annotations.rate_limit().unwrap();
    assert_eq!(rate_limit.limit, Some(100));
    assert_eq!(rate_limit.remaining, Some(99));
}

#[tokio::test]
async fn test_foreign_cursor_is_upstream_error() {
    let (connector, transport) = mock_connector();
    transport.add_response(MockResponse::dropbox_error(
        409,
        "invalid_cursor",
        Some("invalid_cursor/.."),
    ));

    // Cursor issued by the member listing, replayed against groups
    let token = PageToken::new(fixtures::cursor(0));
    let err = connector.groups().list(None, &token).await.unwrap_err();

    assert!(err.to_string().contains("continue listing groups"));
    assert_eq!(err.upstream_tag(), Some("invalid_cursor"));
    assert_eq!(err.http_status(), Some(409));
    assert_eq!(
        transport.last_request().unwrap().json_body().unwrap(),
        json!({ "cursor": fixtures::cursor(0) })
    );
}
