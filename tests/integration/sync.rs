//! Listing integration tests

use super::*;
use dropbox_team_connector::connector::ResourceSyncer;
use dropbox_team_connector::errors::RateLimitStatus;
use dropbox_team_connector::pagination::PageToken;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::body_json;

#[tokio::test]
async fn test_members_paginate_over_http() {
    let server = setup_mock_server().await;
    let pages = fixtures::synthetic_member_pages(250, 100);

    api_call("/2/team/members/list_v2")
        .and(body_json(json!({ "limit": 100, "include_removed": true })))
        .respond_with(success_response(pages[0].clone()))
        .expect(1)
        .mount(&server)
        .await;
    for (i, page) in pages.iter().enumerate().skip(1) {
        api_call("/2/team/members/list/continue_v2")
            .and(body_json(json!({ "cursor": fixtures::cursor(i - 1) })))
            .respond_with(success_response(page.clone()))
            .expect(1)
            .mount(&server)
            .await;
    }

    let connector = connect(&server).await;
    let users = connector.users();

    let mut token = PageToken::start();
    let mut total = 0;
    loop {
        let page = users.list(None, &token).await.unwrap();
        total += page.items.len();
        if page.next_page_token.is_start() {
            break;
        }
        token = page.next_page_token;
    }

    assert_eq!(total, 250);
}

#[tokio::test]
async fn test_roles_drain_member_listing() {
    let server = setup_mock_server().await;

    api_call("/2/team/members/list_v2")
        .respond_with(success_response(fixtures::members_page(
            vec![fixtures::member(0, vec![])],
            "AAGnext",
            true,
        )))
        .expect(1)
        .mount(&server)
        .await;
    api_call("/2/team/members/list/continue_v2")
        .and(body_json(json!({ "cursor": "AAGnext" })))
        .respond_with(success_response(fixtures::members_page(
            vec![fixtures::member(1, vec![fixtures::role("pid_dbtmr:3", "User management admin")])],
            "AAGdone",
            false,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let connector = connect(&server).await;
    let page = connector.roles().list(None, &PageToken::start()).await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].display_name, "User management admin");
    assert!(page.next_page_token.is_start());
}

#[tokio::test]
async fn test_rate_limit_headers_are_reported() {
    let server = setup_mock_server().await;

    api_call("/2/team/groups/list")
        .respond_with(
            success_response(fixtures::groups_page(
                vec![fixtures::group("g:1", "Engineering", 2)],
                "",
                false,
            ))
            .insert_header("X-RateLimit-Limit", "1000")
            .insert_header("X-RateLimit-Remaining", "997")
            .insert_header("X-RateLimit-Reset", "60"),
        )
        .mount(&server)
        .await;

    let connector = connect(&server).await;
    let page = connector.groups().list(None, &PageToken::start()).await.unwrap();

    let rate_limit = page.annotations.rate_limit().unwrap();
    assert_eq!(rate_limit.status, RateLimitStatus::Ok);
    assert_eq!(rate_limit.limit, Some(1000));
    assert_eq!(rate_limit.remaining, Some(997));
    assert!(rate_limit.reset_at.is_some());
}

#[tokio::test]
async fn test_too_many_requests_is_not_retried() {
    let server = setup_mock_server().await;

    api_call("/2/team/groups/list")
        .respond_with(error_response(429, "too_many_requests").insert_header("Retry-After", "5"))
        .expect(1)
        .mount(&server)
        .await;

    let connector = connect(&server).await;
    let err = connector
        .groups()
        .list(None, &PageToken::start())
        .await
        .unwrap_err();

    assert_eq!(err.http_status(), Some(429));
    let rate_limit = err.rate_limit().unwrap();
    assert!(rate_limit.is_overlimit());
    assert_eq!(rate_limit.retry_after, Some(std::time::Duration::from_secs(5)));
}
