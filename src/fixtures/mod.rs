//! Test fixtures for team administration API responses.
//!
//! Builders return raw JSON so the same data feeds the mock transport and
//! HTTP-level mock servers.

use serde_json::{json, Value};

/// Team-member id of the synthetic member `n`
pub fn team_member_id(n: usize) -> String {
    format!("dbmid:AAD{:05}", n)
}

/// Email of the synthetic member `n`
pub fn email(n: usize) -> String {
    format!("user{:05}@example.com", n)
}

/// Member profile JSON
pub fn profile(n: usize, status: &str) -> Value {
    json!({
        "account_id": format!("dbid:AAH{:05}", n),
        "team_member_id": team_member_id(n),
        "name": {
            "display_name": format!("User {}", n),
            "given_name": "User",
            "surname": format!("{}", n)
        },
        "email": email(n),
        "email_verified": true,
        "groups": [],
        "status": { ".tag": status },
        "membership_type": { ".tag": "full" }
    })
}

/// Admin role JSON
pub fn role(id: &str, name: &str) -> Value {
    json!({
        "role_id": id,
        "name": name,
        "description": format!("{} description", name)
    })
}

/// Member listing entry with roles
pub fn member(n: usize, roles: Vec<Value>) -> Value {
    json!({
        "profile": profile(n, "active"),
        "roles": roles
    })
}

/// `members/list_v2` page
pub fn members_page(members: Vec<Value>, cursor: &str, has_more: bool) -> Value {
    json!({
        "members": members,
        "cursor": cursor,
        "has_more": has_more
    })
}

/// Cursor issued after page `index` of a synthetic listing
pub fn cursor(index: usize) -> String {
    format!("AAGcursor-{}", index + 1)
}

/// `total` synthetic members split into pages of `page_size`.
///
/// Page `i` carries [`cursor`]`(i)`; the last page still carries a cursor
/// but reports `has_more = false`.
pub fn synthetic_member_pages(total: usize, page_size: usize) -> Vec<Value> {
    let page_size = page_size.max(1);
    let pages = total.div_ceil(page_size).max(1);

    (0..pages)
        .map(|i| {
            let start = i * page_size;
            let end = (start + page_size).min(total);
            let members = (start..end).map(|n| member(n, vec![])).collect();
            members_page(members, &cursor(i), i + 1 < pages)
        })
        .collect()
}

/// Group JSON
pub fn group(id: &str, name: &str, member_count: u64) -> Value {
    json!({
        "group_id": id,
        "group_name": name,
        "group_management_type": { ".tag": "company_managed" },
        "member_count": member_count
    })
}

/// `groups/list` page
pub fn groups_page(groups: Vec<Value>, cursor: &str, has_more: bool) -> Value {
    json!({
        "groups": groups,
        "cursor": cursor,
        "has_more": has_more
    })
}

/// Group-member listing entry
pub fn group_member(n: usize, access_type: &str) -> Value {
    json!({
        "profile": profile(n, "active"),
        "access_type": { ".tag": access_type }
    })
}

/// `groups/members/list` page
pub fn group_members_page(members: Vec<Value>, cursor: &str, has_more: bool) -> Value {
    json!({
        "members": members,
        "cursor": cursor,
        "has_more": has_more
    })
}

/// Successful `members/add_v2` answer
pub fn add_member_success(n: usize) -> Value {
    json!({
        ".tag": "complete",
        "complete": [{
            ".tag": "success",
            "profile": profile(n, "invited")
        }]
    })
}

/// `members/remove` answer
pub fn remove_member_complete() -> Value {
    json!({ ".tag": "complete" })
}

/// Token endpoint answer
pub fn token_response(access_token: &str) -> Value {
    json!({
        "access_token": access_token,
        "expires_in": 14400,
        "token_type": "bearer"
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_pages_shape() {
        let pages = synthetic_member_pages(250, 100);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0]["members"].as_array().unwrap().len(), 100);
        assert_eq!(pages[2]["members"].as_array().unwrap().len(), 50);
        assert_eq!(pages[0]["has_more"], json!(true));
        assert_eq!(pages[2]["has_more"], json!(false));
        assert_eq!(pages[1]["cursor"], json!(cursor(1)));
    }
}
