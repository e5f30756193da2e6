//! Response types for the groups service.

use crate::errors::RateLimitInfo;
use crate::pagination::ListPage;
use crate::types::{Group, GroupMember};
use serde::Deserialize;

/// Response from `groups/list` and `groups/list/continue`
#[derive(Debug, Clone, Deserialize)]
pub struct ListGroupsResponse {
    /// Cursor for the continue call
    #[serde(default)]
    pub cursor: String,
    /// Whether more pages follow
    #[serde(default)]
    pub has_more: bool,
    /// Groups on this page
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl ListGroupsResponse {
    /// Convert into a generic page
    pub fn into_page(self, rate_limit: RateLimitInfo) -> ListPage<Group> {
        ListPage {
            items: self.groups,
            cursor: self.cursor,
            has_more: self.has_more,
            rate_limit,
        }
    }
}

/// Response from `groups/members/list` and `groups/members/list/continue`
#[derive(Debug, Clone, Deserialize)]
pub struct ListGroupMembersResponse {
    /// Cursor for the continue call
    #[serde(default)]
    pub cursor: String,
    /// Whether more pages follow
    #[serde(default)]
    pub has_more: bool,
    /// Members on this page
    #[serde(default)]
    pub members: Vec<GroupMember>,
}

impl ListGroupMembersResponse {
    /// Convert into a generic page
    pub fn into_page(self, rate_limit: RateLimitInfo) -> ListPage<GroupMember> {
        ListPage {
            items: self.members,
            cursor: self.cursor,
            has_more: self.has_more,
            rate_limit,
        }
    }
}
