//! Request types for the groups service.

use crate::types::{AccessType, GroupId, GroupSelector, Tag, TeamMemberId, UserSelector};
use serde::Serialize;

/// Body of `groups/list`
#[derive(Debug, Clone, Serialize)]
pub struct ListGroupsRequest {
    /// Page size
    pub limit: u32,
}

/// Body of `groups/members/list`
#[derive(Debug, Clone, Serialize)]
pub struct ListGroupMembersRequest {
    /// Group to list
    pub group: GroupSelector,
    /// Page size
    pub limit: u32,
}

impl ListGroupMembersRequest {
    /// List members of a group
    pub fn new(group: &GroupId, limit: u32) -> Self {
        Self {
            group: GroupSelector::id(group),
            limit,
        }
    }
}

/// Body of `groups/members/add`
#[derive(Debug, Clone, Serialize)]
pub struct AddGroupMembersRequest {
    /// Target group
    pub group: GroupSelector,
    /// Members to add
    pub members: Vec<MemberAccess>,
    /// Whether the answer lists the group's members
    pub return_members: bool,
}

/// Member plus access level for `groups/members/add`
#[derive(Debug, Clone, Serialize)]
pub struct MemberAccess {
    /// Access level
    pub access_type: Tag,
    /// Member
    pub user: UserSelector,
}

impl AddGroupMembersRequest {
    /// Add one member with the given access level
    pub fn single(group: &GroupId, member: &TeamMemberId, access: AccessType) -> Self {
        Self {
            group: GroupSelector::id(group),
            members: vec![MemberAccess {
                access_type: access.to_tag(),
                user: UserSelector::team_member(member),
            }],
            return_members: false,
        }
    }
}

/// Body of `groups/members/remove`
#[derive(Debug, Clone, Serialize)]
pub struct RemoveGroupMembersRequest {
    /// Target group
    pub group: GroupSelector,
    /// Members to remove
    pub users: Vec<UserSelector>,
    /// Whether the answer lists the group's members
    pub return_members: bool,
}

impl RemoveGroupMembersRequest {
    /// Remove one member
    pub fn single(group: &GroupId, member: &TeamMemberId) -> Self {
        Self {
            group: GroupSelector::id(group),
            users: vec![UserSelector::team_member(member)],
            return_members: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_add_request_shape() {
        let request = AddGroupMembersRequest::single(
            &GroupId::new("g:1"),
            &TeamMemberId::new("dbmid:1"),
            AccessType::Owner,
        );
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({
                "group": {".tag": "group_id", "group_id": "g:1"},
                "members": [{
                    "access_type": {".tag": "owner"},
                    "user": {".tag": "team_member_id", "team_member_id": "dbmid:1"}
                }],
                "return_members": false
            })
        );
    }

    #[test]
    fn test_remove_request_shape() {
        let request =
            RemoveGroupMembersRequest::single(&GroupId::new("g:1"), &TeamMemberId::new("dbmid:1"));
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({
                "group": {".tag": "group_id", "group_id": "g:1"},
                "users": [{".tag": "team_member_id", "team_member_id": "dbmid:1"}],
                "return_members": false
            })
        );
    }
}
