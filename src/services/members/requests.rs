//! Request types for the members service.

use crate::types::{TeamMemberId, UserSelector};
use serde::Serialize;

/// Body of `members/list_v2`
#[derive(Debug, Clone, Serialize)]
pub struct ListMembersRequest {
    /// Page size
    pub limit: u32,
    /// Whether removed members are listed
    pub include_removed: bool,
}

impl ListMembersRequest {
    /// Create a list request including removed members
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            include_removed: true,
        }
    }
}

/// Body of every `*/list/continue*` call
#[derive(Debug, Clone, Serialize)]
pub struct ContinueRequest<'a> {
    /// Cursor from the previous page
    pub cursor: &'a str,
}

/// Body of `members/add_v2`
#[derive(Debug, Clone, Serialize)]
pub struct AddMembersRequest {
    /// Members to invite
    pub new_members: Vec<NewMember>,
}

/// One member to invite
#[derive(Debug, Clone, Serialize)]
pub struct NewMember {
    /// Email address
    pub member_email: String,
}

impl AddMembersRequest {
    /// Invite a single member by email
    pub fn single(email: impl Into<String>) -> Self {
        Self {
            new_members: vec![NewMember {
                member_email: email.into(),
            }],
        }
    }
}

/// Body of calls addressing one member: remove, suspend, unsuspend
#[derive(Debug, Clone, Serialize)]
pub struct MemberActionRequest {
    /// Target member
    pub user: UserSelector,
}

impl MemberActionRequest {
    /// Address a member by team-member id
    pub fn new(id: &TeamMemberId) -> Self {
        Self {
            user: UserSelector::team_member(id),
        }
    }
}
