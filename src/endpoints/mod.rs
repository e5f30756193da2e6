//! Typed endpoint table for the team administration API.

use http::Method;
use std::collections::HashMap;
use std::fmt;

/// Entity kinds with a cursor-paginated listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// Team members
    Members,
    /// Team groups
    Groups,
    /// Members of one group
    GroupMembers,
}

impl ListKind {
    /// Short name used in logs and errors
    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::Members => "members",
            ListKind::Groups => "groups",
            ListKind::GroupMembers => "group_members",
        }
    }
}

/// Position in a listing's cursor protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListPhase {
    /// Initial call carrying filters and page size
    Start,
    /// Follow-up call carrying only the cursor
    Continue,
}

/// Every upstream call the connector issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `members/list_v2`
    ListMembers,
    /// `members/list/continue_v2`
    ListMembersContinue,
    /// `members/add_v2`
    AddMember,
    /// `members/remove`
    RemoveMember,
    /// `members/suspend`
    SuspendMember,
    /// `members/unsuspend`
    UnsuspendMember,
    /// `members/set_admin_permissions_v2`
    SetAdminPermissions,
    /// `groups/list`
    ListGroups,
    /// `groups/list/continue`
    ListGroupsContinue,
    /// `groups/members/list`
    ListGroupMembers,
    /// `groups/members/list/continue`
    ListGroupMembersContinue,
    /// `groups/members/add`
    AddGroupMembers,
    /// `groups/members/remove`
    RemoveGroupMembers,
}

impl Operation {
    /// All operations, in table order
    pub const ALL: [Operation; 13] = [
        Operation::ListMembers,
        Operation::ListMembersContinue,
        Operation::AddMember,
        Operation::RemoveMember,
        Operation::SuspendMember,
        Operation::UnsuspendMember,
        Operation::SetAdminPermissions,
        Operation::ListGroups,
        Operation::ListGroupsContinue,
        Operation::ListGroupMembers,
        Operation::ListGroupMembersContinue,
        Operation::AddGroupMembers,
        Operation::RemoveGroupMembers,
    ];

    /// Select the list or list-continue operation for a listing
    pub fn list(kind: ListKind, phase: ListPhase) -> Operation {
        match (kind, phase) {
            (ListKind::Members, ListPhase::Start) => Operation::ListMembers,
            (ListKind::Members, ListPhase::Continue) => Operation::ListMembersContinue,
            (ListKind::Groups, ListPhase::Start) => Operation::ListGroups,
            (ListKind::Groups, ListPhase::Continue) => Operation::ListGroupsContinue,
            (ListKind::GroupMembers, ListPhase::Start) => Operation::ListGroupMembers,
            (ListKind::GroupMembers, ListPhase::Continue) => Operation::ListGroupMembersContinue,
        }
    }

    /// Human-readable name used as error context
    pub fn name(&self) -> &'static str {
        match self {
            Operation::ListMembers => "list members",
            Operation::ListMembersContinue => "continue listing members",
            Operation::AddMember => "add member",
            Operation::RemoveMember => "remove member",
            Operation::SuspendMember => "suspend member",
            Operation::UnsuspendMember => "unsuspend member",
            Operation::SetAdminPermissions => "set admin permissions",
            Operation::ListGroups => "list groups",
            Operation::ListGroupsContinue => "continue listing groups",
            Operation::ListGroupMembers => "list group members",
            Operation::ListGroupMembersContinue => "continue listing group members",
            Operation::AddGroupMembers => "add group members",
            Operation::RemoveGroupMembers => "remove group members",
        }
    }

    /// Path relative to the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            Operation::ListMembers => "/2/team/members/list_v2",
            Operation::ListMembersContinue => "/2/team/members/list/continue_v2",
            Operation::AddMember => "/2/team/members/add_v2",
            Operation::RemoveMember => "/2/team/members/remove",
            Operation::SuspendMember => "/2/team/members/suspend",
            Operation::UnsuspendMember => "/2/team/members/unsuspend",
            Operation::SetAdminPermissions => "/2/team/members/set_admin_permissions_v2",
            Operation::ListGroups => "/2/team/groups/list",
            Operation::ListGroupsContinue => "/2/team/groups/list/continue",
            Operation::ListGroupMembers => "/2/team/groups/members/list",
            Operation::ListGroupMembersContinue => "/2/team/groups/members/list/continue",
            Operation::AddGroupMembers => "/2/team/groups/members/add",
            Operation::RemoveGroupMembers => "/2/team/groups/members/remove",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Resolved endpoint descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Absolute URL
    pub url: String,
    /// Path relative to the base URL
    pub path: &'static str,
    /// HTTP method
    pub method: Method,
    /// Whether the call carries a JSON body
    pub requires_body: bool,
}

/// Endpoint descriptors resolved once against a base URL
#[derive(Debug, Clone)]
pub struct EndpointTable {
    base_url: String,
    endpoints: HashMap<Operation, Endpoint>,
}

impl EndpointTable {
    /// Build the table for a base URL
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let endpoints = Operation::ALL
            .iter()
            .map(|op| {
                let endpoint = Endpoint {
                    url: format!("{}{}", base_url, op.path()),
                    path: op.path(),
                    method: Method::POST,
                    requires_body: true,
                };
                (*op, endpoint)
            })
            .collect();

        Self {
            base_url,
            endpoints,
        }
    }

    /// Base URL the table was resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up an operation's endpoint
    pub fn get(&self, op: Operation) -> &Endpoint {
        // The table is built from Operation::ALL, so every key is present.
        &self.endpoints[&op]
    }

    /// Absolute URL of the OAuth token endpoint
    pub fn token_url(&self) -> String {
        format!("{}{}", self.base_url, crate::auth::TOKEN_PATH)
    }
}
