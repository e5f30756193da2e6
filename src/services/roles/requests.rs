//! Request types for the roles service.

use crate::types::{RoleId, TeamMemberId, UserSelector};
use serde::Serialize;

/// Body of `members/set_admin_permissions_v2`
#[derive(Debug, Clone, Serialize)]
pub struct SetAdminPermissionsRequest {
    /// Full replacement role set; empty resets to the baseline role
    pub new_roles: Vec<RoleId>,
    /// Target member
    pub user: UserSelector,
}

impl SetAdminPermissionsRequest {
    /// Replace a member's roles
    pub fn new(id: &TeamMemberId, roles: Vec<RoleId>) -> Self {
        Self {
            new_roles: roles,
            user: UserSelector::team_member(id),
        }
    }

    /// Clear a member's roles
    pub fn clear(id: &TeamMemberId) -> Self {
        Self::new(id, Vec::new())
    }
}
