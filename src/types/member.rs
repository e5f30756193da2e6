//! Team member payloads.

use super::{AccountId, RoleId, Tag, TeamMemberId};
use serde::{Deserialize, Serialize};

/// Member name parts
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Name {
    /// Display name
    #[serde(default)]
    pub display_name: String,
    /// Given name
    #[serde(default)]
    pub given_name: String,
    /// Surname
    #[serde(default)]
    pub surname: String,
}

/// Member profile as returned by list and add calls
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Profile {
    /// Account id
    #[serde(default)]
    pub account_id: AccountId,
    /// Team-member id
    pub team_member_id: TeamMemberId,
    /// Name parts
    #[serde(default)]
    pub name: Name,
    /// Email address
    #[serde(default)]
    pub email: String,
    /// Ids of the groups the member belongs to
    #[serde(default)]
    pub groups: Vec<String>,
    /// Membership status
    #[serde(default)]
    pub status: Tag,
}

impl Profile {
    /// Membership status mapped onto the account-status model
    pub fn user_status(&self) -> UserStatus {
        UserStatus::from_tag(self.status.as_str())
    }
}

/// Admin role held by a member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role id
    pub role_id: RoleId,
    /// Role name
    #[serde(default)]
    pub name: String,
    /// Role description
    #[serde(default)]
    pub description: String,
}

/// One entry of a member listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    /// Profile
    pub profile: Profile,
    /// Admin roles held
    #[serde(default)]
    pub roles: Vec<Role>,
}

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    /// Active or invited
    Enabled,
    /// Suspended
    Disabled,
    /// Removed from the team
    Deleted,
    /// Any other upstream status
    Unspecified,
}

impl UserStatus {
    /// Map an upstream status tag
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "active" | "invited" => UserStatus::Enabled,
            "suspended" => UserStatus::Disabled,
            "removed" => UserStatus::Deleted,
            _ => UserStatus::Unspecified,
        }
    }

    /// Stable lower-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Enabled => "enabled",
            UserStatus::Disabled => "disabled",
            UserStatus::Deleted => "deleted",
            UserStatus::Unspecified => "unspecified",
        }
    }
}
