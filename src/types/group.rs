//! Group payloads.

use super::{GroupId, Profile, Tag};
use serde::{Deserialize, Serialize};

/// Team group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Group id
    pub group_id: GroupId,
    /// Group name
    #[serde(default)]
    pub group_name: String,
    /// Who manages the group
    #[serde(default)]
    pub group_management_type: Tag,
    /// Member count, when reported
    #[serde(default)]
    pub member_count: u64,
}

/// One entry of a group-member listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    /// Member profile
    pub profile: Profile,
    /// Access level within the group
    #[serde(default)]
    pub access_type: Tag,
}

impl GroupMember {
    /// Access level, if it is one this connector understands
    pub fn access(&self) -> Option<AccessType> {
        AccessType::from_tag(self.access_type.as_str())
    }
}

/// Access level of a group member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessType {
    /// Regular member
    Member,
    /// Group owner
    Owner,
}

impl AccessType {
    /// Parse an upstream access-type tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "member" => Some(AccessType::Member),
            "owner" => Some(AccessType::Owner),
            _ => None,
        }
    }

    /// Upstream tag value
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessType::Member => "member",
            AccessType::Owner => "owner",
        }
    }

    /// As a tagged-union value
    pub fn to_tag(self) -> Tag {
        Tag::new(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_type_parsing() {
        assert_eq!(AccessType::from_tag("owner"), Some(AccessType::Owner));
        assert_eq!(AccessType::from_tag("member"), Some(AccessType::Member));
        assert_eq!(AccessType::from_tag("viewer"), None);
        assert_eq!(AccessType::from_tag(""), None);
    }
}
