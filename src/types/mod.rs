//! Common types for the team administration API.
//!
//! Defines identifiers, tagged-union selectors and the entity payloads shared
//! across services.

use serde::{Deserialize, Serialize};

pub mod group;
pub mod member;

pub use group::*;
pub use member::*;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create a new identifier
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the identifier is empty
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id!(
    /// Stable team-scoped member identifier (`dbmid:...`)
    TeamMemberId
);
string_id!(
    /// Account identifier (`dbid:...`)
    AccountId
);
string_id!(
    /// Group identifier (`g:...`)
    GroupId
);
string_id!(
    /// Admin role identifier (`pid_dbtmr:...`)
    RoleId
);

/// Bare tagged-union value: `{".tag": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tag {
    /// Discriminator
    #[serde(rename = ".tag", default)]
    pub tag: String,
}

impl Tag {
    /// Create a tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    /// Get the tag as a string slice
    pub fn as_str(&self) -> &str {
        &self.tag
    }
}

/// Member selector: `{".tag": "team_member_id", "team_member_id": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum UserSelector {
    /// Select by team-member id
    TeamMemberId {
        /// Team-member id
        team_member_id: TeamMemberId,
    },
    /// Select by email
    Email {
        /// Email address
        email: String,
    },
}

impl UserSelector {
    /// Select a member by team-member id
    pub fn team_member(id: &TeamMemberId) -> Self {
        Self::TeamMemberId {
            team_member_id: id.clone(),
        }
    }
}

/// Group selector: `{".tag": "group_id", "group_id": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
pub enum GroupSelector {
    /// Select by group id
    GroupId {
        /// Group id
        group_id: GroupId,
    },
}

impl GroupSelector {
    /// Select a group by id
    pub fn id(id: &GroupId) -> Self {
        Self::GroupId {
            group_id: id.clone(),
        }
    }
}
