//! Host-facing resource, entitlement and grant model.

use crate::errors::{DropboxResult, InvalidArgumentError, RateLimitInfo};
use crate::pagination::PageToken;
use crate::types::UserStatus;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Free-form attribute map attached to resources and account requests
pub type Profile = Map<String, Value>;

/// Resource kinds synced by the connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// Team member
    User,
    /// Team group
    Group,
    /// Admin role
    Role,
}

impl ResourceType {
    /// Stable identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::User => "user",
            ResourceType::Group => "group",
            ResourceType::Role => "role",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            ResourceType::User => "User",
            ResourceType::Group => "Group",
            ResourceType::Role => "Role",
        }
    }

    /// Entitlement slugs defined for this kind
    pub fn entitlement_slugs(&self) -> &'static [&'static str] {
        match self {
            ResourceType::User => &[],
            ResourceType::Group => &[GROUP_MEMBER, GROUP_OWNER],
            ResourceType::Role => &[ROLE_MEMBER],
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Group membership entitlement
pub const GROUP_MEMBER: &str = "member";
/// Group ownership entitlement
pub const GROUP_OWNER: &str = "owner";
/// Role membership entitlement
pub const ROLE_MEMBER: &str = "member";

/// Typed resource key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId {
    /// Resource kind
    pub resource_type: ResourceType,
    /// Upstream identifier
    pub resource: String,
}

impl ResourceId {
    /// Create a resource id
    pub fn new(resource_type: ResourceType, resource: impl Into<String>) -> Self {
        Self {
            resource_type,
            resource: resource.into(),
        }
    }

    /// Fail unless this id is of the expected kind
    pub fn expect_kind(&self, expected: ResourceType) -> DropboxResult<&str> {
        if self.resource_type != expected {
            return Err(InvalidArgumentError::WrongResourceKind {
                expected: expected.to_string(),
                actual: self.resource_type.to_string(),
            }
            .into());
        }
        Ok(&self.resource)
    }

    /// Fail unless this id names a user principal
    pub fn expect_user_principal(&self) -> DropboxResult<&str> {
        if self.resource_type != ResourceType::User {
            return Err(InvalidArgumentError::WrongPrincipalKind {
                expected: ResourceType::User.to_string(),
                actual: self.resource_type.to_string(),
            }
            .into());
        }
        Ok(&self.resource)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource_type, self.resource)
    }
}

/// User-specific traits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTrait {
    /// Primary email
    pub email: String,
    /// Login name
    pub login: String,
    /// Account status
    pub status: UserStatus,
}

/// A synced resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource key
    pub id: ResourceId,
    /// Display name
    pub display_name: String,
    /// Parent resource, if any
    pub parent_id: Option<ResourceId>,
    /// Profile attributes
    pub profile: Profile,
    /// User traits, for user resources
    pub user: Option<UserTrait>,
}

/// A grantable permission on a resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entitlement {
    /// `{type}:{resource_id}:{slug}`
    pub id: String,
    /// Resource the entitlement belongs to
    pub resource: Resource,
    /// Entitlement slug
    pub slug: String,
    /// Display name
    pub display_name: String,
    /// Description
    pub description: String,
    /// Principal kinds that may hold it
    pub grantable_to: Vec<ResourceType>,
}

impl Entitlement {
    /// Assignment entitlement on a resource
    pub fn assignment(
        resource: &Resource,
        slug: &str,
        display_name: String,
        description: String,
    ) -> Self {
        Self {
            id: format!("{}:{}", resource.id, slug),
            resource: resource.clone(),
            slug: slug.to_string(),
            display_name,
            description,
            grantable_to: vec![ResourceType::User],
        }
    }
}

/// A principal holding an entitlement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grant {
    /// `{entitlement_id}:{principal}`
    pub id: String,
    /// Held entitlement
    pub entitlement: Entitlement,
    /// Holder
    pub principal: ResourceId,
}

impl Grant {
    /// Create a grant
    pub fn new(entitlement: Entitlement, principal: ResourceId) -> Self {
        Self {
            id: format!("{}:{}", entitlement.id, principal),
            entitlement,
            principal,
        }
    }
}

/// Side information returned with a result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// Rate-limit descriptor observed upstream
    RateLimit(RateLimitInfo),
    /// Grant was already in effect
    GrantAlreadyExists,
    /// Grant was already absent
    GrantAlreadyRevoked,
}

/// Ordered annotation list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Annotations(Vec<Annotation>);

impl Annotations {
    /// Empty annotation list
    pub fn new() -> Self {
        Self::default()
    }

    /// Annotation list carrying only a rate-limit descriptor
    pub fn rate_limited(rate_limit: RateLimitInfo) -> Self {
        let mut annotations = Self::new();
        annotations.push(Annotation::RateLimit(rate_limit));
        annotations
    }

    /// Append an annotation
    pub fn push(&mut self, annotation: Annotation) {
        self.0.push(annotation);
    }

    /// Whether an annotation is present
    pub fn contains(&self, annotation: &Annotation) -> bool {
        self.0.contains(annotation)
    }

    /// Rate-limit descriptor, if present
    pub fn rate_limit(&self) -> Option<&RateLimitInfo> {
        self.0.iter().find_map(|a| match a {
            Annotation::RateLimit(info) => Some(info),
            _ => None,
        })
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate annotations
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.0.iter()
    }
}

/// One page of a sync operation
#[derive(Debug, Clone)]
pub struct SyncPage<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Token for the next page; empty when done
    pub next_page_token: PageToken,
    /// Annotations
    pub annotations: Annotations,
}

impl<T> SyncPage<T> {
    /// A final page with no continuation
    pub fn last(items: Vec<T>, annotations: Annotations) -> Self {
        Self {
            items,
            next_page_token: PageToken::start(),
            annotations,
        }
    }
}
