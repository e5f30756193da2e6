//! Role syncer.
//!
//! Roles have no listing of their own: they are collected from the `roles`
//! array of every member, so both `list` and `grants` drain the whole member
//! listing in one call and never hand out a continuation token.

use super::resource::{
    Annotation, Annotations, Entitlement, Grant, Profile, Resource, ResourceId, ResourceType,
    SyncPage, ROLE_MEMBER,
};
use super::syncer::{GrantProvisioner, ResourceSyncer};
use crate::errors::{DropboxResult, InvalidArgumentError};
use crate::pagination::{drain, PageToken};
use crate::services::members::{MembersApi, MembersListing};
use crate::services::roles::RolesApi;
use crate::types::{Role, RoleId, TeamMemberId};
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Build the role resource for an upstream role
pub fn role_resource(role: &Role, parent: Option<&ResourceId>) -> Resource {
    let mut profile = Profile::new();
    profile.insert("id".into(), json!(role.role_id.as_str()));
    profile.insert("name".into(), json!(role.name));
    profile.insert("description".into(), json!(role.description));

    Resource {
        id: ResourceId::new(ResourceType::Role, role.role_id.as_str()),
        display_name: role.name.clone(),
        parent_id: parent.cloned(),
        profile,
        user: None,
    }
}

fn role_entitlement(resource: &Resource) -> Entitlement {
    Entitlement::assignment(
        resource,
        ROLE_MEMBER,
        format!("{} Role {}", resource.display_name, ROLE_MEMBER),
        format!("Member of {} Dropbox role", resource.display_name),
    )
}

fn expect_member_slug(slug: &str) -> DropboxResult<()> {
    if slug != ROLE_MEMBER {
        return Err(InvalidArgumentError::UnknownEntitlement {
            slug: slug.to_string(),
            resource_kind: ResourceType::Role.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Syncer for admin roles
pub struct RoleSyncer {
    members: Arc<dyn MembersApi>,
    roles: Arc<dyn RolesApi>,
}

impl RoleSyncer {
    /// Create a role syncer
    pub fn new(members: Arc<dyn MembersApi>, roles: Arc<dyn RolesApi>) -> Self {
        Self { members, roles }
    }
}

#[async_trait]
impl ResourceSyncer for RoleSyncer {
    fn resource_type(&self) -> ResourceType {
        ResourceType::Role
    }

    #[instrument(skip(self, parent, _token))]
    async fn list(
        &self,
        parent: Option<&ResourceId>,
        _token: &PageToken,
    ) -> DropboxResult<SyncPage<Resource>> {
        let drained = drain(&MembersListing::new(self.members.clone())).await?;

        let mut seen = HashSet::new();
        let resources: Vec<Resource> = drained
            .items
            .iter()
            .flat_map(|member| member.roles.iter())
            .filter(|role| seen.insert(role.role_id.clone()))
            .map(|role| role_resource(role, parent))
            .collect();

        debug!(pages = drained.pages, roles = resources.len(), "Roles collected");
        Ok(SyncPage::last(
            resources,
            Annotations::rate_limited(drained.rate_limit),
        ))
    }

    async fn entitlements(&self, resource: &Resource) -> DropboxResult<Vec<Entitlement>> {
        resource.id.expect_kind(ResourceType::Role)?;
        Ok(vec![role_entitlement(resource)])
    }

    #[instrument(skip(self, resource, _token), fields(role_id = %resource.id.resource))]
    async fn grants(&self, resource: &Resource, _token: &PageToken) -> DropboxResult<SyncPage<Grant>> {
        let role_id = RoleId::new(resource.id.expect_kind(ResourceType::Role)?);
        let drained = drain(&MembersListing::new(self.members.clone())).await?;
        let entitlement = role_entitlement(resource);

        let grants = drained
            .items
            .iter()
            .filter(|member| member.roles.iter().any(|r| r.role_id == role_id))
            .map(|member| {
                Grant::new(
                    entitlement.clone(),
                    ResourceId::new(ResourceType::User, member.profile.team_member_id.as_str()),
                )
            })
            .collect();

        Ok(SyncPage::last(
            grants,
            Annotations::rate_limited(drained.rate_limit),
        ))
    }

    fn provisioner(&self) -> Option<&dyn GrantProvisioner> {
        Some(self)
    }
}

#[async_trait]
impl GrantProvisioner for RoleSyncer {
    #[instrument(skip_all, fields(principal = %principal.id, entitlement = %entitlement.id))]
    async fn grant(&self, principal: &Resource, entitlement: &Entitlement) -> DropboxResult<Annotations> {
        let member = TeamMemberId::new(principal.id.expect_user_principal()?);
        let role = RoleId::new(entitlement.resource.id.expect_kind(ResourceType::Role)?);
        expect_member_slug(&entitlement.slug)?;

        let outcome = self.roles.assign(&member, &role).await?;

        let mut annotations = Annotations::rate_limited(outcome.rate_limit.clone());
        if outcome.was_noop() {
            annotations.push(Annotation::GrantAlreadyExists);
        }
        Ok(annotations)
    }

    /// Clears every role of the member; the upstream cannot drop a single one.
    #[instrument(skip_all, fields(grant = %grant.id))]
    async fn revoke(&self, grant: &Grant) -> DropboxResult<Annotations> {
        let member = TeamMemberId::new(grant.principal.expect_user_principal()?);
        grant
            .entitlement
            .resource
            .id
            .expect_kind(ResourceType::Role)?;
        expect_member_slug(&grant.entitlement.slug)?;

        let outcome = self.roles.clear(&member).await?;

        let mut annotations = Annotations::rate_limited(outcome.rate_limit.clone());
        if outcome.was_noop() {
            annotations.push(Annotation::GrantAlreadyRevoked);
        }
        Ok(annotations)
    }
}
