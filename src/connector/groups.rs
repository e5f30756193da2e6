//! Group syncer: groups, member/owner grants, membership changes.

use super::resource::{
    Annotation, Annotations, Entitlement, Grant, Profile, Resource, ResourceId, ResourceType,
    SyncPage, GROUP_MEMBER, GROUP_OWNER,
};
use super::syncer::{GrantProvisioner, ResourceSyncer};
use crate::errors::{DropboxResult, InvalidArgumentError};
use crate::pagination::{fetch, PageToken};
use crate::services::groups::{GroupMembersListing, GroupsApi, GroupsListing};
use crate::types::{AccessType, Group, GroupId, TeamMemberId};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Build the group resource for an upstream group
pub fn group_resource(group: &Group, parent: Option<&ResourceId>) -> Resource {
    let mut profile = Profile::new();
    profile.insert("id".into(), json!(group.group_id.as_str()));
    profile.insert("name".into(), json!(group.group_name));
    profile.insert("member_count".into(), json!(group.member_count));
    profile.insert(
        "management_type".into(),
        json!(group.group_management_type.as_str()),
    );

    Resource {
        id: ResourceId::new(ResourceType::Group, group.group_id.as_str()),
        display_name: group.group_name.clone(),
        parent_id: parent.cloned(),
        profile,
        user: None,
    }
}

fn access_for_slug(slug: &str) -> DropboxResult<AccessType> {
    match slug {
        GROUP_MEMBER => Ok(AccessType::Member),
        GROUP_OWNER => Ok(AccessType::Owner),
        other => Err(InvalidArgumentError::UnknownEntitlement {
            slug: other.to_string(),
            resource_kind: ResourceType::Group.to_string(),
        }
        .into()),
    }
}

fn slug_for_access(access: AccessType) -> &'static str {
    match access {
        AccessType::Member => GROUP_MEMBER,
        AccessType::Owner => GROUP_OWNER,
    }
}

fn group_entitlement(resource: &Resource, slug: &str) -> Entitlement {
    Entitlement::assignment(
        resource,
        slug,
        format!("{} Group {}", resource.display_name, slug),
        format!("{} of {} Dropbox group", capitalize(slug), resource.display_name),
    )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Syncer for team groups
pub struct GroupSyncer {
    groups: Arc<dyn GroupsApi>,
}

impl GroupSyncer {
    /// Create a group syncer
    pub fn new(groups: Arc<dyn GroupsApi>) -> Self {
        Self { groups }
    }
}

#[async_trait]
impl ResourceSyncer for GroupSyncer {
    fn resource_type(&self) -> ResourceType {
        ResourceType::Group
    }

    #[instrument(skip(self, parent), fields(token = %token))]
    async fn list(
        &self,
        parent: Option<&ResourceId>,
        token: &PageToken,
    ) -> DropboxResult<SyncPage<Resource>> {
        let listing = GroupsListing::new(self.groups.clone());
        let page = fetch(&listing, token).await?;

        Ok(SyncPage {
            items: page.items.iter().map(|g| group_resource(g, parent)).collect(),
            next_page_token: page.next_token(),
            annotations: Annotations::rate_limited(page.rate_limit),
        })
    }

    async fn entitlements(&self, resource: &Resource) -> DropboxResult<Vec<Entitlement>> {
        resource.id.expect_kind(ResourceType::Group)?;
        Ok(ResourceType::Group
            .entitlement_slugs()
            .iter()
            .map(|slug| group_entitlement(resource, slug))
            .collect())
    }

    #[instrument(skip(self, resource), fields(group_id = %resource.id.resource, token = %token))]
    async fn grants(&self, resource: &Resource, token: &PageToken) -> DropboxResult<SyncPage<Grant>> {
        let group_id = GroupId::new(resource.id.expect_kind(ResourceType::Group)?);
        let listing = GroupMembersListing::new(self.groups.clone(), group_id);
        let page = fetch(&listing, token).await?;

        let mut grants = Vec::with_capacity(page.items.len());
        for member in &page.items {
            let Some(access) = member.access() else {
                debug!(
                    team_member_id = %member.profile.team_member_id,
                    access_type = member.access_type.as_str(),
                    "Skipping unknown access type"
                );
                continue;
            };
            let principal = ResourceId::new(
                ResourceType::User,
                member.profile.team_member_id.as_str(),
            );
            grants.push(Grant::new(
                group_entitlement(resource, slug_for_access(access)),
                principal,
            ));
        }

        Ok(SyncPage {
            items: grants,
            next_page_token: page.next_token(),
            annotations: Annotations::rate_limited(page.rate_limit),
        })
    }

    fn provisioner(&self) -> Option<&dyn GrantProvisioner> {
        Some(self)
    }
}

#[async_trait]
impl GrantProvisioner for GroupSyncer {
    #[instrument(skip_all, fields(principal = %principal.id, entitlement = %entitlement.id))]
    async fn grant(&self, principal: &Resource, entitlement: &Entitlement) -> DropboxResult<Annotations> {
        let member = TeamMemberId::new(principal.id.expect_user_principal()?);
        let group = GroupId::new(entitlement.resource.id.expect_kind(ResourceType::Group)?);
        let access = access_for_slug(&entitlement.slug)?;

        let outcome = self.groups.add_member(&group, &member, access).await?;

        let mut annotations = Annotations::rate_limited(outcome.rate_limit.clone());
        if outcome.was_noop() {
            annotations.push(Annotation::GrantAlreadyExists);
        }
        Ok(annotations)
    }

    #[instrument(skip_all, fields(grant = %grant.id))]
    async fn revoke(&self, grant: &Grant) -> DropboxResult<Annotations> {
        let member = TeamMemberId::new(grant.principal.expect_user_principal()?);
        let group = GroupId::new(
            grant
                .entitlement
                .resource
                .id
                .expect_kind(ResourceType::Group)?,
        );
        access_for_slug(&grant.entitlement.slug)?;

        let outcome = self.groups.remove_member(&group, &member).await?;

        let mut annotations = Annotations::rate_limited(outcome.rate_limit.clone());
        if outcome.was_noop() {
            annotations.push(Annotation::GrantAlreadyRevoked);
        }
        Ok(annotations)
    }
}
