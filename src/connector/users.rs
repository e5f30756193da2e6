//! User syncer: team members, account provisioning and deprovisioning.

use super::resource::{
    Annotations, Entitlement, Grant, Profile, Resource, ResourceId, ResourceType, SyncPage,
    UserTrait,
};
use super::syncer::{AccountManager, CreatedAccount, ResourceSyncer};
use crate::errors::{DropboxResult, InvalidArgumentError};
use crate::pagination::{fetch, PageToken};
use crate::services::members::{MembersApi, MembersListing};
use crate::types::{self, TeamMemberId};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Build the user resource for a member profile
pub fn user_resource(profile: &types::Profile, parent: Option<&ResourceId>) -> Resource {
    let status = profile.user_status();

    let mut attributes = Profile::new();
    attributes.insert("id".into(), json!(profile.account_id.as_str()));
    attributes.insert("email".into(), json!(profile.email));
    attributes.insert("first_name".into(), json!(profile.name.given_name));
    attributes.insert("last_name".into(), json!(profile.name.surname));
    attributes.insert("team_member_id".into(), json!(profile.team_member_id.as_str()));
    attributes.insert("status".into(), json!(profile.status.as_str()));

    Resource {
        id: ResourceId::new(ResourceType::User, profile.team_member_id.as_str()),
        display_name: profile.email.clone(),
        parent_id: parent.cloned(),
        profile: attributes,
        user: Some(UserTrait {
            email: profile.email.clone(),
            login: profile.email.clone(),
            status,
        }),
    }
}

/// Syncer for team members
pub struct UserSyncer {
    members: Arc<dyn MembersApi>,
}

impl UserSyncer {
    /// Create a user syncer
    pub fn new(members: Arc<dyn MembersApi>) -> Self {
        Self { members }
    }
}

#[async_trait]
impl ResourceSyncer for UserSyncer {
    fn resource_type(&self) -> ResourceType {
        ResourceType::User
    }

    #[instrument(skip(self, parent), fields(token = %token))]
    async fn list(
        &self,
        parent: Option<&ResourceId>,
        token: &PageToken,
    ) -> DropboxResult<SyncPage<Resource>> {
        let listing = MembersListing::new(self.members.clone());
        let page = fetch(&listing, token).await?;
        let next_page_token = page.next_token();

        let items = page
            .items
            .iter()
            .map(|member| user_resource(&member.profile, parent))
            .collect();

        Ok(SyncPage {
            items,
            next_page_token,
            annotations: Annotations::rate_limited(page.rate_limit),
        })
    }

    async fn entitlements(&self, _resource: &Resource) -> DropboxResult<Vec<Entitlement>> {
        Ok(Vec::new())
    }

    async fn grants(&self, _resource: &Resource, _token: &PageToken) -> DropboxResult<SyncPage<Grant>> {
        Ok(SyncPage::last(Vec::new(), Annotations::new()))
    }

    fn account_manager(&self) -> Option<&dyn AccountManager> {
        Some(self)
    }
}

#[async_trait]
impl AccountManager for UserSyncer {
    #[instrument(skip_all)]
    async fn create_account(&self, profile: &Profile) -> DropboxResult<CreatedAccount> {
        let email = match profile.get("email") {
            Some(Value::String(email)) if !email.trim().is_empty() => email.trim(),
            _ => {
                return Err(InvalidArgumentError::MissingField {
                    field: "email".to_string(),
                }
                .into())
            }
        };

        let response = self.members.add(email).await.inspect_err(|e| {
            warn!(error = %e, "Failed to create user");
        })?;
        let created = response.value.into_profile()?;
        debug!(team_member_id = %created.team_member_id, "User created");

        Ok(CreatedAccount {
            resource: user_resource(&created, None),
            annotations: Annotations::rate_limited(response.rate_limit),
        })
    }

    #[instrument(skip(self), fields(resource = %id))]
    async fn delete(&self, id: &ResourceId) -> DropboxResult<Annotations> {
        let team_member_id = TeamMemberId::new(id.expect_kind(ResourceType::User)?);

        let response = self.members.remove(&team_member_id).await.inspect_err(|e| {
            warn!(error = %e, %team_member_id, "Failed to delete user");
        })?;

        Ok(Annotations::rate_limited(response.rate_limit))
    }
}
