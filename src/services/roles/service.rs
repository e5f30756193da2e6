//! Roles service implementation.

use super::*;
use crate::client::DropboxClient;
use crate::endpoints::Operation;
use crate::errors::DropboxResult;
use crate::services::mutation::{settle, IdempotencyTags, MutationKind, MutationOutcome};
use crate::types::{RoleId, TeamMemberId};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

/// Trait for roles service operations
#[async_trait]
pub trait RolesApi: Send + Sync {
    /// Set a member's role set to exactly one role
    async fn assign(&self, member: &TeamMemberId, role: &RoleId) -> DropboxResult<MutationOutcome>;

    /// Reset a member's role set to empty
    async fn clear(&self, member: &TeamMemberId) -> DropboxResult<MutationOutcome>;
}

/// Roles service implementation
pub struct RolesService {
    client: DropboxClient,
    idempotency: Arc<IdempotencyTags>,
}

impl RolesService {
    /// Create a new roles service
    pub fn new(client: DropboxClient, idempotency: Arc<IdempotencyTags>) -> Self {
        Self {
            client,
            idempotency,
        }
    }
}

#[async_trait]
impl RolesApi for RolesService {
    #[instrument(skip(self), fields(team_member_id = %member, role_id = %role))]
    async fn assign(&self, member: &TeamMemberId, role: &RoleId) -> DropboxResult<MutationOutcome> {
        let request = SetAdminPermissionsRequest::new(member, vec![role.clone()]);
        let result = self
            .client
            .call_discard(Operation::SetAdminPermissions, Some(&request))
            .await;
        settle(MutationKind::AddRole, &self.idempotency, result)
    }

    #[instrument(skip(self), fields(team_member_id = %member))]
    async fn clear(&self, member: &TeamMemberId) -> DropboxResult<MutationOutcome> {
        let request = SetAdminPermissionsRequest::clear(member);
        let result = self
            .client
            .call_discard(Operation::SetAdminPermissions, Some(&request))
            .await;
        settle(MutationKind::ClearRoles, &self.idempotency, result)
    }
}
