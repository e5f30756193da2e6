//! Groups service implementation.

use super::*;
use crate::client::{ApiResponse, DropboxClient};
use crate::endpoints::{ListKind, ListPhase, Operation};
use crate::errors::DropboxResult;
use crate::pagination::{require_cursor, CursorListing, ListPage};
use crate::services::members::ContinueRequest;
use crate::services::mutation::{settle, IdempotencyTags, MutationKind, MutationOutcome};
use crate::types::{AccessType, Group, GroupId, GroupMember, TeamMemberId};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

/// Trait for groups service operations
#[async_trait]
pub trait GroupsApi: Send + Sync {
    /// First page of the group listing
    async fn list(&self) -> DropboxResult<ListPage<Group>>;

    /// Next page of the group listing
    async fn list_continue(&self, cursor: &str) -> DropboxResult<ListPage<Group>>;

    /// First page of a group's member listing
    async fn members(&self, group: &GroupId) -> DropboxResult<ListPage<GroupMember>>;

    /// Next page of a group's member listing
    async fn members_continue(&self, cursor: &str) -> DropboxResult<ListPage<GroupMember>>;

    /// Add a member to a group with an access level
    async fn add_member(
        &self,
        group: &GroupId,
        member: &TeamMemberId,
        access: AccessType,
    ) -> DropboxResult<MutationOutcome>;

    /// Remove a member from a group
    async fn remove_member(
        &self,
        group: &GroupId,
        member: &TeamMemberId,
    ) -> DropboxResult<MutationOutcome>;
}

/// Groups service implementation
pub struct GroupsService {
    client: DropboxClient,
    idempotency: Arc<IdempotencyTags>,
    page_limit: u32,
}

impl GroupsService {
    /// Create a new groups service
    pub fn new(client: DropboxClient, idempotency: Arc<IdempotencyTags>, page_limit: u32) -> Self {
        Self {
            client,
            idempotency,
            page_limit,
        }
    }
}

#[async_trait]
impl GroupsApi for GroupsService {
    #[instrument(skip(self), fields(limit = self.page_limit))]
    async fn list(&self) -> DropboxResult<ListPage<Group>> {
        let request = ListGroupsRequest {
            limit: self.page_limit,
        };
        let response: ApiResponse<ListGroupsResponse> = self
            .client
            .call(Operation::list(ListKind::Groups, ListPhase::Start), Some(&request))
            .await?;
        Ok(response.value.into_page(response.rate_limit))
    }

    #[instrument(skip(self, cursor))]
    async fn list_continue(&self, cursor: &str) -> DropboxResult<ListPage<Group>> {
        require_cursor(ListKind::Groups, cursor)?;
        let request = ContinueRequest { cursor };
        let response: ApiResponse<ListGroupsResponse> = self
            .client
            .call(Operation::list(ListKind::Groups, ListPhase::Continue), Some(&request))
            .await?;
        Ok(response.value.into_page(response.rate_limit))
    }

    #[instrument(skip(self), fields(group_id = %group, limit = self.page_limit))]
    async fn members(&self, group: &GroupId) -> DropboxResult<ListPage<GroupMember>> {
        let request = ListGroupMembersRequest::new(group, self.page_limit);
        let response: ApiResponse<ListGroupMembersResponse> = self
            .client
            .call(Operation::list(ListKind::GroupMembers, ListPhase::Start), Some(&request))
            .await?;
        Ok(response.value.into_page(response.rate_limit))
    }

    #[instrument(skip(self, cursor))]
    async fn members_continue(&self, cursor: &str) -> DropboxResult<ListPage<GroupMember>> {
        require_cursor(ListKind::GroupMembers, cursor)?;
        let request = ContinueRequest { cursor };
        let response: ApiResponse<ListGroupMembersResponse> = self
            .client
            .call(Operation::list(ListKind::GroupMembers, ListPhase::Continue), Some(&request))
            .await?;
        Ok(response.value.into_page(response.rate_limit))
    }

    #[instrument(skip(self), fields(group_id = %group, team_member_id = %member, access = access.as_str()))]
    async fn add_member(
        &self,
        group: &GroupId,
        member: &TeamMemberId,
        access: AccessType,
    ) -> DropboxResult<MutationOutcome> {
        let request = AddGroupMembersRequest::single(group, member, access);
        let result = self
            .client
            .call_discard(Operation::AddGroupMembers, Some(&request))
            .await;
        settle(MutationKind::AddToGroup, &self.idempotency, result)
    }

    #[instrument(skip(self), fields(group_id = %group, team_member_id = %member))]
    async fn remove_member(
        &self,
        group: &GroupId,
        member: &TeamMemberId,
    ) -> DropboxResult<MutationOutcome> {
        let request = RemoveGroupMembersRequest::single(group, member);
        let result = self
            .client
            .call_discard(Operation::RemoveGroupMembers, Some(&request))
            .await;
        settle(MutationKind::RemoveFromGroup, &self.idempotency, result)
    }
}

/// Group listing as a start / continue pair
#[derive(Clone)]
pub struct GroupsListing {
    api: Arc<dyn GroupsApi>,
}

impl GroupsListing {
    /// Wrap a groups service
    pub fn new(api: Arc<dyn GroupsApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CursorListing for GroupsListing {
    type Item = Group;

    fn kind(&self) -> ListKind {
        ListKind::Groups
    }

    async fn start(&self) -> DropboxResult<ListPage<Group>> {
        self.api.list().await
    }

    async fn resume(&self, cursor: &str) -> DropboxResult<ListPage<Group>> {
        self.api.list_continue(cursor).await
    }
}

/// Member listing of one group as a start / continue pair
#[derive(Clone)]
pub struct GroupMembersListing {
    api: Arc<dyn GroupsApi>,
    group: GroupId,
}

impl GroupMembersListing {
    /// Wrap a groups service for one group
    pub fn new(api: Arc<dyn GroupsApi>, group: GroupId) -> Self {
        Self { api, group }
    }
}

#[async_trait]
impl CursorListing for GroupMembersListing {
    type Item = GroupMember;

    fn kind(&self) -> ListKind {
        ListKind::GroupMembers
    }

    async fn start(&self) -> DropboxResult<ListPage<GroupMember>> {
        self.api.members(&self.group).await
    }

    async fn resume(&self, cursor: &str) -> DropboxResult<ListPage<GroupMember>> {
        self.api.members_continue(cursor).await
    }
}
