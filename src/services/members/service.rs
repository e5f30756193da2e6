//! Members service implementation.

use super::*;
use crate::client::{ApiResponse, DropboxClient};
use crate::endpoints::{ListKind, ListPhase, Operation};
use crate::errors::{DropboxResult, ResponseError};
use crate::pagination::{require_cursor, CursorListing, ListPage};
use crate::services::mutation::{settle, IdempotencyTags, MutationKind, MutationOutcome};
use crate::types::{MemberRecord, TeamMemberId};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

/// Trait for members service operations
#[async_trait]
pub trait MembersApi: Send + Sync {
    /// First page of the member listing, removed members included
    async fn list(&self) -> DropboxResult<ListPage<MemberRecord>>;

    /// Next page of the member listing
    async fn list_continue(&self, cursor: &str) -> DropboxResult<ListPage<MemberRecord>>;

    /// Invite a member by email
    async fn add(&self, email: &str) -> DropboxResult<ApiResponse<AddMembersResponse>>;

    /// Remove a member from the team
    async fn remove(&self, id: &TeamMemberId) -> DropboxResult<ApiResponse<RemoveMemberResponse>>;

    /// Suspend a member
    async fn suspend(&self, id: &TeamMemberId) -> DropboxResult<MutationOutcome>;

    /// Reactivate a suspended member
    async fn unsuspend(&self, id: &TeamMemberId) -> DropboxResult<MutationOutcome>;
}

/// Members service implementation
pub struct MembersService {
    client: DropboxClient,
    idempotency: Arc<IdempotencyTags>,
    page_limit: u32,
}

impl MembersService {
    /// Create a new members service
    pub fn new(client: DropboxClient, idempotency: Arc<IdempotencyTags>, page_limit: u32) -> Self {
        Self {
            client,
            idempotency,
            page_limit,
        }
    }
}

#[async_trait]
impl MembersApi for MembersService {
    #[instrument(skip(self), fields(limit = self.page_limit))]
    async fn list(&self) -> DropboxResult<ListPage<MemberRecord>> {
        let request = ListMembersRequest::new(self.page_limit);
        let response: ApiResponse<ListMembersResponse> = self
            .client
            .call(Operation::list(ListKind::Members, ListPhase::Start), Some(&request))
            .await?;
        Ok(response.value.into_page(response.rate_limit))
    }

    #[instrument(skip(self, cursor))]
    async fn list_continue(&self, cursor: &str) -> DropboxResult<ListPage<MemberRecord>> {
        require_cursor(ListKind::Members, cursor)?;
        let request = ContinueRequest { cursor };
        let response: ApiResponse<ListMembersResponse> = self
            .client
            .call(Operation::list(ListKind::Members, ListPhase::Continue), Some(&request))
            .await?;
        Ok(response.value.into_page(response.rate_limit))
    }

    #[instrument(skip(self, email))]
    async fn add(&self, email: &str) -> DropboxResult<ApiResponse<AddMembersResponse>> {
        let request = AddMembersRequest::single(email);
        self.client.call(Operation::AddMember, Some(&request)).await
    }

    #[instrument(skip(self), fields(team_member_id = %id))]
    async fn remove(&self, id: &TeamMemberId) -> DropboxResult<ApiResponse<RemoveMemberResponse>> {
        let request = MemberActionRequest::new(id);
        let response: ApiResponse<RemoveMemberResponse> =
            self.client.call(Operation::RemoveMember, Some(&request)).await?;

        if response.value.tag.is_empty() {
            return Err(ResponseError::Unexpected {
                message: "empty response from remove member".to_string(),
            }
            .into());
        }
        Ok(response)
    }

    #[instrument(skip(self), fields(team_member_id = %id))]
    async fn suspend(&self, id: &TeamMemberId) -> DropboxResult<MutationOutcome> {
        let request = MemberActionRequest::new(id);
        let result = self
            .client
            .call_discard(Operation::SuspendMember, Some(&request))
            .await;
        settle(MutationKind::Suspend, &self.idempotency, result)
    }

    #[instrument(skip(self), fields(team_member_id = %id))]
    async fn unsuspend(&self, id: &TeamMemberId) -> DropboxResult<MutationOutcome> {
        let request = MemberActionRequest::new(id);
        let result = self
            .client
            .call_discard(Operation::UnsuspendMember, Some(&request))
            .await;
        settle(MutationKind::Unsuspend, &self.idempotency, result)
    }
}

/// Member listing as a start / continue pair
#[derive(Clone)]
pub struct MembersListing {
    api: Arc<dyn MembersApi>,
}

impl MembersListing {
    /// Wrap a members service
    pub fn new(api: Arc<dyn MembersApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CursorListing for MembersListing {
    type Item = MemberRecord;

    fn kind(&self) -> ListKind {
        ListKind::Members
    }

    async fn start(&self) -> DropboxResult<ListPage<MemberRecord>> {
        self.api.list().await
    }

    async fn resume(&self, cursor: &str) -> DropboxResult<ListPage<MemberRecord>> {
        self.api.list_continue(cursor).await
    }
}

