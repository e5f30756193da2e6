//! Idempotent mutation outcomes.
//!
//! The upstream answers repeat mutations (adding an existing member, removing
//! an absent one) with a 409 or 404 whose `.tag` names the condition. Those
//! tags are matched against a per-mutation allow-list and turned into an
//! [`MutationState::AlreadyInDesiredState`] outcome instead of an error.

use crate::errors::{DropboxError, DropboxResult, RateLimitInfo};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Mutations with idempotent-equivalent upstream errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// Add a member to a group
    AddToGroup,
    /// Remove a member from a group
    RemoveFromGroup,
    /// Assign admin roles to a member
    AddRole,
    /// Clear a member's admin roles
    ClearRoles,
    /// Suspend a member
    Suspend,
    /// Reactivate a suspended member
    Unsuspend,
}

impl MutationKind {
    /// All mutation kinds
    pub const ALL: [MutationKind; 6] = [
        MutationKind::AddToGroup,
        MutationKind::RemoveFromGroup,
        MutationKind::AddRole,
        MutationKind::ClearRoles,
        MutationKind::Suspend,
        MutationKind::Unsuspend,
    ];

    fn default_tags(&self) -> &'static [&'static str] {
        match self {
            MutationKind::AddToGroup => &["duplicate_user"],
            MutationKind::RemoveFromGroup => &["members_not_in_group", "users_not_found"],
            MutationKind::AddRole => &["duplicate_user", "user_already_has_role"],
            MutationKind::ClearRoles => &["user_not_found", "user_not_in_team"],
            MutationKind::Suspend => &["suspend_inactive_user"],
            MutationKind::Unsuspend => &["unsuspend_non_suspended_member"],
        }
    }
}

/// Per-mutation allow-list of "already in desired state" tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdempotencyTags {
    tags: HashMap<MutationKind, HashSet<String>>,
}

impl Default for IdempotencyTags {
    fn default() -> Self {
        let tags = MutationKind::ALL
            .iter()
            .map(|kind| {
                let set = kind.default_tags().iter().map(|t| t.to_string()).collect();
                (*kind, set)
            })
            .collect();
        Self { tags }
    }
}

impl IdempotencyTags {
    /// An allow-list with no tags at all
    pub fn empty() -> Self {
        Self {
            tags: HashMap::new(),
        }
    }

    /// Replace the tag set for one mutation kind
    pub fn set<I, S>(&mut self, kind: MutationKind, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags
            .insert(kind, tags.into_iter().map(Into::into).collect());
    }

    /// Whether a tag is allow-listed for a mutation kind
    pub fn contains(&self, kind: MutationKind, tag: &str) -> bool {
        self.tags.get(&kind).is_some_and(|set| set.contains(tag))
    }

    /// Whether an error means the mutation's end state already holds
    pub fn is_idempotent(&self, kind: MutationKind, err: &DropboxError) -> bool {
        let DropboxError::Api(api) = err.root() else {
            return false;
        };
        api.is_conflict_or_not_found()
            && api.tag.as_deref().is_some_and(|tag| self.contains(kind, tag))
    }
}

/// Whether a mutation changed upstream state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationState {
    /// The upstream applied the change
    Applied,
    /// The upstream reported the end state was already in effect
    AlreadyInDesiredState,
}

/// Result of an idempotent mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    /// Whether anything changed
    pub state: MutationState,
    /// Rate-limit descriptor of the call
    pub rate_limit: RateLimitInfo,
    /// Upstream tag that signalled the end state, if any
    pub upstream_tag: Option<String>,
}

impl MutationOutcome {
    /// Outcome of a successful call
    pub fn applied(rate_limit: RateLimitInfo) -> Self {
        Self {
            state: MutationState::Applied,
            rate_limit,
            upstream_tag: None,
        }
    }

    /// Whether the end state already held before the call
    pub fn was_noop(&self) -> bool {
        self.state == MutationState::AlreadyInDesiredState
    }
}

/// Fold a mutation call result into an outcome, absorbing allow-listed errors
pub fn settle(
    kind: MutationKind,
    tags: &IdempotencyTags,
    result: DropboxResult<RateLimitInfo>,
) -> DropboxResult<MutationOutcome> {
    match result {
        Ok(rate_limit) => Ok(MutationOutcome::applied(rate_limit)),
        Err(err) if tags.is_idempotent(kind, &err) => {
            let upstream_tag = err.upstream_tag().map(String::from);
            debug!(?kind, tag = ?upstream_tag, "End state already in effect");
            Ok(MutationOutcome {
                state: MutationState::AlreadyInDesiredState,
                rate_limit: err.rate_limit().cloned().unwrap_or_default(),
                upstream_tag,
            })
        }
        Err(err) => Err(err),
    }
}
