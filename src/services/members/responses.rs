//! Response types for the members service.

use crate::pagination::ListPage;
use crate::errors::{ProvisioningError, RateLimitInfo};
use crate::types::{MemberRecord, Profile};
use serde::Deserialize;

/// Response from `members/list_v2` and `members/list/continue_v2`
#[derive(Debug, Clone, Deserialize)]
pub struct ListMembersResponse {
    /// Cursor for the continue call
    #[serde(default)]
    pub cursor: String,
    /// Whether more pages follow
    #[serde(default)]
    pub has_more: bool,
    /// Members on this page
    #[serde(default)]
    pub members: Vec<MemberRecord>,
}

impl ListMembersResponse {
    /// Convert into a generic page
    pub fn into_page(self, rate_limit: RateLimitInfo) -> ListPage<MemberRecord> {
        ListPage {
            items: self.members,
            cursor: self.cursor,
            has_more: self.has_more,
            rate_limit,
        }
    }
}

/// Response from `members/add_v2`
#[derive(Debug, Clone, Deserialize)]
pub struct AddMembersResponse {
    /// Job status: `complete` or `async_job_id`
    #[serde(rename = ".tag", default)]
    pub tag: String,
    /// Per-member results when complete
    #[serde(default)]
    pub complete: Vec<AddMemberResult>,
}

/// Per-member result of `members/add_v2`
#[derive(Debug, Clone, Deserialize)]
pub struct AddMemberResult {
    /// `success` or a failure reason
    #[serde(rename = ".tag", default)]
    pub tag: String,
    /// Created profile on success
    #[serde(default)]
    pub profile: Option<Profile>,
}

/// Response from `members/remove`
#[derive(Debug, Clone, Deserialize)]
pub struct RemoveMemberResponse {
    /// Job status
    #[serde(rename = ".tag", default)]
    pub tag: String,
}

impl AddMembersResponse {
    /// Profile of the single invited member, failing unless it completed
    pub fn into_profile(self) -> Result<Profile, ProvisioningError> {
        let result = self
            .complete
            .into_iter()
            .next()
            .ok_or(ProvisioningError::EmptyCompletion)?;

        match (result.tag.as_str(), result.profile) {
            ("success", Some(profile)) => Ok(profile),
            ("success", None) => Err(ProvisioningError::EmptyCompletion),
            (tag, _) => Err(ProvisioningError::NotCompleted {
                tag: tag.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_response_success() {
        let response: AddMembersResponse = serde_json::from_value(json!({
            ".tag": "complete",
            "complete": [{
                ".tag": "success",
                "profile": {"team_member_id": "dbmid:9", "email": "new@example.com"}
            }]
        }))
        .unwrap();

        let profile = response.into_profile().unwrap();
        assert_eq!(profile.team_member_id.as_str(), "dbmid:9");
    }

    #[test]
    fn test_add_response_failure_tag() {
        let response: AddMembersResponse = serde_json::from_value(json!({
            ".tag": "complete",
            "complete": [{".tag": "team_license_limit", "team_license_limit": "new@example.com"}]
        }))
        .unwrap();

        match response.into_profile() {
            Err(ProvisioningError::NotCompleted { tag }) => assert_eq!(tag, "team_license_limit"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_add_response_async_job_has_no_completion() {
        let response: AddMembersResponse =
            serde_json::from_value(json!({".tag": "async_job_id", "async_job_id": "j1"})).unwrap();
        assert!(matches!(
            response.into_profile(),
            Err(ProvisioningError::EmptyCompletion)
        ));
    }
}
