// Remote API module: the group data model, the `GroupApi` seam used by the
// menu, and the blocking Okta implementation behind it.

pub mod auth;
pub mod client;

pub use client::OktaClient;

use crate::error::RemoteResult;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Profile attributes of a group. This is both what a create call sends and
/// what the create report prints back.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GroupProfile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A remote group. The id is assigned by the identity platform; other fields
/// of the remote representation are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: String,
    pub profile: GroupProfile,
}

impl Group {
    pub fn name(&self) -> &str {
        &self.profile.name
    }

    /// Description, or an empty string when the group has none.
    pub fn description(&self) -> &str {
        self.profile.description.as_deref().unwrap_or("")
    }
}

/// Request body of a create call.
#[derive(Serialize, Debug)]
pub struct CreateGroupRequest<'a> {
    pub profile: &'a GroupProfile,
}

/// Status of a remote call together with its decoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse<T> {
    pub status: StatusCode,
    pub body: T,
}

impl<T> ApiResponse<T> {
    pub fn new(status: StatusCode, body: T) -> Self {
        ApiResponse { status, body }
    }
}

/// The three group operations the menu drives. Implemented over HTTP by
/// [`OktaClient`]; tests substitute a recording fake.
pub trait GroupApi {
    fn create_group(&mut self, profile: &GroupProfile) -> RemoteResult<ApiResponse<Group>>;

    /// First page of groups, no filter.
    fn list_groups(&mut self) -> RemoteResult<ApiResponse<Vec<Group>>>;

    fn delete_group(&mut self, id: &str) -> RemoteResult<StatusCode>;
}
