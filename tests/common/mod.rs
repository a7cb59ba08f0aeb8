//! Common test utilities

#![allow(dead_code)]

use okta_groups::api::{ApiResponse, Group, GroupApi, GroupProfile};
use okta_groups::error::{RemoteCallError, RemoteResult};
use okta_groups::ui::{main_menu, Console, LoopOptions};
use rand::rngs::StdRng;
use rand::SeedableRng;
use reqwest::StatusCode;
use std::time::Duration;

/// A remote call the fake received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(GroupProfile),
    List,
    Delete(String),
}

/// In-memory `GroupApi` that records every call.
#[derive(Debug, Default)]
pub struct FakeGroupApi {
    pub groups: Vec<Group>,
    pub calls: Vec<Call>,
    /// When set, list calls fail with this status.
    pub list_failure: Option<StatusCode>,
    /// When set, create calls fail with this status.
    pub create_failure: Option<StatusCode>,
    /// Success status returned by delete; 204 when unset.
    pub delete_status: Option<StatusCode>,
    /// When set, delete calls fail with this status.
    pub delete_failure: Option<StatusCode>,
    pub next_id: u32,
}

impl FakeGroupApi {
    pub fn with_groups(groups: Vec<Group>) -> Self {
        FakeGroupApi {
            groups,
            ..Default::default()
        }
    }

    pub fn delete_calls(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Delete(id) => Some(id.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl GroupApi for FakeGroupApi {
    fn create_group(&mut self, profile: &GroupProfile) -> RemoteResult<ApiResponse<Group>> {
        self.calls.push(Call::Create(profile.clone()));
        if let Some(status) = self.create_failure {
            return Err(rejected(status));
        }
        self.next_id += 1;
        let group = Group {
            id: format!("00gNEW{}", self.next_id),
            profile: profile.clone(),
        };
        self.groups.push(group.clone());
        Ok(ApiResponse::new(StatusCode::OK, group))
    }

    fn list_groups(&mut self) -> RemoteResult<ApiResponse<Vec<Group>>> {
        self.calls.push(Call::List);
        if let Some(status) = self.list_failure {
            return Err(rejected(status));
        }
        Ok(ApiResponse::new(StatusCode::OK, self.groups.clone()))
    }

    fn delete_group(&mut self, id: &str) -> RemoteResult<StatusCode> {
        self.calls.push(Call::Delete(id.to_string()));
        if let Some(status) = self.delete_failure {
            return Err(rejected(status));
        }
        self.groups.retain(|g| g.id != id);
        Ok(self.delete_status.unwrap_or(StatusCode::NO_CONTENT))
    }
}

pub const ERROR_BODY: &str = r#"{"errorSummary":"Invalid token provided"}"#;

fn rejected(status: StatusCode) -> RemoteCallError {
    RemoteCallError::Status {
        status,
        body: ERROR_BODY.into(),
    }
}

pub fn group(id: &str, name: &str, description: &str) -> Group {
    Group {
        id: id.into(),
        profile: GroupProfile {
            name: name.into(),
            description: Some(description.into()),
        },
    }
}

/// Options suitable for scripted runs: no spinner, no pause.
pub fn test_options() -> LoopOptions {
    LoopOptions {
        confirm_delete: true,
        retry_pause: Duration::ZERO,
        show_progress: false,
    }
}

/// Output captured from one scripted session.
pub struct Transcript {
    pub stdout: String,
    pub stderr: String,
}

/// Drive the main menu with `input` and capture both output streams.
pub fn run_script(api: &mut FakeGroupApi, input: &str, options: &LoopOptions) -> Transcript {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    {
        let mut console = Console::new(input.as_bytes(), &mut out, &mut err);
        let mut rng = StdRng::seed_from_u64(1);
        main_menu(api, &mut console, &mut rng, options).unwrap();
    }
    Transcript {
        stdout: String::from_utf8(out).unwrap(),
        stderr: String::from_utf8(err).unwrap(),
    }
}
