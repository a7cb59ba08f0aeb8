// Blocking HTTP client for the Okta groups API. Every call fetches a valid
// access token first, then issues exactly one request; nothing is cached or
// retried.

use super::auth::{ClientAssertion, TokenSource};
use super::{ApiResponse, CreateGroupRequest, Group, GroupApi, GroupProfile};
use crate::config::Config;
use crate::error::{AppError, RemoteCallError, RemoteResult, Result};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Authenticated handle to the group-management API of one organization.
pub struct OktaClient {
    client: Client,
    base_url: String,
    tokens: TokenSource,
}

impl OktaClient {
    /// Session bootstrap: load the signing key, build the HTTP client and
    /// obtain the first access token so a rejected credential fails here.
    pub fn connect(config: &Config) -> Result<Self> {
        let assertion = ClientAssertion::from_config(config)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("okta-groups/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(AppError::HttpClient)?;

        let mut tokens = TokenSource::new(client.clone(), config, assertion);
        tokens.access_token()?;

        Ok(OktaClient {
            client,
            base_url: config.org_url.clone(),
            tokens,
        })
    }

    fn groups_url(&self) -> String {
        groups_url(&self.base_url)
    }

    /// Attach the bearer token and send.
    fn send(&mut self, req: RequestBuilder) -> RemoteResult<Response> {
        let token = self.tokens.access_token()?;
        let res = req
            .bearer_auth(token)
            .send()
            .map_err(RemoteCallError::Transport)?;
        debug!(status = %res.status(), url = %res.url(), "remote call finished");
        check_status(res)
    }
}

/// Collection URL of the groups API.
pub fn groups_url(base_url: &str) -> String {
    format!("{}/api/v1/groups", base_url)
}

/// URL of a single group.
pub fn group_url(base_url: &str, id: &str) -> String {
    format!("{}/{}", groups_url(base_url), id)
}

fn check_status(res: Response) -> RemoteResult<Response> {
    if res.status().is_success() {
        return Ok(res);
    }
    let status = res.status();
    let body = res.text().unwrap_or_else(|_| "".into());
    warn!(%status, "remote call rejected");
    Err(RemoteCallError::Status { status, body })
}

fn decode<T: DeserializeOwned>(res: Response) -> RemoteResult<ApiResponse<T>> {
    let status = res.status();
    let body = res.json().map_err(RemoteCallError::Decode)?;
    Ok(ApiResponse::new(status, body))
}

impl GroupApi for OktaClient {
    fn create_group(&mut self, profile: &GroupProfile) -> RemoteResult<ApiResponse<Group>> {
        let req = self
            .client
            .post(self.groups_url())
            .json(&CreateGroupRequest { profile });
        let res = self.send(req)?;
        decode(res)
    }

    fn list_groups(&mut self) -> RemoteResult<ApiResponse<Vec<Group>>> {
        let req = self.client.get(self.groups_url());
        let res = self.send(req)?;
        decode(res)
    }

    fn delete_group(&mut self, id: &str) -> RemoteResult<StatusCode> {
        let req = self.client.delete(group_url(&self.base_url, id));
        let res = self.send(req)?;
        Ok(res.status())
    }
}
