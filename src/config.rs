//! Configuration loading.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file. Variables already present in the environment take precedence over
//! the file.

use crate::error::{ConfigError, ConfigResult};
use reqwest::Url;
use std::path::PathBuf;
use tracing::debug;

pub const ORG_URL_VAR: &str = "OKTA_ORG_URL";
pub const CLIENT_ID_VAR: &str = "OKTA_CLIENT_ID";
pub const LEGACY_CLIENT_ID_VAR: &str = "CLIENT_ID";
pub const PRIVATE_KEY_PATH_VAR: &str = "OKTA_PRIVATE_KEY_PATH";
pub const PRIVATE_KEY_ID_VAR: &str = "OKTA_PRIVATE_KEY_ID";
pub const SEED_VAR: &str = "GROUP_NAME_SEED";

pub const DEFAULT_PRIVATE_KEY_PATH: &str = "./secrets/private.pem";

/// Scope needed for create, list and delete on groups.
pub const GROUPS_MANAGE_SCOPE: &str = "okta.groups.manage";

/// Everything needed to open an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Organization base URL without a trailing slash.
    pub org_url: String,
    pub client_id: String,
    pub private_key_path: PathBuf,
    /// Optional `kid` placed in the client assertion header.
    pub private_key_id: Option<String>,
    pub scopes: Vec<String>,
    /// Seed for the group name generator; `None` means OS entropy.
    pub rng_seed: Option<u64>,
}

impl Config {
    /// Load `.env` (if any) and read the configuration from the environment.
    pub fn from_env() -> ConfigResult<Self> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "loaded environment file"),
            Err(e) => debug!("no environment file loaded: {}", e),
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    /// Blank values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let raw_url = get(ORG_URL_VAR).ok_or(ConfigError::Missing(ORG_URL_VAR))?;
        let org_url = normalize_org_url(&raw_url)?;

        let client_id = get(CLIENT_ID_VAR)
            .or_else(|| get(LEGACY_CLIENT_ID_VAR))
            .ok_or(ConfigError::Missing(CLIENT_ID_VAR))?;

        let private_key_path = get(PRIVATE_KEY_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PRIVATE_KEY_PATH));

        let rng_seed = match get(SEED_VAR) {
            Some(value) => Some(value.parse::<u64>().map_err(|_| {
                ConfigError::InvalidNumber {
                    name: SEED_VAR,
                    value: value.clone(),
                }
            })?),
            None => None,
        };

        Ok(Config {
            org_url,
            client_id,
            private_key_path,
            private_key_id: get(PRIVATE_KEY_ID_VAR),
            scopes: vec![GROUPS_MANAGE_SCOPE.to_string()],
            rng_seed,
        })
    }

    /// OAuth token endpoint of the organization authorization server.
    pub fn token_url(&self) -> String {
        format!("{}/oauth2/v1/token", self.org_url)
    }
}

fn normalize_org_url(raw: &str) -> ConfigResult<String> {
    let invalid = || ConfigError::InvalidUrl {
        name: ORG_URL_VAR,
        value: raw.to_string(),
    };
    let url = Url::parse(raw).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid());
    }
    Ok(raw.trim_end_matches('/').to_string())
}
