// OAuth client-credentials flow with a private_key_jwt client assertion.
// The assertion is an RS256 JWT signed with the service app's private key and
// exchanged at the org authorization server for a scoped access token.

use crate::config::Config;
use crate::error::{AuthError, ConfigError, ConfigResult};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use uuid::Uuid;

pub const CLIENT_ASSERTION_TYPE: &str = "urn:ietf:params:oauth:client-assertion-type:jwt-bearer";

/// Lifetime of a signed assertion. The authorization server rejects
/// assertions valid for more than an hour.
const ASSERTION_LIFETIME_SECS: u64 = 60 * 60;

/// Tokens are refreshed this long before they actually expire.
const EXPIRY_MARGIN: Duration = Duration::from_secs(30);

/// Claims of the client assertion JWT.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AssertionClaims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub iat: u64,
    pub exp: u64,
    pub jti: String,
}

impl AssertionClaims {
    pub fn new(client_id: &str, audience: &str, now: u64) -> Self {
        AssertionClaims {
            iss: client_id.to_string(),
            sub: client_id.to_string(),
            aud: audience.to_string(),
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// Signs client assertions with the configured private key.
pub struct ClientAssertion {
    client_id: String,
    audience: String,
    key: EncodingKey,
    key_id: Option<String>,
}

impl ClientAssertion {
    /// Read and parse the PEM key named by the configuration.
    pub fn from_config(config: &Config) -> ConfigResult<Self> {
        let path = &config.private_key_path;
        let pem = std::fs::read(path).map_err(|error| ConfigError::KeyUnreadable {
            path: path.clone(),
            error,
        })?;
        let key = EncodingKey::from_rsa_pem(&pem).map_err(|error| ConfigError::KeyInvalid {
            path: path.clone(),
            error,
        })?;
        Ok(ClientAssertion {
            client_id: config.client_id.clone(),
            audience: config.token_url(),
            key,
            key_id: config.private_key_id.clone(),
        })
    }

    pub fn sign(&self, now: u64) -> Result<String, AuthError> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key_id.clone();
        let claims = AssertionClaims::new(&self.client_id, &self.audience, now);
        Ok(jsonwebtoken::encode(&header, &claims, &self.key)?)
    }
}

/// Form fields of the token request.
pub fn token_form(assertion: &str, scopes: &[String]) -> Vec<(&'static str, String)> {
    vec![
        ("grant_type", "client_credentials".to_string()),
        ("scope", scopes.join(" ")),
        ("client_assertion_type", CLIENT_ASSERTION_TYPE.to_string()),
        ("client_assertion", assertion.to_string()),
    ]
}

/// Successful response of the token endpoint.
#[derive(Deserialize, Debug)]
pub struct TokenResponse {
    pub token_type: String,
    pub access_token: String,
    pub expires_in: u64,
    #[serde(default)]
    pub scope: Option<String>,
}

/// An access token and the instant it stops being usable.
#[derive(Debug, Clone)]
pub struct AccessToken {
    value: String,
    expires_at: Instant,
}

impl AccessToken {
    /// A lifetime too large to represent leaves the token already expired,
    /// so the next call fetches a new one.
    pub fn from_response(response: TokenResponse, issued_at: Instant) -> Self {
        let expires_at = issued_at
            .checked_add(Duration::from_secs(response.expires_in))
            .unwrap_or(issued_at);
        AccessToken {
            value: response.access_token,
            expires_at,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now + EXPIRY_MARGIN >= self.expires_at
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Hands out a valid access token, fetching a new one when the current one
/// has expired.
pub struct TokenSource {
    http: Client,
    token_url: String,
    scopes: Vec<String>,
    assertion: ClientAssertion,
    current: Option<AccessToken>,
}

impl TokenSource {
    pub fn new(http: Client, config: &Config, assertion: ClientAssertion) -> Self {
        TokenSource {
            http,
            token_url: config.token_url(),
            scopes: config.scopes.clone(),
            assertion,
            current: None,
        }
    }

    pub fn access_token(&mut self) -> Result<String, AuthError> {
        if let Some(token) = &self.current {
            if !token.is_expired(Instant::now()) {
                return Ok(token.value().to_string());
            }
            debug!("access token expired, requesting a new one");
        }
        let token = self.fetch()?;
        let value = token.value().to_string();
        self.current = Some(token);
        Ok(value)
    }

    fn fetch(&self) -> Result<AccessToken, AuthError> {
        let assertion = self.assertion.sign(jsonwebtoken::get_current_timestamp())?;
        let issued_at = Instant::now();
        let res = self
            .http
            .post(&self.token_url)
            .form(&token_form(&assertion, &self.scopes))
            .send()
            .map_err(AuthError::Transport)?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().unwrap_or_else(|_| "".into());
            return Err(AuthError::Rejected { status, body });
        }
        let response: TokenResponse = res.json().map_err(AuthError::Decode)?;
        info!(
            token_type = %response.token_type,
            expires_in = response.expires_in,
            scope = response.scope.as_deref().unwrap_or(""),
            "obtained access token"
        );
        Ok(AccessToken::from_response(response, issued_at))
    }
}
