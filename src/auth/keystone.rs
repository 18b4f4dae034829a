//! Keystone Identity Authentication
//!
//! Credentials for the OpenStack identity service and the v3 token
//! exchange used by the Keystone receiver.

use crate::error::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

/// Header carrying the issued token in identity-service responses
pub const SUBJECT_TOKEN_HEADER: &str = "X-Subject-Token";

/// Header carrying the token on storage-service requests
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

// =============================================================================
// Credentials
// =============================================================================

/// Credentials for token authentication against Keystone
///
/// Either `user_id`, or `username` together with `domain_id`/`domain_name`,
/// identifies the user. The project scope is `tenant_id`, or `tenant_name`
/// within the same domain. A pre-issued `token_id` is used as-is until the
/// storage service rejects it.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeystoneAuthOptions {
    pub identity_endpoint: String,
    pub username: String,
    pub user_id: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub domain_id: String,
    pub domain_name: String,
    pub tenant_id: String,
    pub tenant_name: String,
    pub allow_reauth: bool,
    #[serde(skip_serializing)]
    pub token_id: String,
}

impl std::fmt::Debug for KeystoneAuthOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeystoneAuthOptions")
            .field("identity_endpoint", &self.identity_endpoint)
            .field("username", &self.username)
            .field("user_id", &self.user_id)
            .field("password", &redact(&self.password))
            .field("domain_id", &self.domain_id)
            .field("domain_name", &self.domain_name)
            .field("tenant_id", &self.tenant_id)
            .field("tenant_name", &self.tenant_name)
            .field("allow_reauth", &self.allow_reauth)
            .field("token_id", &redact(&self.token_id))
            .finish()
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        "<redacted>"
    }
}

impl KeystoneAuthOptions {
    /// Empty credentials; the caller fills in the fields it needs
    pub fn new() -> Self {
        Self::default()
    }

    /// Load credentials from the usual `OS_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |keys: &[&str]| {
            keys.iter()
                .find_map(|k| lookup(k).filter(|v| !v.is_empty()))
                .unwrap_or_default()
        };

        Self {
            identity_endpoint: first(&["OS_AUTH_URL"]),
            username: first(&["OS_USERNAME"]),
            user_id: first(&["OS_USERID", "OS_USER_ID"]),
            password: first(&["OS_PASSWORD"]),
            domain_id: first(&["OS_USER_DOMAIN_ID", "OS_DOMAIN_ID"]),
            domain_name: first(&["OS_USER_DOMAIN_NAME", "OS_DOMAIN_NAME"]),
            tenant_id: first(&["OS_PROJECT_ID", "OS_TENANT_ID"]),
            tenant_name: first(&["OS_PROJECT_NAME", "OS_TENANT_NAME"]),
            allow_reauth: lookup("OS_ALLOW_REAUTH").is_some_and(|v| is_truthy(&v)),
            token_id: first(&["OS_TOKEN", "OS_AUTH_TOKEN"]),
        }
    }

    /// Whether a fresh token can be requested without a pre-issued one
    pub fn has_password_credentials(&self) -> bool {
        !self.password.is_empty() && (!self.user_id.is_empty() || !self.username.is_empty())
    }

    /// Token issuing URL derived from the identity endpoint
    pub fn token_url(&self) -> Result<String> {
        let base = self.identity_endpoint.trim_end_matches('/');
        if base.is_empty() {
            return Err(Error::Configuration(
                "keystone identity endpoint is not set".into(),
            ));
        }
        if base.ends_with("/auth/tokens") {
            Ok(base.to_string())
        } else if base.ends_with("/v3") {
            Ok(format!("{}/auth/tokens", base))
        } else {
            Ok(format!("{}/v3/auth/tokens", base))
        }
    }

    /// Build the v3 `POST /auth/tokens` request body
    pub fn token_request_body(&self) -> Result<Value> {
        let identity = if self.has_password_credentials() {
            json!({
                "methods": ["password"],
                "password": { "user": self.user_ref()? },
            })
        } else if !self.token_id.is_empty() {
            json!({
                "methods": ["token"],
                "token": { "id": self.token_id },
            })
        } else {
            return Err(Error::Authentication {
                reason: "no password or token credentials provided".into(),
            });
        };

        let mut auth = json!({ "identity": identity });
        if let Some(scope) = self.scope() {
            auth["scope"] = scope;
        }
        Ok(json!({ "auth": auth }))
    }

    fn user_ref(&self) -> Result<Value> {
        if !self.user_id.is_empty() {
            return Ok(json!({ "id": self.user_id, "password": self.password }));
        }
        let domain = self.domain_ref().ok_or_else(|| Error::Authentication {
            reason: format!(
                "user '{}' requires a domain id or domain name",
                self.username
            ),
        })?;
        Ok(json!({
            "name": self.username,
            "domain": domain,
            "password": self.password,
        }))
    }

    fn domain_ref(&self) -> Option<Value> {
        if !self.domain_id.is_empty() {
            Some(json!({ "id": self.domain_id }))
        } else if !self.domain_name.is_empty() {
            Some(json!({ "name": self.domain_name }))
        } else {
            None
        }
    }

    fn scope(&self) -> Option<Value> {
        if !self.tenant_id.is_empty() {
            return Some(json!({ "project": { "id": self.tenant_id } }));
        }
        if !self.tenant_name.is_empty() {
            let mut project = json!({ "name": self.tenant_name });
            if let Some(domain) = self.domain_ref() {
                project["domain"] = domain;
            }
            return Some(json!({ "project": project }));
        }
        None
    }

    /// Exchange the credentials for a token
    pub(crate) async fn issue_token(&self, http: &reqwest::Client) -> Result<AuthToken> {
        let url = self.token_url()?;
        let body = self.token_request_body()?;

        debug!("Requesting keystone token from {}", url);

        let response = http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Authentication {
                reason: format!("identity endpoint {} unreachable: {}", url, e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                reason: format!("identity service returned HTTP {}: {}", status.as_u16(), text),
            });
        }

        let id = response
            .headers()
            .get(SUBJECT_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| Error::Authentication {
                reason: format!(
                    "identity service response lacks {} header",
                    SUBJECT_TOKEN_HEADER
                ),
            })?;

        let parsed: TokenResponse = response.json().await.map_err(|e| Error::Authentication {
            reason: format!("malformed token response: {}", e),
        })?;

        Ok(AuthToken {
            id,
            expires_at: parsed.token.expires_at,
        })
    }
}

// =============================================================================
// Tokens
// =============================================================================

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: TokenBody,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
}

/// A token issued by the identity service
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub id: String,
    /// `None` for pre-issued tokens whose lifetime is unknown
    pub expires_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthToken")
            .field("id", &redact(&self.id))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl AuthToken {
    pub fn preissued(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            expires_at: None,
        }
    }

    /// True once `now` is within `margin` of the expiry time
    pub fn is_expired_at(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        match self.expires_at {
            Some(expires_at) => now + margin >= expires_at,
            None => false,
        }
    }
}
