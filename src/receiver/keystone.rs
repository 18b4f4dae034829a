//! Keystone Token Receiver
//!
//! Attaches an identity-service token to every request. The token is
//! fetched on first use, refreshed shortly before it expires and, when
//! `allow_reauth` is set, re-issued once if the storage service rejects it.

use super::{send_request, Method, Receiver};
use crate::auth::{AuthStrategy, AuthToken, KeystoneAuthOptions};
use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{Duration, Utc};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Tokens this close to expiry are replaced before use
fn expiry_margin() -> Duration {
    Duration::seconds(30)
}

/// Receiver that authenticates requests with a Keystone token
///
/// The token cache is shared by every manager of a client. Refreshes are
/// serialised by the cache lock, so concurrent callers that find the token
/// missing or expired wait for a single identity-service round trip.
pub struct KeystoneReceiver {
    options: KeystoneAuthOptions,
    http: reqwest::Client,
    token: Mutex<Option<AuthToken>>,
}

impl KeystoneReceiver {
    pub fn new(options: KeystoneAuthOptions, http: reqwest::Client) -> Self {
        let token = if options.token_id.is_empty() {
            None
        } else {
            Some(AuthToken::preissued(options.token_id.clone()))
        };

        Self {
            options,
            http,
            token: Mutex::new(token),
        }
    }

    pub fn options(&self) -> &KeystoneAuthOptions {
        &self.options
    }

    /// Current token id, fetching a new token if none is valid
    pub async fn token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref() {
            if !token.is_expired_at(Utc::now(), expiry_margin()) {
                return Ok(token.id.clone());
            }
            debug!("Keystone token expired, refreshing");
        }

        let fresh = self.options.issue_token(&self.http).await?;
        info!(
            "Obtained keystone token from {} (expires: {:?})",
            self.options.identity_endpoint, fresh.expires_at
        );

        let id = fresh.id.clone();
        *cached = Some(fresh);
        Ok(id)
    }

    /// Drop the cached token if it is still the one that was rejected
    ///
    /// A caller racing behind another caller's refresh leaves the newer
    /// token in place.
    async fn invalidate(&self, rejected: &str) {
        let mut cached = self.token.lock().await;
        if cached.as_ref().map(|t| t.id.as_str()) == Some(rejected) {
            *cached = None;
        }
    }
}

impl std::fmt::Debug for KeystoneReceiver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeystoneReceiver")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Receiver for KeystoneReceiver {
    async fn recv(&self, method: Method, url: &str, body: Option<Value>) -> Result<Bytes> {
        let token = self.token().await?;

        match send_request(&self.http, method.clone(), url, Some(&token), body.as_ref()).await {
            Err(e) if e.is_unauthorized() && self.options.allow_reauth => {
                warn!("Token rejected for {} {}, re-authenticating", method, url);
                self.invalidate(&token).await;
                let token = self.token().await?;
                send_request(&self.http, method, url, Some(&token), body.as_ref()).await
            }
            other => other,
        }
    }

    fn strategy(&self) -> AuthStrategy {
        AuthStrategy::Keystone
    }
}
