//! Request Dispatch
//!
//! A [`Receiver`] performs one HTTP exchange with the storage service on
//! behalf of a resource manager. Managers never see how (or whether) the
//! request is authenticated.

pub mod keystone;

pub use keystone::*;

use crate::auth::{AuthStrategy, AUTH_TOKEN_HEADER};
use crate::error::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

pub use reqwest::Method;

// =============================================================================
// Receiver Port
// =============================================================================

/// Sends a request and hands back the raw response body
///
/// Responses with status 400-599 are turned into [`Error::Api`]; an empty
/// body is a valid result for operations without content.
#[async_trait]
pub trait Receiver: Send + Sync {
    async fn recv(&self, method: Method, url: &str, body: Option<Value>) -> Result<Bytes>;

    /// Authentication strategy applied to outgoing requests
    fn strategy(&self) -> AuthStrategy;
}

// =============================================================================
// Plain Receiver
// =============================================================================

/// Receiver that passes requests through unmodified
#[derive(Debug, Clone)]
pub struct HttpReceiver {
    http: reqwest::Client,
}

impl HttpReceiver {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Default for HttpReceiver {
    fn default() -> Self {
        Self::new(build_http_client(None))
    }
}

#[async_trait]
impl Receiver for HttpReceiver {
    async fn recv(&self, method: Method, url: &str, body: Option<Value>) -> Result<Bytes> {
        send_request(&self.http, method, url, None, body.as_ref()).await
    }

    fn strategy(&self) -> AuthStrategy {
        AuthStrategy::NoAuth
    }
}

// =============================================================================
// Transport Helpers
// =============================================================================

/// Build the pooled HTTP client shared by a receiver
///
/// Never fails: if the configured builder cannot be constructed, a default
/// client is used and a warning is logged.
pub fn build_http_client(timeout: Option<Duration>) -> reqwest::Client {
    let mut builder = reqwest::Client::builder()
        .user_agent(concat!("opensds-client/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    match builder.build() {
        Ok(client) => client,
        Err(e) => {
            warn!("Failed to build configured HTTP client, using defaults: {}", e);
            reqwest::Client::new()
        }
    }
}

pub(crate) async fn send_request(
    http: &reqwest::Client,
    method: Method,
    url: &str,
    token: Option<&str>,
    body: Option<&Value>,
) -> Result<Bytes> {
    debug!("{} {}", method, url);

    let mut request = http.request(method, url).header(ACCEPT, "application/json");
    if let Some(token) = token {
        request = request.header(AUTH_TOKEN_HEADER, token);
    }
    if let Some(body) = body {
        request = request
            .header(CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(body)?);
    }

    let response = request.send().await?;
    let status = response.status();
    let bytes = response.bytes().await?;

    if status.is_client_error() || status.is_server_error() {
        debug!("Request to {} failed with HTTP {}", url, status.as_u16());
        return Err(Error::Api {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&bytes).into_owned(),
        });
    }

    Ok(bytes)
}
