//! Resource Managers
//!
//! One manager per resource family. Each is built from the shared
//! receiver, the service endpoint and the tenant id, and maps its
//! operations onto REST calls. Errors from the receiver are returned
//! unchanged; managers never retry.

pub mod dock;
pub mod pool;
pub mod profile;
pub mod replication;
pub mod version;
pub mod volume;

pub use dock::*;
pub use pool::*;
pub use profile::*;
pub use replication::*;
pub use version::*;
pub use volume::*;

use crate::error::Result;
use crate::receiver::{Method, Receiver};
use crate::urls::{self, ListFilter};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

// =============================================================================
// Resource Scope
// =============================================================================

/// Receiver, endpoint and tenant a manager operates with
#[derive(Clone)]
pub struct ResourceScope {
    receiver: Arc<dyn Receiver>,
    endpoint: String,
    tenant_id: String,
}

impl ResourceScope {
    pub fn new(
        receiver: Arc<dyn Receiver>,
        endpoint: impl Into<String>,
        tenant_id: impl Into<String>,
    ) -> Self {
        Self {
            receiver,
            endpoint: endpoint.into(),
            tenant_id: tenant_id.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    pub fn receiver(&self) -> &Arc<dyn Receiver> {
        &self.receiver
    }

    pub(crate) fn url(&self, segments: &[&str]) -> String {
        urls::tenant_url(&self.endpoint, &self.tenant_id, segments)
    }

    pub(crate) fn list_url(&self, segments: &[&str], filter: &ListFilter) -> String {
        format!("{}{}", self.url(segments), filter.to_query())
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.receiver.recv(Method::GET, url, None).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Send a JSON body and decode the JSON response
    pub(crate) async fn send<B, T>(&self, method: Method, url: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let response = self.receiver.recv(method, url, Some(body)).await?;
        Ok(serde_json::from_slice(&response)?)
    }

    /// Issue a request whose response body is ignored
    pub(crate) async fn call(&self, method: Method, url: &str) -> Result<()> {
        self.receiver.recv(method, url, None).await?;
        Ok(())
    }
}

impl std::fmt::Debug for ResourceScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceScope")
            .field("strategy", &self.receiver.strategy())
            .field("endpoint", &self.endpoint)
            .field("tenant_id", &self.tenant_id)
            .finish()
    }
}
