//! Replication Manager
//!
//! Replication pairs under `/block/replications`, with enable, disable
//! and failover actions.

use super::ResourceScope;
use crate::error::Result;
use crate::model::{FailoverReplicationSpec, ReplicationSpec};
use crate::receiver::{Method, Receiver};
use crate::urls::ListFilter;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

const BLOCK: &str = "block";
const REPLICATIONS: &str = "replications";

#[derive(Debug, Clone)]
pub struct ReplicationMgr {
    scope: ResourceScope,
}

impl ReplicationMgr {
    pub fn new(
        receiver: Arc<dyn Receiver>,
        endpoint: impl Into<String>,
        tenant_id: impl Into<String>,
    ) -> Self {
        Self {
            scope: ResourceScope::new(receiver, endpoint, tenant_id),
        }
    }

    pub fn scope(&self) -> &ResourceScope {
        &self.scope
    }

    pub async fn create_replication(
        &self,
        replication: &ReplicationSpec,
    ) -> Result<ReplicationSpec> {
        info!(
            "Creating replication: {} -> {}",
            replication.primary_volume_id, replication.secondary_volume_id
        );
        let url = self.scope.url(&[BLOCK, REPLICATIONS]);
        self.scope.send(Method::POST, &url, replication).await
    }

    pub async fn get_replication(&self, replication_id: &str) -> Result<ReplicationSpec> {
        self.scope
            .get(&self.scope.url(&[BLOCK, REPLICATIONS, replication_id]))
            .await
    }

    pub async fn list_replications(&self, filter: &ListFilter) -> Result<Vec<ReplicationSpec>> {
        self.scope
            .get(&self.scope.list_url(&[BLOCK, REPLICATIONS], filter))
            .await
    }

    pub async fn update_replication(
        &self,
        replication_id: &str,
        replication: &ReplicationSpec,
    ) -> Result<ReplicationSpec> {
        let url = self.scope.url(&[BLOCK, REPLICATIONS, replication_id]);
        self.scope.send(Method::PUT, &url, replication).await
    }

    pub async fn delete_replication(&self, replication_id: &str) -> Result<()> {
        info!("Deleting replication: {}", replication_id);
        let url = self.scope.url(&[BLOCK, REPLICATIONS, replication_id]);
        self.scope.call(Method::DELETE, &url).await
    }

    pub async fn enable_replication(&self, replication_id: &str) -> Result<()> {
        self.action(replication_id, "enable", json!({})).await
    }

    pub async fn disable_replication(&self, replication_id: &str) -> Result<()> {
        self.action(replication_id, "disable", json!({})).await
    }

    pub async fn failover_replication(
        &self,
        replication_id: &str,
        failover: &FailoverReplicationSpec,
    ) -> Result<()> {
        info!("Failing over replication: {}", replication_id);
        self.action(replication_id, "failover", serde_json::to_value(failover)?)
            .await
    }

    async fn action(
        &self,
        replication_id: &str,
        action: &str,
        body: serde_json::Value,
    ) -> Result<()> {
        let url = self.scope.url(&[BLOCK, REPLICATIONS, replication_id, action]);
        self.scope
            .receiver()
            .recv(Method::POST, &url, Some(body))
            .await?;
        Ok(())
    }
}
