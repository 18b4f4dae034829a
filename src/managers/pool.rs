//! Pool Manager

use super::ResourceScope;
use crate::error::Result;
use crate::model::StoragePoolSpec;
use crate::receiver::Receiver;
use crate::urls::ListFilter;
use std::sync::Arc;

const POOLS: &str = "pools";

#[derive(Debug, Clone)]
pub struct PoolMgr {
    scope: ResourceScope,
}

impl PoolMgr {
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

    pub async fn get_pool(&self, pool_id: &str) -> Result<StoragePoolSpec> {
        self.scope.get(&self.scope.url(&[POOLS, pool_id])).await
    }

    pub async fn list_pools(&self, filter: &ListFilter) -> Result<Vec<StoragePoolSpec>> {
        self.scope.get(&self.scope.list_url(&[POOLS], filter)).await
    }
}
