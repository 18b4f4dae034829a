//! Dock Manager

use super::ResourceScope;
use crate::error::Result;
use crate::model::DockSpec;
use crate::receiver::Receiver;
use crate::urls::ListFilter;
use std::sync::Arc;

const DOCKS: &str = "docks";

#[derive(Debug, Clone)]
pub struct DockMgr {
    scope: ResourceScope,
}

impl DockMgr {
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

    pub async fn get_dock(&self, dock_id: &str) -> Result<DockSpec> {
        self.scope.get(&self.scope.url(&[DOCKS, dock_id])).await
    }

    pub async fn list_docks(&self, filter: &ListFilter) -> Result<Vec<DockSpec>> {
        self.scope.get(&self.scope.list_url(&[DOCKS], filter)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::managers::testing::scope;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_and_list_docks() {
        let server = MockServer::start();
        let get = server.mock(|when, then| {
            when.method(GET).path("/v1beta/t1/docks/d-1");
            then.status(200).json_body(json!({
                "id": "d-1",
                "name": "sample",
                "endpoint": "localhost:50050",
                "driverName": "lvm"
            }));
        });
        let list = server.mock(|when, then| {
            when.method(GET).path("/v1beta/t1/docks");
            then.status(200).json_body(json!([{"id": "d-1"}, {"id": "d-2"}]));
        });

        let s = scope(&server, "t1");
        let mgr = DockMgr::new(s.receiver().clone(), s.endpoint(), s.tenant_id());

        let dock = mgr.get_dock("d-1").await.unwrap();
        assert_eq!(dock.driver_name, "lvm");

        let docks = mgr.list_docks(&ListFilter::new()).await.unwrap();
        assert_eq!(docks.len(), 2);

        get.assert();
        list.assert();
    }
}
