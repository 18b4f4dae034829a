//! Version Manager
//!
//! API versions live at the service root and are not tenant scoped.

use super::ResourceScope;
use crate::error::Result;
use crate::model::VersionSpec;
use crate::receiver::Receiver;
use crate::urls;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct VersionMgr {
    scope: ResourceScope,
}

impl VersionMgr {
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

    pub async fn get_version(&self, name: &str) -> Result<VersionSpec> {
        self.scope
            .get(&urls::root_url(self.scope.endpoint(), &[name]))
            .await
    }

    pub async fn list_versions(&self) -> Result<Vec<VersionSpec>> {
        self.scope
            .get(&urls::root_url(self.scope.endpoint(), &[]))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::managers::testing::scope;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_versions_at_root() {
        let server = MockServer::start();
        let list = server.mock(|when, then| {
            when.method(GET).path("/");
            then.status(200)
                .json_body(json!([{"name": "v1beta", "status": "CURRENT"}]));
        });
        let get = server.mock(|when, then| {
            when.method(GET).path("/v1beta");
            then.status(200)
                .json_body(json!({"name": "v1beta", "status": "CURRENT"}));
        });

        let s = scope(&server, "t1");
        let mgr = VersionMgr::new(s.receiver().clone(), s.endpoint(), s.tenant_id());

        let versions = mgr.list_versions().await.unwrap();
        assert_eq!(versions[0].name, "v1beta");

        let version = mgr.get_version("v1beta").await.unwrap();
        assert_eq!(version.status, "CURRENT");

        list.assert();
        get.assert();
    }
}
