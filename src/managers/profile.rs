//! Profile Manager
//!
//! Profiles and their custom properties under `/profiles`.

use super::ResourceScope;
use crate::error::Result;
use crate::model::{CustomPropertiesSpec, ProfileSpec};
use crate::receiver::{Method, Receiver};
use crate::urls::ListFilter;
use std::sync::Arc;
use tracing::info;

const PROFILES: &str = "profiles";
const CUSTOM_PROPERTIES: &str = "customProperties";

#[derive(Debug, Clone)]
pub struct ProfileMgr {
    scope: ResourceScope,
}

impl ProfileMgr {
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

    pub async fn create_profile(&self, profile: &ProfileSpec) -> Result<ProfileSpec> {
        info!("Creating profile: {}", profile.name);
        let url = self.scope.url(&[PROFILES]);
        self.scope.send(Method::POST, &url, profile).await
    }

    pub async fn get_profile(&self, profile_id: &str) -> Result<ProfileSpec> {
        self.scope.get(&self.scope.url(&[PROFILES, profile_id])).await
    }

    pub async fn list_profiles(&self, filter: &ListFilter) -> Result<Vec<ProfileSpec>> {
        self.scope.get(&self.scope.list_url(&[PROFILES], filter)).await
    }

    pub async fn update_profile(
        &self,
        profile_id: &str,
        profile: &ProfileSpec,
    ) -> Result<ProfileSpec> {
        let url = self.scope.url(&[PROFILES, profile_id]);
        self.scope.send(Method::PUT, &url, profile).await
    }

    pub async fn delete_profile(&self, profile_id: &str) -> Result<()> {
        info!("Deleting profile: {}", profile_id);
        let url = self.scope.url(&[PROFILES, profile_id]);
        self.scope.call(Method::DELETE, &url).await
    }

    /// Add or overwrite custom properties; returns the properties now set
    pub async fn add_custom_property(
        &self,
        profile_id: &str,
        properties: &CustomPropertiesSpec,
    ) -> Result<CustomPropertiesSpec> {
        let url = self.scope.url(&[PROFILES, profile_id, CUSTOM_PROPERTIES]);
        self.scope.send(Method::POST, &url, properties).await
    }

    pub async fn list_custom_properties(&self, profile_id: &str) -> Result<CustomPropertiesSpec> {
        self.scope
            .get(&self.scope.url(&[PROFILES, profile_id, CUSTOM_PROPERTIES]))
            .await
    }

    pub async fn remove_custom_property(&self, profile_id: &str, key: &str) -> Result<()> {
        let url = self.scope.url(&[PROFILES, profile_id, CUSTOM_PROPERTIES, key]);
        self.scope.call(Method::DELETE, &url).await
    }
}
