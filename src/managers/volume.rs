//! Volume Manager
//!
//! Block storage resources under `/block`:
//! - Volumes, including resize
//! - Attachments
//! - Snapshots
//! - Volume groups

use super::ResourceScope;
use crate::error::Result;
use crate::model::{
    ExtendVolumeSpec, VolumeAttachmentSpec, VolumeGroupSpec, VolumeSnapshotSpec, VolumeSpec,
};
use crate::receiver::{Method, Receiver};
use crate::urls::ListFilter;
use std::sync::Arc;
use tracing::info;

const BLOCK: &str = "block";
const VOLUMES: &str = "volumes";
const ATTACHMENTS: &str = "attachments";
const SNAPSHOTS: &str = "snapshots";
const VOLUME_GROUPS: &str = "volumeGroups";
const RESIZE: &str = "resize";

#[derive(Debug, Clone)]
pub struct VolumeMgr {
    scope: ResourceScope,
}

impl VolumeMgr {
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

    // =========================================================================
    // Volumes
    // =========================================================================

    pub async fn create_volume(&self, volume: &VolumeSpec) -> Result<VolumeSpec> {
        info!("Creating volume: {} ({} GB)", volume.name, volume.size);
        let url = self.scope.url(&[BLOCK, VOLUMES]);
        self.scope.send(Method::POST, &url, volume).await
    }

    pub async fn get_volume(&self, volume_id: &str) -> Result<VolumeSpec> {
        self.scope.get(&self.scope.url(&[BLOCK, VOLUMES, volume_id])).await
    }

    pub async fn list_volumes(&self, filter: &ListFilter) -> Result<Vec<VolumeSpec>> {
        self.scope
            .get(&self.scope.list_url(&[BLOCK, VOLUMES], filter))
            .await
    }

    pub async fn update_volume(&self, volume_id: &str, volume: &VolumeSpec) -> Result<VolumeSpec> {
        let url = self.scope.url(&[BLOCK, VOLUMES, volume_id]);
        self.scope.send(Method::PUT, &url, volume).await
    }

    pub async fn delete_volume(&self, volume_id: &str) -> Result<()> {
        info!("Deleting volume: {}", volume_id);
        let url = self.scope.url(&[BLOCK, VOLUMES, volume_id]);
        self.scope.call(Method::DELETE, &url).await
    }

    pub async fn extend_volume(
        &self,
        volume_id: &str,
        body: &ExtendVolumeSpec,
    ) -> Result<VolumeSpec> {
        info!("Extending volume {} to {} GB", volume_id, body.new_size);
        let url = self.scope.url(&[BLOCK, VOLUMES, volume_id, RESIZE]);
        self.scope.send(Method::POST, &url, body).await
    }

    // =========================================================================
    // Attachments
    // =========================================================================

    pub async fn create_attachment(
        &self,
        attachment: &VolumeAttachmentSpec,
    ) -> Result<VolumeAttachmentSpec> {
        let url = self.scope.url(&[BLOCK, ATTACHMENTS]);
        self.scope.send(Method::POST, &url, attachment).await
    }

    pub async fn get_attachment(&self, attachment_id: &str) -> Result<VolumeAttachmentSpec> {
        self.scope
            .get(&self.scope.url(&[BLOCK, ATTACHMENTS, attachment_id]))
            .await
    }

    pub async fn list_attachments(&self, filter: &ListFilter) -> Result<Vec<VolumeAttachmentSpec>> {
        self.scope
            .get(&self.scope.list_url(&[BLOCK, ATTACHMENTS], filter))
            .await
    }

    pub async fn update_attachment(
        &self,
        attachment_id: &str,
        attachment: &VolumeAttachmentSpec,
    ) -> Result<VolumeAttachmentSpec> {
        let url = self.scope.url(&[BLOCK, ATTACHMENTS, attachment_id]);
        self.scope.send(Method::PUT, &url, attachment).await
    }

    pub async fn delete_attachment(&self, attachment_id: &str) -> Result<()> {
        let url = self.scope.url(&[BLOCK, ATTACHMENTS, attachment_id]);
        self.scope.call(Method::DELETE, &url).await
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    pub async fn create_snapshot(
        &self,
        snapshot: &VolumeSnapshotSpec,
    ) -> Result<VolumeSnapshotSpec> {
        info!("Creating snapshot of volume: {}", snapshot.volume_id);
        let url = self.scope.url(&[BLOCK, SNAPSHOTS]);
        self.scope.send(Method::POST, &url, snapshot).await
    }

    pub async fn get_snapshot(&self, snapshot_id: &str) -> Result<VolumeSnapshotSpec> {
        self.scope
            .get(&self.scope.url(&[BLOCK, SNAPSHOTS, snapshot_id]))
            .await
    }

    pub async fn list_snapshots(&self, filter: &ListFilter) -> Result<Vec<VolumeSnapshotSpec>> {
        self.scope
            .get(&self.scope.list_url(&[BLOCK, SNAPSHOTS], filter))
            .await
    }

    pub async fn update_snapshot(
        &self,
        snapshot_id: &str,
        snapshot: &VolumeSnapshotSpec,
    ) -> Result<VolumeSnapshotSpec> {
        let url = self.scope.url(&[BLOCK, SNAPSHOTS, snapshot_id]);
        self.scope.send(Method::PUT, &url, snapshot).await
    }

    pub async fn delete_snapshot(&self, snapshot_id: &str) -> Result<()> {
        info!("Deleting snapshot: {}", snapshot_id);
        let url = self.scope.url(&[BLOCK, SNAPSHOTS, snapshot_id]);
        self.scope.call(Method::DELETE, &url).await
    }

    // =========================================================================
    // Volume Groups
    // =========================================================================

    pub async fn create_volume_group(&self, group: &VolumeGroupSpec) -> Result<VolumeGroupSpec> {
        let url = self.scope.url(&[BLOCK, VOLUME_GROUPS]);
        self.scope.send(Method::POST, &url, group).await
    }

    pub async fn get_volume_group(&self, group_id: &str) -> Result<VolumeGroupSpec> {
        self.scope
            .get(&self.scope.url(&[BLOCK, VOLUME_GROUPS, group_id]))
            .await
    }

    pub async fn list_volume_groups(&self, filter: &ListFilter) -> Result<Vec<VolumeGroupSpec>> {
        self.scope
            .get(&self.scope.list_url(&[BLOCK, VOLUME_GROUPS], filter))
            .await
    }

    /// Update a group; `add_volumes`/`remove_volumes` change membership
    pub async fn update_volume_group(
        &self,
        group_id: &str,
        group: &VolumeGroupSpec,
    ) -> Result<VolumeGroupSpec> {
        let url = self.scope.url(&[BLOCK, VOLUME_GROUPS, group_id]);
        self.scope.send(Method::PUT, &url, group).await
    }

    pub async fn delete_volume_group(&self, group_id: &str) -> Result<()> {
        let url = self.scope.url(&[BLOCK, VOLUME_GROUPS, group_id]);
        self.scope.call(Method::DELETE, &url).await
    }
}
