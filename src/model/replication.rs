//! Replication resources

use super::{is_zero, BaseModel};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Replication pair between a primary and a secondary volume
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReplicationSpec {
    #[serde(flatten)]
    pub base: BaseModel,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tenant_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub primary_volume_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub secondary_volume_id: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub primary_replication_driver_data: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub secondary_replication_driver_data: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub replication_status: String,
    /// `sync` or `async`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub replication_mode: String,
    /// Interval between asynchronous copies, in minutes
    #[serde(skip_serializing_if = "is_zero")]
    pub replication_period: i64,
    #[serde(skip_serializing_if = "is_zero")]
    pub replication_bandwidth: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub availability_zone: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub profile_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pool_id: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Value>,
}

/// Body of a replication failover request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FailoverReplicationSpec {
    pub allow_attached_volume: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub secondary_backend_id: String,
}
