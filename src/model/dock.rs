//! Dock and pool resources
//!
//! Docks are the storage backends registered with the controller; pools
//! are the capacity they expose. Both are read-only through the API.

use super::BaseModel;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A registered storage backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DockSpec {
    #[serde(flatten)]
    pub base: BaseModel,
    pub name: String,
    pub description: String,
    pub status: String,
    pub storage_type: String,
    pub endpoint: String,
    pub driver_name: String,
    pub metadata: BTreeMap<String, String>,
}

/// Capacity exposed by a dock
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoragePoolSpec {
    #[serde(flatten)]
    pub base: BaseModel,
    pub name: String,
    pub description: String,
    pub status: String,
    pub dock_id: String,
    pub availability_zone: String,
    /// Total capacity in GB
    pub total_capacity: i64,
    /// Free capacity in GB
    pub free_capacity: i64,
    pub storage_type: String,
    pub extras: BTreeMap<String, Value>,
}

impl StoragePoolSpec {
    /// Used capacity as a percentage of total, 0 when total is unknown
    pub fn utilization_percent(&self) -> u32 {
        if self.total_capacity <= 0 {
            return 0;
        }
        let used = (self.total_capacity - self.free_capacity).max(0);
        ((used * 100) / self.total_capacity) as u32
    }
}
