//! Wire Model
//!
//! JSON shapes exchanged with the storage service. Field names follow the
//! service's camelCase convention; every field is optional on input so
//! that partial resources (for create and update calls) serialise cleanly.

pub mod dock;
pub mod profile;
pub mod replication;
pub mod volume;

pub use dock::*;
pub use profile::*;
pub use replication::*;
pub use volume::*;

use serde::{Deserialize, Serialize};

/// Fields shared by every stored resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BaseModel {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub created_at: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub updated_at: String,
}

/// An API version advertised by the service root
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VersionSpec {
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub updated_at: String,
}

pub(crate) fn is_zero(value: &i64) -> bool {
    *value == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_model_flattened_and_sparse() {
        let profile = ProfileSpec {
            name: "gold".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json, serde_json::json!({"name": "gold"}));

        let parsed: ProfileSpec = serde_json::from_str(
            r#"{"id":"p-1","createdAt":"2017-10-24T15:04:05","name":"gold","storageType":"block"}"#,
        )
        .unwrap();
        assert_eq!(parsed.base.id, "p-1");
        assert_eq!(parsed.base.created_at, "2017-10-24T15:04:05");
        assert_eq!(parsed.storage_type, "block");
    }

    #[test]
    fn test_version_spec() {
        let v: VersionSpec =
            serde_json::from_str(r#"{"name":"v1beta","status":"CURRENT","updatedAt":"2017-07-10T14:36:58.014Z"}"#)
                .unwrap();
        assert_eq!(v.name, "v1beta");
        assert_eq!(v.status, "CURRENT");
    }
}
