//! OpenSDS Client
//!
//! An async client for the OpenSDS storage orchestration API.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                                 Client                                       │
//! ├─────────────────────────────────────────────────────────────────────────────┤
//! │  ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────┐  │
//! │  │ Profile  │ │   Dock   │ │   Pool   │ │  Volume  │ │ Version  │ │Repli-│  │
//! │  │   Mgr    │ │   Mgr    │ │   Mgr    │ │   Mgr    │ │   Mgr    │ │cation│  │
//! │  └────┬─────┘ └────┬─────┘ └────┬─────┘ └────┬─────┘ └────┬─────┘ └──┬───┘  │
//! │       └────────────┴────────────┼────────────┴────────────┴──────────┘      │
//! │                                 │                                            │
//! │                     ┌───────────┴───────────┐                                │
//! │                     │   Receiver (shared)   │                                │
//! │                     └───────────┬───────────┘                                │
//! ├─────────────────────────────────┼───────────────────────────────────────────┤
//! │        ┌────────────────────────┴─────────────────────────┐                  │
//! │  ┌─────┴───────────┐                          ┌───────────┴─────────────┐    │
//! │  │  HttpReceiver   │                          │   KeystoneReceiver      │    │
//! │  │    (noauth)     │                          │ (token cache + reauth)  │    │
//! │  └─────────────────┘                          └─────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`client`]: Client assembly and auth-strategy selection
//! - [`config`]: Configuration and construction defaults
//! - [`auth`]: NoAuth and Keystone options
//! - [`receiver`]: Request dispatch with and without tokens
//! - [`managers`]: Per-resource managers
//! - [`model`]: Wire types
//! - [`urls`]: URL generation and list filters
//! - [`error`]: Error types and handling

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod managers;
pub mod model;
pub mod receiver;
pub mod urls;

// Re-export commonly used types
pub use auth::{AuthOptions, AuthStrategy, AuthToken, KeystoneAuthOptions, NoAuthOptions};

pub use client::Client;

pub use config::{ClientDefaults, Config, DEFAULT_ENDPOINT, DEFAULT_TENANT_ID};

pub use error::{Error, Result};

pub use managers::{
    DockMgr, PoolMgr, ProfileMgr, ReplicationMgr, ResourceScope, VersionMgr, VolumeMgr,
};

pub use model::{
    BaseModel, ConnectionInfo, CustomPropertiesSpec, DockSpec, ExtendVolumeSpec,
    FailoverReplicationSpec, HostInfo, ProfileSpec, ReplicationSpec, StoragePoolSpec,
    VersionSpec, VolumeAttachmentSpec, VolumeGroupSpec, VolumeSnapshotSpec, VolumeSpec,
};

pub use receiver::{HttpReceiver, KeystoneReceiver, Method, Receiver};

pub use urls::{ListFilter, SortDir};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
