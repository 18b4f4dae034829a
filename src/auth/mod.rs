//! Authentication Options
//!
//! Selects how requests to the storage service are authenticated:
//! - NoAuth: requests go out unmodified, scoped to a fixed tenant
//! - Keystone: requests carry an identity-service token

pub mod keystone;

pub use keystone::*;

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// =============================================================================
// Auth Strategy
// =============================================================================

/// Authentication strategy names, as used in configuration and environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthStrategy {
    NoAuth,
    Keystone,
}

impl std::fmt::Display for AuthStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthStrategy::NoAuth => write!(f, "noauth"),
            AuthStrategy::Keystone => write!(f, "keystone"),
        }
    }
}

impl FromStr for AuthStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "noauth" => Ok(AuthStrategy::NoAuth),
            "keystone" => Ok(AuthStrategy::Keystone),
            other => Err(Error::Configuration(format!(
                "unknown auth strategy '{}' (expected 'keystone' or 'noauth')",
                other
            ))),
        }
    }
}

// =============================================================================
// NoAuth Options
// =============================================================================

/// Options for talking to a service that runs without authentication
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoAuthOptions {
    pub tenant_id: String,
}

impl NoAuthOptions {
    pub fn new(tenant_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
        }
    }
}

// =============================================================================
// Auth Options
// =============================================================================

/// The authentication variant carried by a [`crate::Config`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum AuthOptions {
    NoAuth(NoAuthOptions),
    Keystone(KeystoneAuthOptions),
}

impl AuthOptions {
    /// Tenant the client's requests are scoped to
    pub fn tenant_id(&self) -> &str {
        match self {
            AuthOptions::NoAuth(opts) => &opts.tenant_id,
            AuthOptions::Keystone(opts) => &opts.tenant_id,
        }
    }

    pub fn strategy(&self) -> AuthStrategy {
        match self {
            AuthOptions::NoAuth(_) => AuthStrategy::NoAuth,
            AuthOptions::Keystone(_) => AuthStrategy::Keystone,
        }
    }
}

impl From<NoAuthOptions> for AuthOptions {
    fn from(opts: NoAuthOptions) -> Self {
        AuthOptions::NoAuth(opts)
    }
}

impl From<KeystoneAuthOptions> for AuthOptions {
    fn from(opts: KeystoneAuthOptions) -> Self {
        AuthOptions::Keystone(opts)
    }
}
