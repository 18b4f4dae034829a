//! Client Assembly
//!
//! Resolves a [`Config`] into a ready [`Client`]:
//! - Fill in the default endpoint if none was given
//! - Pick the receiver matching the auth options
//! - Resolve the tenant id
//! - Build every resource manager around the one shared receiver
//!
//! Construction never fails. Missing configuration is replaced by
//! [`ClientDefaults`] and reported with a warning.

use crate::auth::{AuthOptions, AuthStrategy, NoAuthOptions};
use crate::config::{ClientDefaults, Config};
use crate::managers::{DockMgr, PoolMgr, ProfileMgr, ReplicationMgr, VersionMgr, VolumeMgr};
use crate::receiver::{build_http_client, HttpReceiver, KeystoneReceiver, Receiver};
use std::sync::Arc;
use tracing::{debug, warn};

/// Handle exposing every resource manager of the storage service
pub struct Client {
    config: Config,
    tenant_id: String,
    receiver: Arc<dyn Receiver>,
    profiles: ProfileMgr,
    docks: DockMgr,
    pools: PoolMgr,
    volumes: VolumeMgr,
    versions: VersionMgr,
    replications: ReplicationMgr,
}

impl Client {
    /// Build a client using the built-in defaults
    pub fn new(config: Config) -> Self {
        Self::with_defaults(config, &ClientDefaults::default())
    }

    /// Build a client, filling gaps in `config` from `defaults`
    ///
    /// The resolved configuration, including substituted values, is
    /// available afterwards through [`Client::config`].
    pub fn with_defaults(mut config: Config, defaults: &ClientDefaults) -> Self {
        if config.endpoint.is_empty() {
            config.endpoint = defaults.endpoint.clone();
            warn!(
                "OpenSDS endpoint is not specified, using the default value ({})",
                config.endpoint
            );
        }

        let http = build_http_client(config.timeout());
        let (receiver, tenant_id): (Arc<dyn Receiver>, String) =
            match config.auth_options.as_mut() {
                Some(AuthOptions::NoAuth(opts)) => {
                    if opts.tenant_id.is_empty() {
                        warn!(
                            "Tenant id is not specified, using the default value ({})",
                            defaults.tenant_id
                        );
                        opts.tenant_id = defaults.tenant_id.clone();
                    }
                    (Arc::new(HttpReceiver::new(http)), opts.tenant_id.clone())
                }
                Some(AuthOptions::Keystone(opts)) => {
                    let tenant_id = if opts.tenant_id.is_empty() {
                        warn!(
                            "Keystone tenant id is not specified, \
                             scoping requests to the default tenant ({})",
                            defaults.tenant_id
                        );
                        defaults.tenant_id.clone()
                    } else {
                        opts.tenant_id.clone()
                    };
                    (Arc::new(KeystoneReceiver::new(opts.clone(), http)), tenant_id)
                }
                None => {
                    warn!(
                        "Auth options are not specified or not supported, \
                         using noauth with the default tenant ({})",
                        defaults.tenant_id
                    );
                    config.auth_options =
                        Some(NoAuthOptions::new(defaults.tenant_id.clone()).into());
                    (Arc::new(HttpReceiver::new(http)), defaults.tenant_id.clone())
                }
            };

        debug!(
            "Client configured for {} (tenant: {}, auth: {})",
            config.endpoint,
            tenant_id,
            receiver.strategy()
        );

        Self::assemble(config, tenant_id, receiver)
    }

    fn assemble(config: Config, tenant_id: String, receiver: Arc<dyn Receiver>) -> Self {
        let endpoint = config.endpoint.as_str();
        Self {
            profiles: ProfileMgr::new(receiver.clone(), endpoint, tenant_id.as_str()),
            docks: DockMgr::new(receiver.clone(), endpoint, tenant_id.as_str()),
            pools: PoolMgr::new(receiver.clone(), endpoint, tenant_id.as_str()),
            volumes: VolumeMgr::new(receiver.clone(), endpoint, tenant_id.as_str()),
            versions: VersionMgr::new(receiver.clone(), endpoint, tenant_id.as_str()),
            replications: ReplicationMgr::new(receiver.clone(), endpoint, tenant_id.as_str()),
            receiver,
            tenant_id,
            config,
        }
    }

    /// Discard this client and return an empty, unconfigured one
    pub fn reset(self) -> Self {
        Self::default()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    pub fn auth_strategy(&self) -> AuthStrategy {
        self.receiver.strategy()
    }

    pub fn profiles(&self) -> &ProfileMgr {
        &self.profiles
    }

    pub fn docks(&self) -> &DockMgr {
        &self.docks
    }

    pub fn pools(&self) -> &PoolMgr {
        &self.pools
    }

    pub fn volumes(&self) -> &VolumeMgr {
        &self.volumes
    }

    pub fn versions(&self) -> &VersionMgr {
        &self.versions
    }

    pub fn replications(&self) -> &ReplicationMgr {
        &self.replications
    }
}

impl Default for Client {
    /// A client with no endpoint, no tenant and a plain receiver
    fn default() -> Self {
        Self::assemble(
            Config::default(),
            String::new(),
            Arc::new(HttpReceiver::default()),
        )
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("tenant_id", &self.tenant_id)
            .field("strategy", &self.receiver.strategy())
            .finish_non_exhaustive()
    }
}
