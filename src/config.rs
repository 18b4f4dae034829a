//! Client Configuration
//!
//! [`Config`] is what callers hand to [`crate::Client::new`]. It can be
//! built in code, loaded from a YAML file, or read from the environment.
//! [`ClientDefaults`] carries the values used when the config leaves the
//! endpoint or the tenant unset.

use crate::auth::{AuthOptions, AuthStrategy, KeystoneAuthOptions, NoAuthOptions};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Endpoint used when none is configured
pub const DEFAULT_ENDPOINT: &str = "http://localhost:50040";

/// Tenant used when none is configured
pub const DEFAULT_TENANT_ID: &str = "e93b4c0934da416eb9c8d120c5d04d96";

// =============================================================================
// Defaults
// =============================================================================

/// Values substituted for missing configuration during client construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientDefaults {
    pub endpoint: String,
    pub tenant_id: String,
}

impl Default for ClientDefaults {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            tenant_id: DEFAULT_TENANT_ID.to_string(),
        }
    }
}

// =============================================================================
// Config
// =============================================================================

/// Options for building a [`crate::Client`]
///
/// `auth_options: None` is accepted and resolved to noauth with the
/// default tenant when the client is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage service endpoint, e.g. `http://localhost:50040`
    pub endpoint: String,
    pub auth_options: Option<AuthOptions>,
    /// Per-request timeout in milliseconds; unset or 0 means no timeout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl Config {
    pub fn new(endpoint: impl Into<String>, auth_options: impl Into<AuthOptions>) -> Self {
        Self {
            endpoint: endpoint.into(),
            auth_options: Some(auth_options.into()),
            timeout_ms: None,
        }
    }

    /// Set the per-request timeout; a zero duration clears it
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self.timeout_ms = Some(millis).filter(|ms| *ms > 0);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&contents)
    }

    /// Read `OPENSDS_ENDPOINT`, `OPENSDS_AUTH_STRATEGY`, `OPENSDS_TIMEOUT_MS`
    /// and the credentials the chosen strategy needs
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup("OPENSDS_ENDPOINT").unwrap_or_default();

        let auth_options = match lookup("OPENSDS_AUTH_STRATEGY").filter(|s| !s.is_empty()) {
            None => None,
            Some(name) => Some(match name.parse::<AuthStrategy>()? {
                AuthStrategy::NoAuth => AuthOptions::NoAuth(NoAuthOptions::new(
                    lookup("OPENSDS_TENANT_ID").unwrap_or_default(),
                )),
                AuthStrategy::Keystone => {
                    let opts = KeystoneAuthOptions::from_lookup(&lookup);
                    if opts.identity_endpoint.is_empty() {
                        return Err(Error::Configuration(
                            "keystone auth strategy requires OS_AUTH_URL".into(),
                        ));
                    }
                    AuthOptions::Keystone(opts)
                }
            }),
        };

        Ok(Self {
            endpoint,
            auth_options,
            timeout_ms: lookup("OPENSDS_TIMEOUT_MS").and_then(|v| v.trim().parse().ok()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| env.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let defaults = ClientDefaults::default();
        assert_eq!(defaults.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(defaults.tenant_id, DEFAULT_TENANT_ID);

        let config = Config::default();
        assert!(config.endpoint.is_empty());
        assert!(config.auth_options.is_none());
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
endpoint: http://opensds:50040
timeout_ms: 15000
auth_options:
  strategy: keystone
  identity_endpoint: http://keystone:5000/v3
  username: admin
  password: opensds@123
  domain_name: Default
  tenant_name: admin
  allow_reauth: true
"#
        )
        .unwrap();

        let config = Config::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.endpoint, "http://opensds:50040");
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
        match config.auth_options {
            Some(AuthOptions::Keystone(k)) => {
                assert_eq!(k.password, "opensds@123");
                assert!(k.allow_reauth);
            }
            other => panic!("unexpected auth options: {:?}", other),
        }
    }

    #[test]
    fn test_timeout_keeps_sub_second_precision() {
        let config = Config::default().with_timeout(Duration::from_millis(500));
        assert_eq!(config.timeout_ms, Some(500));
        assert_eq!(config.timeout(), Some(Duration::from_millis(500)));

        let config = Config::default().with_timeout(Duration::from_micros(1500));
        assert_eq!(config.timeout(), Some(Duration::from_millis(1)));
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let config = Config::default().with_timeout(Duration::ZERO);
        assert_eq!(config.timeout_ms, None);
        assert_eq!(config.timeout(), None);

        let config = Config::from_yaml_str("endpoint: http://h\ntimeout_ms: 0").unwrap();
        assert_eq!(config.timeout(), None);

        let config = Config::from_lookup(lookup_from(&[("OPENSDS_TIMEOUT_MS", "0")])).unwrap();
        assert_eq!(config.timeout(), None);

        let config = Config::from_lookup(lookup_from(&[("OPENSDS_TIMEOUT_MS", "250")])).unwrap();
        assert_eq!(config.timeout(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_from_yaml_invalid() {
        let err = Config::from_yaml_str("auth_options: {strategy: ldap}").unwrap_err();
        assert_matches!(err, Error::YamlParse(_));

        let err = Config::from_yaml_file("/nonexistent/opensds.yaml").unwrap_err();
        assert_matches!(err, Error::Io(_));
    }

    #[test]
    fn test_from_env_noauth() {
        let config = Config::from_lookup(lookup_from(&[
            ("OPENSDS_ENDPOINT", "http://h:50040"),
            ("OPENSDS_AUTH_STRATEGY", "noauth"),
            ("OPENSDS_TENANT_ID", "t1"),
        ]))
        .unwrap();
        assert_eq!(config.endpoint, "http://h:50040");
        assert_eq!(config.auth_options, Some(NoAuthOptions::new("t1").into()));
    }

    #[test]
    fn test_from_env_keystone() {
        let config = Config::from_lookup(lookup_from(&[
            ("OPENSDS_AUTH_STRATEGY", "keystone"),
            ("OS_AUTH_URL", "http://idp/identity"),
            ("OS_USERNAME", "admin"),
            ("OS_PASSWORD", "pw"),
            ("OS_PROJECT_ID", "t2"),
        ]))
        .unwrap();
        assert!(config.endpoint.is_empty());
        let auth = config.auth_options.unwrap();
        assert_eq!(auth.strategy(), AuthStrategy::Keystone);
        assert_eq!(auth.tenant_id(), "t2");
    }

    #[test]
    fn test_from_env_errors() {
        let err = Config::from_lookup(lookup_from(&[("OPENSDS_AUTH_STRATEGY", "kerberos")]))
            .unwrap_err();
        assert_matches!(err, Error::Configuration(_));

        let err = Config::from_lookup(lookup_from(&[("OPENSDS_AUTH_STRATEGY", "keystone")]))
            .unwrap_err();
        assert_matches!(
            err,
            Error::Configuration(msg) if msg.contains("OS_AUTH_URL")
        );

        let unset = Config::from_lookup(lookup_from(&[])).unwrap();
        assert!(unset.auth_options.is_none());
    }
}
