//! End-to-end client tests against mocked storage and identity services

use httpmock::prelude::*;
use opensds_client::{
    AuthOptions, AuthStrategy, Client, ClientDefaults, Config, Error, KeystoneAuthOptions,
    ListFilter, NoAuthOptions, VolumeSpec,
};
use serde_json::json;
use std::time::Duration;

fn keystone_options(identity: &MockServer, tenant_id: &str) -> KeystoneAuthOptions {
    KeystoneAuthOptions {
        identity_endpoint: identity.url("/identity"),
        username: "admin".into(),
        password: "opensds@123".into(),
        domain_name: "Default".into(),
        tenant_id: tenant_id.into(),
        allow_reauth: true,
        ..Default::default()
    }
}

fn mock_token<'a>(identity: &'a MockServer, token: &str) -> httpmock::Mock<'a> {
    let token = token.to_string();
    identity.mock(move |when, then| {
        when.method(POST)
            .path("/identity/v3/auth/tokens")
            .body_includes("\"password\"");
        then.status(201)
            .header("X-Subject-Token", token.as_str())
            .json_body(json!({
                "token": {
                    "expires_at": "2099-01-01T00:00:00Z",
                    "project": { "id": "t-ks" }
                }
            }));
    })
}

#[tokio::test]
async fn test_noauth_client_end_to_end() {
    let storage = MockServer::start();
    let list = storage.mock(|when, then| {
        when.method(GET)
            .path("/v1beta/t1/block/volumes")
            .query_param("status", "available");
        then.status(200).json_body(json!([
            { "id": "v-1", "name": "data", "size": 10, "status": "available" }
        ]));
    });
    let create = storage.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/t1/block/volumes")
            .body_includes("\"name\":\"logs\"");
        then.status(202).json_body(json!({
            "id": "v-2",
            "name": "logs",
            "size": 5,
            "status": "creating"
        }));
    });

    let client = Client::new(Config::new(storage.base_url(), NoAuthOptions::new("t1")));
    assert_eq!(client.auth_strategy(), AuthStrategy::NoAuth);
    assert_eq!(client.tenant_id(), "t1");

    let volumes = client
        .volumes()
        .list_volumes(&ListFilter::new().with("status", "available"))
        .await
        .unwrap();
    assert_eq!(volumes.len(), 1);
    assert_eq!(volumes[0].base.id, "v-1");

    let created = client
        .volumes()
        .create_volume(&VolumeSpec {
            name: "logs".into(),
            size: 5,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.status, "creating");

    list.assert();
    create.assert();
}

#[tokio::test]
async fn test_defaults_fill_missing_endpoint_and_tenant() {
    let storage = MockServer::start();
    let docks = storage.mock(|when, then| {
        when.method(GET).path("/v1beta/default-tenant/docks");
        then.status(200).json_body(json!([]));
    });

    let defaults = ClientDefaults {
        endpoint: storage.base_url(),
        tenant_id: "default-tenant".into(),
    };
    let client = Client::with_defaults(Config::default(), &defaults);

    assert_eq!(client.endpoint(), storage.base_url());
    assert_eq!(client.tenant_id(), "default-tenant");
    assert_eq!(
        client.config().auth_options,
        Some(AuthOptions::NoAuth(NoAuthOptions::new("default-tenant")))
    );

    let listed = client.docks().list_docks(&ListFilter::new()).await.unwrap();
    assert!(listed.is_empty());
    docks.assert();
}

#[tokio::test]
async fn test_keystone_client_attaches_token() {
    let identity = MockServer::start();
    let storage = MockServer::start();
    let token = mock_token(&identity, "tok-1");
    let pools = storage.mock(|when, then| {
        when.method(GET)
            .path("/v1beta/t-ks/pools")
            .header("X-Auth-Token", "tok-1");
        then.status(200).json_body(json!([
            { "id": "p-1", "name": "gold", "totalCapacity": 100, "freeCapacity": 40 }
        ]));
    });
    let profile = storage.mock(|when, then| {
        when.method(GET)
            .path("/v1beta/t-ks/profiles/prf-1")
            .header("X-Auth-Token", "tok-1");
        then.status(200).json_body(json!({
            "id": "prf-1",
            "name": "default",
            "storageType": "block"
        }));
    });

    let client = Client::new(Config::new(
        storage.base_url(),
        keystone_options(&identity, "t-ks"),
    ));
    assert_eq!(client.auth_strategy(), AuthStrategy::Keystone);

    let listed = client.pools().list_pools(&ListFilter::new()).await.unwrap();
    assert_eq!(listed[0].name, "gold");
    let fetched = client.profiles().get_profile("prf-1").await.unwrap();
    assert_eq!(fetched.storage_type, "block");

    token.assert_calls(1);
    pools.assert();
    profile.assert();
}

#[tokio::test]
async fn test_keystone_identity_rejection_surfaces_as_auth_error() {
    let identity = MockServer::start();
    let storage = MockServer::start();
    identity.mock(|when, then| {
        when.method(POST).path("/identity/v3/auth/tokens");
        then.status(401).body("invalid credentials");
    });
    let volumes = storage.mock(|when, then| {
        when.method(GET).path("/v1beta/t-ks/block/volumes");
        then.status(200).json_body(json!([]));
    });

    let client = Client::new(Config::new(
        storage.base_url(),
        keystone_options(&identity, "t-ks"),
    ));
    let err = client
        .volumes()
        .list_volumes(&ListFilter::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Authentication { .. }));
    volumes.assert_calls(0);
}

#[tokio::test]
async fn test_sub_second_timeout_allows_fast_responses() {
    let storage = MockServer::start();
    let mock = storage.mock(|when, then| {
        when.method(GET).path("/v1beta/t1/pools");
        then.status(200)
            .delay(Duration::from_millis(50))
            .json_body(json!([]));
    });

    let config = Config::new(storage.base_url(), NoAuthOptions::new("t1"))
        .with_timeout(Duration::from_millis(500));
    assert_eq!(config.timeout(), Some(Duration::from_millis(500)));

    let client = Client::new(config);
    let pools = client.pools().list_pools(&ListFilter::new()).await.unwrap();

    assert!(pools.is_empty());
    mock.assert();
}

#[tokio::test]
async fn test_configured_timeout_cuts_off_slow_responses() {
    let storage = MockServer::start();
    storage.mock(|when, then| {
        when.method(GET).path("/v1beta/t1/pools");
        then.status(200)
            .delay(Duration::from_secs(2))
            .json_body(json!([]));
    });

    let client = Client::new(
        Config::new(storage.base_url(), NoAuthOptions::new("t1"))
            .with_timeout(Duration::from_millis(200)),
    );
    let err = client
        .pools()
        .list_pools(&ListFilter::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_zero_timeout_disables_cutoff() {
    let storage = MockServer::start();
    let mock = storage.mock(|when, then| {
        when.method(GET).path("/v1beta/t1/docks");
        then.status(200)
            .delay(Duration::from_millis(50))
            .json_body(json!([]));
    });

    let config = Config::from_yaml_str(&format!(
        "endpoint: {}\ntimeout_ms: 0\nauth_options:\n  strategy: noauth\n  tenant_id: t1\n",
        storage.base_url()
    ))
    .unwrap();
    assert_eq!(config.timeout(), None);

    let client = Client::new(config);
    client.docks().list_docks(&ListFilter::new()).await.unwrap();
    mock.assert();
}

#[tokio::test]
async fn test_versions_live_at_service_root() {
    let storage = MockServer::start();
    let mock = storage.mock(|when, then| {
        when.method(GET).path("/v1beta");
        then.status(200)
            .json_body(json!({ "name": "v1beta", "status": "CURRENT" }));
    });

    let client = Client::new(Config::new(storage.base_url(), NoAuthOptions::new("t1")));
    let version = client.versions().get_version("v1beta").await.unwrap();

    assert_eq!(version.status, "CURRENT");
    mock.assert();
}

#[tokio::test]
async fn test_reset_yields_unconfigured_client() {
    let storage = MockServer::start();
    let client = Client::new(Config::new(storage.base_url(), NoAuthOptions::new("t1")));

    let client = client.reset();

    assert!(client.endpoint().is_empty());
    assert!(client.tenant_id().is_empty());
    assert!(client.config().auth_options.is_none());
    assert_eq!(client.auth_strategy(), AuthStrategy::NoAuth);
}
