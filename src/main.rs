//! osdsctl
//!
//! Command-line access to an OpenSDS controller through the client library.
//! Connection and credentials come from flags, the environment
//! (`OPENSDS_*`, `OS_*`) or a YAML config file; results print as JSON.

use clap::{Args as ClapArgs, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use opensds_client::{
    AuthOptions, AuthStrategy, Client, Config, Error, ExtendVolumeSpec, FailoverReplicationSpec,
    KeystoneAuthOptions, ListFilter, NoAuthOptions, ProfileSpec, Result, SortDir,
    VolumeSnapshotSpec, VolumeSpec,
};

// =============================================================================
// CLI Arguments
// =============================================================================

/// osdsctl - command-line client for the OpenSDS storage controller
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// OpenSDS controller endpoint
    #[arg(long, env = "OPENSDS_ENDPOINT", global = true)]
    endpoint: Option<String>,

    /// Authentication strategy (keystone, noauth)
    #[arg(long, env = "OPENSDS_AUTH_STRATEGY", global = true)]
    auth_strategy: Option<AuthStrategy>,

    /// Tenant id for noauth mode, or project override for keystone
    #[arg(long, env = "OPENSDS_TENANT_ID", global = true)]
    tenant_id: Option<String>,

    /// YAML config file; flags and environment override its values
    #[arg(long, env = "OPENSDS_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Per-request timeout in milliseconds (0 disables it)
    #[arg(long, env = "OPENSDS_TIMEOUT_MS", global = true)]
    timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "warn", global = true)]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON", global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// API versions
    Version {
        #[command(subcommand)]
        action: VersionAction,
    },
    /// Storage profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Registered docks
    Dock {
        #[command(subcommand)]
        action: ReadAction,
    },
    /// Storage pools
    Pool {
        #[command(subcommand)]
        action: ReadAction,
    },
    /// Block volumes
    Volume {
        #[command(subcommand)]
        action: VolumeAction,
    },
    /// Volume snapshots
    Snapshot {
        #[command(subcommand)]
        action: SnapshotAction,
    },
    /// Volume replications
    Replication {
        #[command(subcommand)]
        action: ReplicationAction,
    },
}

#[derive(ClapArgs, Debug)]
struct ListArgs {
    /// Maximum number of items to return
    #[arg(long)]
    limit: Option<u32>,

    /// Number of items to skip
    #[arg(long)]
    offset: Option<u32>,

    /// Field to sort on
    #[arg(long)]
    sort_key: Option<String>,

    /// Sort in descending order
    #[arg(long)]
    desc: bool,

    /// Field filter as key=value (repeatable)
    #[arg(long = "filter", value_parser = parse_key_value)]
    filters: Vec<(String, String)>,
}

#[derive(Subcommand, Debug)]
enum VersionAction {
    List,
    Show { name: String },
}

#[derive(Subcommand, Debug)]
enum ReadAction {
    List(ListArgs),
    Show { id: String },
}

#[derive(Subcommand, Debug)]
enum ProfileAction {
    List(ListArgs),
    Show {
        id: String,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "block")]
        storage_type: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum VolumeAction {
    List(ListArgs),
    Show {
        id: String,
    },
    Create {
        #[arg(long)]
        name: String,
        /// Size in GB
        #[arg(long)]
        size: i64,
        #[arg(long, default_value = "")]
        profile_id: String,
        #[arg(long, default_value = "")]
        availability_zone: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Delete {
        id: String,
    },
    Extend {
        id: String,
        /// New size in GB
        #[arg(long)]
        new_size: i64,
    },
}

#[derive(Subcommand, Debug)]
enum SnapshotAction {
    List(ListArgs),
    Show {
        id: String,
    },
    Create {
        #[arg(long)]
        volume_id: String,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum ReplicationAction {
    List(ListArgs),
    Show {
        id: String,
    },
    Enable {
        id: String,
    },
    Disable {
        id: String,
    },
    Failover {
        id: String,
        #[arg(long)]
        allow_attached_volume: bool,
        #[arg(long, default_value = "")]
        secondary_backend_id: String,
    },
}

fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .filter(|(k, _)| !k.is_empty())
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("invalid filter '{}', expected key=value", s))
}

impl ListArgs {
    fn to_filter(&self) -> ListFilter {
        let mut filter: ListFilter = self.filters.iter().cloned().collect();
        if let Some(limit) = self.limit {
            filter = filter.limit(limit);
        }
        if let Some(offset) = self.offset {
            filter = filter.offset(offset);
        }
        if let Some(key) = &self.sort_key {
            let dir = if self.desc { SortDir::Desc } else { SortDir::Asc };
            filter = filter.sort(key.clone(), dir);
        }
        filter
    }
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args);

    let config = build_config(&args)?;
    let client = Client::new(config);
    debug!("Using {:?}", client);

    run(&client, args.command).await
}

fn build_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_yaml_file(path)?,
        None => Config::default(),
    };

    if let Some(endpoint) = &args.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(millis) = args.timeout_ms {
        config = config.with_timeout(Duration::from_millis(millis));
    }

    match args.auth_strategy {
        Some(AuthStrategy::Keystone) => {
            let mut opts = KeystoneAuthOptions::from_env();
            if opts.identity_endpoint.is_empty() {
                return Err(Error::Configuration(
                    "keystone auth strategy requires OS_AUTH_URL".into(),
                ));
            }
            if let Some(tenant) = &args.tenant_id {
                opts.tenant_id = tenant.clone();
            }
            config.auth_options = Some(AuthOptions::Keystone(opts));
        }
        Some(AuthStrategy::NoAuth) => {
            let tenant = args.tenant_id.clone().unwrap_or_default();
            config.auth_options = Some(NoAuthOptions::new(tenant).into());
        }
        None => {
            if let Some(tenant) = &args.tenant_id {
                match config.auth_options.as_mut() {
                    Some(AuthOptions::NoAuth(opts)) => opts.tenant_id = tenant.clone(),
                    Some(AuthOptions::Keystone(opts)) => opts.tenant_id = tenant.clone(),
                    None => config.auth_options = Some(NoAuthOptions::new(tenant.clone()).into()),
                }
            }
        }
    }

    Ok(config)
}

async fn run(client: &Client, command: Command) -> Result<()> {
    match command {
        Command::Version { action } => match action {
            VersionAction::List => print_json(&client.versions().list_versions().await?),
            VersionAction::Show { name } => {
                print_json(&client.versions().get_version(&name).await?)
            }
        },

        Command::Profile { action } => {
            let profiles = client.profiles();
            match action {
                ProfileAction::List(list) => {
                    print_json(&profiles.list_profiles(&list.to_filter()).await?)
                }
                ProfileAction::Show { id } => print_json(&profiles.get_profile(&id).await?),
                ProfileAction::Create {
                    name,
                    description,
                    storage_type,
                } => {
                    let spec = ProfileSpec {
                        name,
                        description,
                        storage_type,
                        ..Default::default()
                    };
                    print_json(&profiles.create_profile(&spec).await?)
                }
                ProfileAction::Delete { id } => profiles.delete_profile(&id).await,
            }
        }

        Command::Dock { action } => match action {
            ReadAction::List(list) => {
                print_json(&client.docks().list_docks(&list.to_filter()).await?)
            }
            ReadAction::Show { id } => print_json(&client.docks().get_dock(&id).await?),
        },

        Command::Pool { action } => match action {
            ReadAction::List(list) => {
                print_json(&client.pools().list_pools(&list.to_filter()).await?)
            }
            ReadAction::Show { id } => print_json(&client.pools().get_pool(&id).await?),
        },

        Command::Volume { action } => {
            let volumes = client.volumes();
            match action {
                VolumeAction::List(list) => {
                    print_json(&volumes.list_volumes(&list.to_filter()).await?)
                }
                VolumeAction::Show { id } => print_json(&volumes.get_volume(&id).await?),
                VolumeAction::Create {
                    name,
                    size,
                    profile_id,
                    availability_zone,
                    description,
                } => {
                    if size <= 0 {
                        return Err(Error::Configuration(format!(
                            "volume size must be positive, got {}",
                            size
                        )));
                    }
                    let spec = VolumeSpec {
                        name,
                        size,
                        profile_id,
                        availability_zone,
                        description,
                        ..Default::default()
                    };
                    print_json(&volumes.create_volume(&spec).await?)
                }
                VolumeAction::Delete { id } => volumes.delete_volume(&id).await,
                VolumeAction::Extend { id, new_size } => {
                    let body = ExtendVolumeSpec { new_size };
                    print_json(&volumes.extend_volume(&id, &body).await?)
                }
            }
        }

        Command::Snapshot { action } => {
            let volumes = client.volumes();
            match action {
                SnapshotAction::List(list) => {
                    print_json(&volumes.list_snapshots(&list.to_filter()).await?)
                }
                SnapshotAction::Show { id } => print_json(&volumes.get_snapshot(&id).await?),
                SnapshotAction::Create {
                    volume_id,
                    name,
                    description,
                } => {
                    let spec = VolumeSnapshotSpec {
                        volume_id,
                        name,
                        description,
                        ..Default::default()
                    };
                    print_json(&volumes.create_snapshot(&spec).await?)
                }
                SnapshotAction::Delete { id } => volumes.delete_snapshot(&id).await,
            }
        }

        Command::Replication { action } => {
            let replications = client.replications();
            match action {
                ReplicationAction::List(list) => {
                    print_json(&replications.list_replications(&list.to_filter()).await?)
                }
                ReplicationAction::Show { id } => {
                    print_json(&replications.get_replication(&id).await?)
                }
                ReplicationAction::Enable { id } => replications.enable_replication(&id).await,
                ReplicationAction::Disable { id } => replications.disable_replication(&id).await,
                ReplicationAction::Failover {
                    id,
                    allow_attached_volume,
                    secondary_backend_id,
                } => {
                    let body = FailoverReplicationSpec {
                        allow_attached_volume,
                        secondary_backend_id,
                    };
                    replications.failover_replication(&id, &body).await
                }
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let mut filter = EnvFilter::from_default_env().add_directive(level.into());
    for directive in ["hyper=warn", "reqwest=warn", "rustls=warn"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
