use crate::{
    control_plane::{self, config, static_pod::static_pod, ControlPlaneConfig, Images},
    endpoint,
    manifests::{self, Manifests},
};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use tokio::io::AsyncReadExt;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[clap(name = "infra", version, about = "Manages tenant cluster control planes")]
pub struct Args {
    #[clap(long, default_value = "infra=info,warn", env = "INFRA_LOG")]
    log_level: String,

    #[clap(long, value_enum, default_value = "plain")]
    log_format: LogFormat,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Plain,
    Json,
}

/// Every command reads cluster and node manifests from stdin.
#[derive(Debug, Subcommand)]
enum Command {
    /// Queries a cluster's endpoints.
    #[clap(subcommand)]
    Cluster(ClusterCommand),

    #[clap(subcommand)]
    ControlPlane(ControlPlaneCommand),
}

#[derive(Debug, Subcommand)]
enum ClusterCommand {
    /// Prints the name of the hypervisor hosting the cluster's ingress node.
    IngressNodeName { cluster: String },
}

#[derive(Debug, Subcommand)]
enum ControlPlaneCommand {
    /// Prints a node's control plane pod as a static pod manifest.
    Render {
        #[clap(flatten)]
        config: ControlPlaneArgs,

        cluster: String,

        node: String,
    },
}

#[derive(Clone, Debug, clap::Args)]
struct ControlPlaneArgs {
    #[clap(long, default_value = config::DEFAULT_STORAGE_SHIM_IMAGE)]
    storage_shim_image: String,

    #[clap(long, default_value = config::DEFAULT_KUBE_APISERVER_IMAGE)]
    kube_apiserver_image: String,

    #[clap(long, default_value = config::DEFAULT_KUBE_CONTROLLER_MANAGER_IMAGE)]
    kube_controller_manager_image: String,

    #[clap(long, default_value = config::DEFAULT_KUBE_SCHEDULER_IMAGE)]
    kube_scheduler_image: String,

    /// Hypervisor directory holding each cluster's secrets directory.
    #[clap(long, default_value = config::DEFAULT_SECRETS_ROOT)]
    secrets_root: String,
}

// === impl Args ===

impl Args {
    #[inline]
    pub async fn parse_and_run() -> Result<()> {
        Self::parse().run().await
    }

    pub async fn run(self) -> Result<()> {
        let Self {
            log_level,
            log_format,
            command,
        } = self;

        init_log(&log_level, log_format)?;

        let mut input = String::new();
        tokio::io::stdin()
            .read_to_string(&mut input)
            .await
            .context("failed to read manifests from stdin")?;
        let manifests = manifests::load(&input)?;
        debug!(
            clusters = manifests.clusters.len(),
            nodes = manifests.nodes.len(),
            "Loaded manifests"
        );

        command.run(&manifests, &mut std::io::stdout().lock())
    }
}

// Logs go to stderr; stdout carries command output only.
fn init_log(level: &str, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_new(level).with_context(|| format!("invalid log level {level:?}"))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Plain => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|error| anyhow!("failed to initialize logging: {error}"))
}

// === impl Command ===

impl Command {
    fn run(self, manifests: &Manifests, out: &mut impl Write) -> Result<()> {
        match self {
            Self::Cluster(ClusterCommand::IngressNodeName { cluster }) => {
                let hypervisor = endpoint::ingress_hypervisor_name(
                    &manifests.clusters,
                    &manifests.nodes,
                    &cluster,
                )?;
                writeln!(out, "{hypervisor}")?;
            }

            Self::ControlPlane(ControlPlaneCommand::Render {
                config,
                cluster,
                node,
            }) => {
                let cluster = manifests.clusters.get(&cluster).ok_or_else(|| {
                    control_plane::Error::Lookup {
                        kind: "cluster",
                        name: cluster.clone(),
                    }
                })?;
                let node = manifests
                    .nodes
                    .iter()
                    .find(|n| n.name == node && n.belongs_to(&cluster.name))
                    .ok_or_else(|| control_plane::Error::Lookup {
                        kind: "node",
                        name: node.clone(),
                    })?;

                let pod = control_plane::control_plane_pod(&config.into(), cluster, node)?;
                let manifest = serde_yaml::to_string(&static_pod(&pod))?;
                out.write_all(manifest.as_bytes())?;
            }
        }

        Ok(())
    }
}

// === impl ControlPlaneArgs ===

impl From<ControlPlaneArgs> for ControlPlaneConfig {
    fn from(args: ControlPlaneArgs) -> Self {
        Self {
            images: Images {
                storage_shim: args.storage_shim_image,
                kube_apiserver: args.kube_apiserver_image,
                kube_controller_manager: args.kube_controller_manager_image,
                kube_scheduler: args.kube_scheduler_image,
            },
            secrets_root: args.secrets_root,
        }
    }
}
