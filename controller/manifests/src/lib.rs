#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

//! Reads cluster and node definitions from a multi-document YAML stream.

use infra_controller_core::{self as model, cluster::validate_name, Clusters, NameError};
use serde::Deserialize;
use std::{collections::btree_map::Entry, num::NonZeroU16};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse manifest document {index}: {source}")]
    Parse {
        index: usize,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("cluster {0:?} is defined more than once")]
    DuplicateCluster(String),

    #[error(transparent)]
    InvalidName(#[from] NameError),
}

/// The clusters and nodes described by a manifest stream.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Manifests {
    pub clusters: Clusters,

    /// Nodes in the order they appear in the stream.
    pub nodes: Vec<model::Node>,
}

#[derive(Debug, Deserialize)]
struct Metadata {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Cluster {
    metadata: Metadata,
    spec: ClusterSpec,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClusterSpec {
    certificate_authorities: CertificateAuthorities,
    api_server: ApiServer,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CertificateAuthorities {
    api_server: CertificateAuthority,
    api_server_client: CertificateAuthority,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CertificateAuthority {
    certificate: String,
    private_key: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiServer {
    tls_cert: String,
    tls_private_key: String,
}

#[derive(Debug, Deserialize)]
struct Node {
    metadata: Metadata,
    spec: NodeSpec,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeSpec {
    cluster: String,
    hypervisor: String,
    host_port: NonZeroU16,
    #[serde(default)]
    role: Role,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum Role {
    #[default]
    ControlPlane,
    ControlPlaneIngress,
}

/// Parses every `Cluster` and `Node` document in `input`.
///
/// Documents of any other kind, and empty documents, are skipped.
pub fn load(input: &str) -> Result<Manifests, Error> {
    let mut manifests = Manifests::default();

    for (index, document) in serde_yaml::Deserializer::from_str(input).enumerate() {
        let parse = |source| Error::Parse { index, source };
        let value = serde_yaml::Value::deserialize(document).map_err(parse)?;
        let kind = value.get("kind").and_then(|k| k.as_str()).map(str::to_string);

        match kind.as_deref() {
            Some("Cluster") => {
                let cluster = serde_yaml::from_value::<Cluster>(value).map_err(parse)?;
                let cluster = model::Cluster::from(cluster);
                validate_name(&cluster.name)?;
                match manifests.clusters.entry(cluster.name.clone()) {
                    Entry::Vacant(entry) => {
                        debug!(name = %cluster.name, "Loaded cluster");
                        entry.insert(cluster);
                    }
                    Entry::Occupied(entry) => {
                        return Err(Error::DuplicateCluster(entry.key().clone()));
                    }
                }
            }
            Some("Node") => {
                let node = serde_yaml::from_value::<Node>(value).map_err(parse)?;
                let node = model::Node::from(node);
                debug!(name = %node.name, cluster = %node.cluster, "Loaded node");
                manifests.nodes.push(node);
            }
            kind => debug!(index, ?kind, "Skipping document"),
        }
    }

    Ok(manifests)
}

// === impl Cluster ===

impl From<Cluster> for model::Cluster {
    fn from(Cluster { metadata, spec }: Cluster) -> Self {
        let ca = |CertificateAuthority {
                      certificate,
                      private_key,
                  }| model::CertificateAuthority {
            certificate,
            private_key,
        };
        model::Cluster {
            name: metadata.name,
            certificate_authorities: model::CertificateAuthorities {
                api_server: ca(spec.certificate_authorities.api_server),
                api_server_client: ca(spec.certificate_authorities.api_server_client),
            },
            api_server: model::KeyPair {
                certificate: spec.api_server.tls_cert,
                private_key: spec.api_server.tls_private_key,
            },
        }
    }
}

// === impl Node ===

impl From<Node> for model::Node {
    fn from(Node { metadata, spec }: Node) -> Self {
        model::Node {
            name: metadata.name,
            cluster: spec.cluster,
            hypervisor_name: spec.hypervisor,
            host_port: spec.host_port,
            role: match spec.role {
                Role::ControlPlane => model::NodeRole::ControlPlane,
                Role::ControlPlaneIngress => model::NodeRole::ControlPlaneIngress,
            },
        }
    }
}
