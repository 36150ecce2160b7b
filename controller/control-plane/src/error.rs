use crate::kubeconfig::Component;
use infra_controller_core::NameError;
use thiserror::Error;

/// Describes the first failure encountered while reconciling a control plane.
///
/// Collaborator failures are returned as-is, tagged with the cluster they were reconciling; no
/// step is retried or rolled back.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{kind} {name:?} not found")]
    Lookup { kind: &'static str, name: String },

    #[error("node {node:?} belongs to cluster {node_cluster:?}, not {cluster:?}")]
    NodeClusterMismatch {
        node: String,
        node_cluster: String,
        cluster: String,
    },

    #[error(transparent)]
    InvalidClusterName(#[from] NameError),

    #[error("cluster {cluster:?}: failed to pull images: {source}")]
    ImagePull {
        cluster: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("cluster {cluster:?}: failed to derive {component} credentials: {source}")]
    Credentials {
        cluster: String,
        component: Component,
        #[source]
        source: anyhow::Error,
    },

    #[error("cluster {cluster:?}: failed to upload secrets: {source}")]
    SecretUpload {
        cluster: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("cluster {cluster:?}: failed to run pod {pod:?}: {source}")]
    PodExecution {
        cluster: String,
        pod: String,
        #[source]
        source: anyhow::Error,
    },
}
