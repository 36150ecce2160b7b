//! Renders the containers that make up a cluster's control plane.

use crate::{
    secrets::{
        SecretsDir, APISERVER_CERT_FILE, APISERVER_CLIENT_CA_FILE, APISERVER_KEY_FILE,
        CONTROLLER_MANAGER_KUBECONFIG_FILE, SCHEDULER_KUBECONFIG_FILE,
    },
    ControlPlaneConfig, Error,
};
use infra_controller_core::{Cluster, Container, Node, Pod, API_SERVER_SECURE_PORT};
use std::collections::BTreeMap;

pub const STORAGE_SHIM: &str = "kine";
pub const KUBE_APISERVER: &str = "kube-apiserver";
pub const KUBE_CONTROLLER_MANAGER: &str = "kube-controller-manager";
pub const KUBE_SCHEDULER: &str = "kube-scheduler";

/// The storage shim serves the etcd protocol on the pod's loopback interface.
const STORAGE_SHIM_ENDPOINT: &str = "http://127.0.0.1:2379";

/// Returns the name of the pod running `cluster`'s control plane.
pub fn pod_name(cluster: &Cluster) -> String {
    format!("control-plane-{}", cluster.name)
}

/// Renders the control plane pod for `cluster` on `node`.
pub fn control_plane_pod(
    config: &ControlPlaneConfig,
    cluster: &Cluster,
    node: &Node,
) -> Result<Pod, Error> {
    let secrets = SecretsDir::new(&config.secrets_root, cluster)?;
    Ok(pod(config, &secrets, cluster, node))
}

pub(crate) fn pod(
    config: &ControlPlaneConfig,
    secrets: &SecretsDir,
    cluster: &Cluster,
    node: &Node,
) -> Pod {
    // Secrets are mounted at the same path they were uploaded to.
    let mounts = || BTreeMap::from([(secrets.path().to_string(), secrets.path().to_string())]);

    let containers = vec![
        Container {
            name: STORAGE_SHIM.to_string(),
            image: config.images.storage_shim.clone(),
            command: vec![STORAGE_SHIM.to_string()],
            args: vec![],
            mounts: mounts(),
        },
        Container {
            name: KUBE_APISERVER.to_string(),
            image: config.images.kube_apiserver.clone(),
            command: vec![KUBE_APISERVER.to_string()],
            args: args(&[
                ("--etcd-servers", STORAGE_SHIM_ENDPOINT.to_string()),
                ("--tls-cert-file", secrets.file(APISERVER_CERT_FILE)),
                ("--tls-private-key-file", secrets.file(APISERVER_KEY_FILE)),
                ("--client-ca-file", secrets.file(APISERVER_CLIENT_CA_FILE)),
            ]),
            mounts: mounts(),
        },
        Container {
            name: KUBE_CONTROLLER_MANAGER.to_string(),
            image: config.images.kube_controller_manager.clone(),
            command: vec![KUBE_CONTROLLER_MANAGER.to_string()],
            args: args(&[(
                "--kubeconfig",
                secrets.file(CONTROLLER_MANAGER_KUBECONFIG_FILE),
            )]),
            mounts: mounts(),
        },
        Container {
            name: KUBE_SCHEDULER.to_string(),
            image: config.images.kube_scheduler.clone(),
            command: vec![KUBE_SCHEDULER.to_string()],
            args: args(&[("--kubeconfig", secrets.file(SCHEDULER_KUBECONFIG_FILE))]),
            mounts: mounts(),
        },
    ];

    Pod {
        name: pod_name(cluster),
        containers,
        ports: BTreeMap::from([(node.host_port.get(), API_SERVER_SECURE_PORT)]),
    }
}

fn args(flags: &[(&str, String)]) -> Vec<String> {
    flags
        .iter()
        .flat_map(|(flag, value)| [flag.to_string(), value.clone()])
        .collect()
}
