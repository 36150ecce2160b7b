//! Cluster-namespaced secret files.

use infra_controller_core::{Cluster, NameError};
use std::collections::BTreeMap;

pub const APISERVER_CLIENT_CA_FILE: &str = "apiserver-client-ca.crt";
pub const APISERVER_CERT_FILE: &str = "apiserver.crt";
pub const APISERVER_KEY_FILE: &str = "apiserver.key";
pub const CONTROLLER_MANAGER_KUBECONFIG_FILE: &str = "controller-manager.kubeconfig";
pub const SCHEDULER_KUBECONFIG_FILE: &str = "scheduler.kubeconfig";

/// Maps hypervisor file paths to their contents.
pub type SecretBundle = BTreeMap<String, String>;

/// A cluster's secrets directory on a hypervisor.
///
/// Each cluster gets a distinct directory under a shared root, so clusters placed on the same
/// hypervisor never write to the same paths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecretsDir(String);

/// Credentials derived for a single reconcile.
#[derive(Clone, Debug)]
pub(crate) struct Kubeconfigs {
    pub controller_manager: String,
    pub scheduler: String,
}

// === impl SecretsDir ===

impl SecretsDir {
    pub fn new(root: &str, cluster: &Cluster) -> Result<Self, NameError> {
        cluster.validate_name()?;
        Ok(Self(format!(
            "{}/{}",
            root.trim_end_matches('/'),
            cluster.name
        )))
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.0
    }

    pub fn file(&self, name: &str) -> String {
        format!("{}/{}", self.0, name)
    }

    /// Builds the bundle of files every control plane component reads from this directory.
    pub(crate) fn bundle(&self, cluster: &Cluster, kubeconfigs: Kubeconfigs) -> SecretBundle {
        let Kubeconfigs {
            controller_manager,
            scheduler,
        } = kubeconfigs;
        let client_ca = &cluster.certificate_authorities.api_server_client;

        [
            // API server
            (APISERVER_CLIENT_CA_FILE, client_ca.certificate.clone()),
            (APISERVER_CERT_FILE, cluster.api_server.certificate.clone()),
            (APISERVER_KEY_FILE, cluster.api_server.private_key.clone()),
            // controller-manager
            (CONTROLLER_MANAGER_KUBECONFIG_FILE, controller_manager),
            // scheduler
            (SCHEDULER_KUBECONFIG_FILE, scheduler),
        ]
        .into_iter()
        .map(|(name, content)| (self.file(name), content))
        .collect()
    }
}
