use crate::{
    descriptor, kubeconfig,
    secrets::{Kubeconfigs, SecretsDir},
    Component, ControlPlaneConfig, Error,
};
use infra_controller_core::{
    CertificateIssuer, Cluster, Clusters, Hypervisor, Node, LOCAL_API_SERVER_ENDPOINT,
};
use std::{collections::BTreeMap, sync::Arc};
use tracing::{debug, info, instrument};

/// Hypervisors indexed by name.
pub type Hypervisors = BTreeMap<String, Arc<dyn Hypervisor>>;

/// Converges a node's control plane containers toward the configured shape.
///
/// Holds no state between calls: every reconcile renders the pod and secrets from scratch, so
/// credentials rotated between calls are picked up and a reconcile interrupted at any step is
/// repaired by calling it again.
#[derive(Debug)]
pub struct ControlPlane<I> {
    config: ControlPlaneConfig,
    issuer: I,
}

// === impl ControlPlane ===

impl<I: CertificateIssuer> ControlPlane<I> {
    pub fn new(config: ControlPlaneConfig, issuer: I) -> Self {
        Self { config, issuer }
    }

    pub fn config(&self) -> &ControlPlaneConfig {
        &self.config
    }

    /// Pulls images, uploads secrets and runs the control plane pod, in that order.
    ///
    /// Returns the first failure. Effects of earlier steps are left in place.
    #[instrument(
        skip_all,
        fields(cluster = %cluster.name, node = %node.name, hypervisor = %hypervisor.name())
    )]
    pub async fn reconcile<H>(
        &self,
        hypervisor: &H,
        cluster: &Cluster,
        node: &Node,
    ) -> Result<(), Error>
    where
        H: Hypervisor + ?Sized,
    {
        if !node.belongs_to(&cluster.name) {
            return Err(Error::NodeClusterMismatch {
                node: node.name.clone(),
                node_cluster: node.cluster.clone(),
                cluster: cluster.name.clone(),
            });
        }

        let secrets = SecretsDir::new(&self.config.secrets_root, cluster)?;
        let pod = descriptor::pod(&self.config, &secrets, cluster, node);

        let images = pod.images();
        hypervisor
            .pull_images(&images)
            .await
            .map_err(|source| Error::ImagePull {
                cluster: cluster.name.clone(),
                source,
            })?;
        debug!(?images, "Pulled images");

        let kubeconfigs = Kubeconfigs {
            controller_manager: self.kubeconfig(cluster, Component::ControllerManager)?,
            scheduler: self.kubeconfig(cluster, Component::Scheduler)?,
        };
        let bundle = secrets.bundle(cluster, kubeconfigs);
        hypervisor
            .upload_files(&bundle)
            .await
            .map_err(|source| Error::SecretUpload {
                cluster: cluster.name.clone(),
                source,
            })?;
        debug!(dir = %secrets.path(), files = bundle.len(), "Uploaded secrets");

        let handle = hypervisor
            .run_pod(cluster, &pod)
            .await
            .map_err(|source| Error::PodExecution {
                cluster: cluster.name.clone(),
                pod: pod.name.clone(),
                source,
            })?;
        info!(pod = %pod.name, id = %handle.id, "Control plane running");

        Ok(())
    }

    /// Reconciles `node` against the cluster and hypervisor it references.
    #[instrument(skip_all, fields(node = %node.name))]
    pub async fn reconcile_node(
        &self,
        hypervisors: &Hypervisors,
        clusters: &Clusters,
        node: &Node,
    ) -> Result<(), Error> {
        let cluster = clusters.get(&node.cluster).ok_or_else(|| Error::Lookup {
            kind: "cluster",
            name: node.cluster.clone(),
        })?;
        let hypervisor = hypervisors
            .get(&node.hypervisor_name)
            .ok_or_else(|| Error::Lookup {
                kind: "hypervisor",
                name: node.hypervisor_name.clone(),
            })?;

        self.reconcile(&**hypervisor, cluster, node).await
    }

    fn kubeconfig(&self, cluster: &Cluster, component: Component) -> Result<String, Error> {
        kubeconfig::render(&self.issuer, cluster, LOCAL_API_SERVER_ENDPOINT, component).map_err(
            |source| Error::Credentials {
                cluster: cluster.name.clone(),
                component,
                source,
            },
        )
    }
}
