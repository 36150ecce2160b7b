use crate::{Cluster, Pod};
use anyhow::Result;
use std::collections::BTreeMap;

/// Models the remote execution capabilities of a hypervisor.
///
/// Every operation is expected to be idempotent: pulling a present image, uploading identical
/// files, or running a pod that is already running all succeed. Retries and timeouts are the
/// implementation's concern.
#[async_trait::async_trait]
pub trait Hypervisor: Send + Sync {
    fn name(&self) -> &str;

    async fn pull_images(&self, images: &[String]) -> Result<()>;

    /// Writes each file's content to its path on the hypervisor.
    async fn upload_files(&self, files: &BTreeMap<String, String>) -> Result<()>;

    async fn run_pod(&self, cluster: &Cluster, pod: &Pod) -> Result<PodHandle>;
}

/// Identifies a pod running on a hypervisor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PodHandle {
    pub id: String,
}
