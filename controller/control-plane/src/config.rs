pub const DEFAULT_STORAGE_SHIM_IMAGE: &str = "oneinfra/kine:latest";
pub const DEFAULT_KUBE_APISERVER_IMAGE: &str = "k8s.gcr.io/kube-apiserver:v1.17.0";
pub const DEFAULT_KUBE_CONTROLLER_MANAGER_IMAGE: &str =
    "k8s.gcr.io/kube-controller-manager:v1.17.0";
pub const DEFAULT_KUBE_SCHEDULER_IMAGE: &str = "k8s.gcr.io/kube-scheduler:v1.17.0";
pub const DEFAULT_SECRETS_ROOT: &str = "/etc/kubernetes/oneinfra/clusters";

/// Configures the shape of every control plane the reconciler renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlPlaneConfig {
    pub images: Images,

    /// The hypervisor directory under which each cluster gets its own secrets directory.
    pub secrets_root: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Images {
    pub storage_shim: String,
    pub kube_apiserver: String,
    pub kube_controller_manager: String,
    pub kube_scheduler: String,
}

// === impl ControlPlaneConfig ===

impl Default for ControlPlaneConfig {
    fn default() -> Self {
        Self {
            images: Images::default(),
            secrets_root: DEFAULT_SECRETS_ROOT.to_string(),
        }
    }
}

// === impl Images ===

impl Default for Images {
    fn default() -> Self {
        Self {
            storage_shim: DEFAULT_STORAGE_SHIM_IMAGE.to_string(),
            kube_apiserver: DEFAULT_KUBE_APISERVER_IMAGE.to_string(),
            kube_controller_manager: DEFAULT_KUBE_CONTROLLER_MANAGER_IMAGE.to_string(),
            kube_scheduler: DEFAULT_KUBE_SCHEDULER_IMAGE.to_string(),
        }
    }
}
