use std::num::NonZeroU16;

/// A control plane replica placed on a hypervisor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub cluster: String,
    pub hypervisor_name: String,

    /// The hypervisor-side port mapped to the API server's secure port.
    pub host_port: NonZeroU16,

    pub role: NodeRole,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeRole {
    ControlPlane,

    /// A control plane replica that may also front the cluster's external traffic.
    ControlPlaneIngress,
}

// === impl Node ===

impl Node {
    #[inline]
    pub fn belongs_to(&self, cluster: &str) -> bool {
        self.cluster == cluster
    }

    #[inline]
    pub fn is_ingress(&self) -> bool {
        self.role == NodeRole::ControlPlaneIngress
    }
}
