use std::collections::BTreeMap;

/// A set of containers run together on a hypervisor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pod {
    pub name: String,
    pub containers: Vec<Container>,

    /// Maps hypervisor ports to container ports.
    pub ports: BTreeMap<u16, u16>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Container {
    pub name: String,
    pub image: String,
    pub command: Vec<String>,
    pub args: Vec<String>,

    /// Maps hypervisor paths to container paths.
    pub mounts: BTreeMap<String, String>,
}

// === impl Pod ===

impl Pod {
    /// Returns the images referenced by the pod's containers, in container order and without
    /// duplicates.
    pub fn images(&self) -> Vec<String> {
        let mut images = Vec::with_capacity(self.containers.len());
        for c in &self.containers {
            if !images.contains(&c.image) {
                images.push(c.image.clone());
            }
        }
        images
    }
}
