#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

//! Selects the node that serves as a cluster's external endpoint.

use infra_controller_core::{Clusters, Node};
use std::cmp::Ordering;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IngressError {
    #[error("cluster {0:?} not found")]
    ClusterNotFound(String),

    #[error("cluster {0:?} has no ingress node")]
    NoIngressNode(String),

    #[error("cluster {cluster:?} has multiple ingress nodes named {node:?} on different hypervisors")]
    AmbiguousIngressNode { cluster: String, node: String },
}

/// Returns the node that fronts external traffic for `cluster`.
///
/// The roster may include nodes of other clusters. When several of the cluster's nodes are
/// eligible, the one with the lexicographically smallest name is selected so that repeated calls
/// against the same roster agree.
pub fn ingress_node<'n>(
    clusters: &Clusters,
    nodes: &'n [Node],
    cluster: &str,
) -> Result<&'n Node, IngressError> {
    let mut members = nodes.iter().filter(|n| n.belongs_to(cluster)).peekable();
    if members.peek().is_none() && !clusters.contains_key(cluster) {
        return Err(IngressError::ClusterNotFound(cluster.to_string()));
    }

    let mut selected: Option<&'n Node> = None;
    let mut tied = false;
    for node in members.filter(|n| n.is_ingress()) {
        trace!(node = %node.name, hypervisor = %node.hypervisor_name, "Eligible");
        let Some(current) = selected else {
            selected = Some(node);
            continue;
        };
        match node.name.cmp(&current.name) {
            Ordering::Less => {
                selected = Some(node);
                tied = false;
            }
            // The same node listed twice is harmless; the same name on two hypervisors is not.
            Ordering::Equal => tied |= node.hypervisor_name != current.hypervisor_name,
            Ordering::Greater => {}
        }
    }

    let node = selected.ok_or_else(|| IngressError::NoIngressNode(cluster.to_string()))?;
    if tied {
        return Err(IngressError::AmbiguousIngressNode {
            cluster: cluster.to_string(),
            node: node.name.clone(),
        });
    }

    debug!(%cluster, node = %node.name, hypervisor = %node.hypervisor_name, "Selected ingress node");
    Ok(node)
}

/// Returns the name of the hypervisor hosting `cluster`'s ingress node.
pub fn ingress_hypervisor_name<'n>(
    clusters: &Clusters,
    nodes: &'n [Node],
    cluster: &str,
) -> Result<&'n str, IngressError> {
    ingress_node(clusters, nodes, cluster).map(|n| n.hypervisor_name.as_str())
}

#[cfg(test)]
mod tests;
