use super::*;
use infra_controller_core::{
    CertificateAuthorities, CertificateAuthority, Cluster, KeyPair, NodeRole,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::num::NonZeroU16;

fn mk_cluster(name: &str) -> Cluster {
    let ca = || CertificateAuthority {
        certificate: format!("{name}-ca.crt"),
        private_key: format!("{name}-ca.key"),
    };
    Cluster {
        name: name.to_string(),
        certificate_authorities: CertificateAuthorities {
            api_server: ca(),
            api_server_client: ca(),
        },
        api_server: KeyPair {
            certificate: format!("{name}-apiserver.crt"),
            private_key: format!("{name}-apiserver.key"),
        },
    }
}

fn mk_clusters(names: &[&str]) -> Clusters {
    names
        .iter()
        .map(|name| (name.to_string(), mk_cluster(name)))
        .collect()
}

fn mk_node(name: &str, cluster: &str, hypervisor: &str, ingress: bool) -> Node {
    Node {
        name: name.to_string(),
        cluster: cluster.to_string(),
        hypervisor_name: hypervisor.to_string(),
        host_port: NonZeroU16::new(30000).unwrap(),
        role: if ingress {
            NodeRole::ControlPlaneIngress
        } else {
            NodeRole::ControlPlane
        },
    }
}

#[test]
fn selects_the_eligible_node() {
    let clusters = mk_clusters(&["demo"]);
    let nodes = vec![
        mk_node("n1", "demo", "hv-a", true),
        mk_node("n2", "demo", "hv-b", false),
    ];

    assert_eq!(
        ingress_hypervisor_name(&clusters, &nodes, "demo"),
        Ok("hv-a")
    );
    assert_eq!(ingress_node(&clusters, &nodes, "demo"), Ok(&nodes[0]));
}

#[test]
fn ignores_other_clusters_nodes() {
    let clusters = mk_clusters(&["demo", "other"]);
    let nodes = vec![
        mk_node("a", "other", "hv-x", true),
        mk_node("n2", "demo", "hv-b", false),
        mk_node("n1", "demo", "hv-a", true),
    ];

    assert_eq!(
        ingress_hypervisor_name(&clusters, &nodes, "demo"),
        Ok("hv-a")
    );
    assert_eq!(
        ingress_hypervisor_name(&clusters, &nodes, "other"),
        Ok("hv-x")
    );
}

#[test]
fn unknown_cluster() {
    let clusters = mk_clusters(&["demo"]);
    let nodes = vec![mk_node("n1", "demo", "hv-a", true)];

    assert_eq!(
        ingress_node(&clusters, &nodes, "unknown-cluster"),
        Err(IngressError::ClusterNotFound("unknown-cluster".to_string()))
    );
}

#[test]
fn nodes_identify_a_cluster_missing_from_the_cluster_set() {
    let clusters = Clusters::new();
    let nodes = vec![mk_node("n1", "demo", "hv-a", true)];

    assert_eq!(
        ingress_hypervisor_name(&clusters, &nodes, "demo"),
        Ok("hv-a")
    );
}

#[test]
fn known_cluster_without_nodes() {
    let clusters = mk_clusters(&["demo"]);

    assert_eq!(
        ingress_node(&clusters, &[], "demo"),
        Err(IngressError::NoIngressNode("demo".to_string()))
    );
}

#[test]
fn no_eligible_node() {
    let clusters = mk_clusters(&["demo"]);
    let nodes = vec![
        mk_node("n1", "demo", "hv-a", false),
        mk_node("n2", "demo", "hv-b", false),
        mk_node("n3", "other", "hv-c", true),
    ];

    assert_eq!(
        ingress_node(&clusters, &nodes, "demo"),
        Err(IngressError::NoIngressNode("demo".to_string()))
    );
}

#[rstest]
#[case::sorted(&["n1", "n2", "n3"])]
#[case::reversed(&["n3", "n2", "n1"])]
#[case::shuffled(&["n2", "n3", "n1"])]
fn smallest_eligible_name_wins(#[case] order: &[&str]) {
    let clusters = mk_clusters(&["demo"]);
    let nodes = order
        .iter()
        .map(|name| mk_node(name, "demo", &format!("hv-{name}"), true))
        .collect::<Vec<_>>();

    assert_eq!(
        ingress_hypervisor_name(&clusters, &nodes, "demo"),
        Ok("hv-n1")
    );
}

#[test]
fn repeated_calls_agree() {
    let clusters = mk_clusters(&["demo"]);
    let nodes = vec![
        mk_node("b", "demo", "hv-b", true),
        mk_node("c", "demo", "hv-c", false),
        mk_node("a", "demo", "hv-a", true),
    ];

    let first = ingress_hypervisor_name(&clusters, &nodes, "demo");
    for _ in 0..16 {
        assert_eq!(ingress_hypervisor_name(&clusters, &nodes, "demo"), first);
    }
    assert_eq!(first, Ok("hv-a"));
}

#[test]
fn same_name_on_different_hypervisors_is_ambiguous() {
    let clusters = mk_clusters(&["demo"]);
    let nodes = vec![
        mk_node("n1", "demo", "hv-a", true),
        mk_node("n1", "demo", "hv-b", true),
        mk_node("n2", "demo", "hv-c", true),
    ];

    assert_eq!(
        ingress_node(&clusters, &nodes, "demo"),
        Err(IngressError::AmbiguousIngressNode {
            cluster: "demo".to_string(),
            node: "n1".to_string(),
        })
    );
}

#[test]
fn a_tie_on_a_larger_name_is_not_ambiguous() {
    let clusters = mk_clusters(&["demo"]);
    let nodes = vec![
        mk_node("n2", "demo", "hv-b", true),
        mk_node("n2", "demo", "hv-c", true),
        mk_node("n1", "demo", "hv-a", true),
    ];

    assert_eq!(
        ingress_hypervisor_name(&clusters, &nodes, "demo"),
        Ok("hv-a")
    );
}

#[test]
fn duplicate_entries_are_not_ambiguous() {
    let clusters = mk_clusters(&["demo"]);
    let nodes = vec![
        mk_node("n1", "demo", "hv-a", true),
        mk_node("n1", "demo", "hv-a", true),
    ];

    assert_eq!(
        ingress_hypervisor_name(&clusters, &nodes, "demo"),
        Ok("hv-a")
    );
}
