//! Renders a control plane pod as a Kubernetes static pod manifest.

use crate::descriptor::KUBE_APISERVER;
use infra_controller_core::Pod;
use k8s_openapi::{
    api::core::v1::{self as k8s, ContainerPort, HostPathVolumeSource, Volume, VolumeMount},
    apimachinery::pkg::apis::meta::v1::ObjectMeta,
};
use std::collections::BTreeMap;

const NAMESPACE: &str = "kube-system";

/// Converts `pod` into a static pod.
///
/// Each distinct hypervisor path becomes a `hostPath` volume, and the port map is published on
/// the API server container.
pub fn static_pod(pod: &Pod) -> k8s::Pod {
    let volume_names = pod
        .containers
        .iter()
        .flat_map(|c| c.mounts.keys())
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .enumerate()
        .map(|(i, path)| (path.clone(), format!("secrets-{i}")))
        .collect::<BTreeMap<_, _>>();

    let containers = pod
        .containers
        .iter()
        .map(|c| {
            let ports = (c.name == KUBE_APISERVER).then(|| {
                pod.ports
                    .iter()
                    .map(|(host, container)| ContainerPort {
                        container_port: i32::from(*container),
                        host_port: Some(i32::from(*host)),
                        protocol: Some("TCP".to_string()),
                        ..Default::default()
                    })
                    .collect()
            });
            let volume_mounts = c
                .mounts
                .iter()
                .map(|(host, container)| VolumeMount {
                    name: volume_names[host].clone(),
                    mount_path: container.clone(),
                    ..Default::default()
                })
                .collect::<Vec<_>>();

            k8s::Container {
                name: c.name.clone(),
                image: Some(c.image.clone()),
                command: Some(c.command.clone()),
                args: (!c.args.is_empty()).then(|| c.args.clone()),
                ports,
                volume_mounts: (!volume_mounts.is_empty()).then_some(volume_mounts),
                ..Default::default()
            }
        })
        .collect();

    let volumes = volume_names
        .into_iter()
        .map(|(path, name)| Volume {
            name,
            host_path: Some(HostPathVolumeSource {
                path,
                type_: Some("DirectoryOrCreate".to_string()),
            }),
            ..Default::default()
        })
        .collect::<Vec<_>>();

    k8s::Pod {
        metadata: ObjectMeta {
            name: Some(pod.name.clone()),
            namespace: Some(NAMESPACE.to_string()),
            ..Default::default()
        },
        spec: Some(k8s::PodSpec {
            containers,
            volumes: (!volumes.is_empty()).then_some(volumes),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        control_plane_pod,
        tests::{mk_cluster, mk_node},
        ControlPlaneConfig,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn publishes_the_api_server_port() {
        let pod = control_plane_pod(
            &ControlPlaneConfig::default(),
            &mk_cluster("demo"),
            &mk_node("n1", "demo", "hv-a", 30000),
        )
        .expect("pod must render");

        let static_pod = static_pod(&pod);
        assert_eq!(static_pod.metadata.name.as_deref(), Some("control-plane-demo"));

        let spec = static_pod.spec.expect("pod must have a spec");
        let ports = spec
            .containers
            .iter()
            .filter_map(|c| Some((c.name.as_str(), c.ports.as_ref()?)))
            .collect::<Vec<_>>();
        assert_eq!(ports.len(), 1);
        let (name, ports) = ports[0];
        assert_eq!(name, "kube-apiserver");
        assert_eq!(ports[0].container_port, 6443);
        assert_eq!(ports[0].host_port, Some(30000));
    }

    #[test]
    fn shares_one_volume_for_the_secrets_directory() {
        let pod = control_plane_pod(
            &ControlPlaneConfig::default(),
            &mk_cluster("demo"),
            &mk_node("n1", "demo", "hv-a", 30000),
        )
        .expect("pod must render");

        let spec = static_pod(&pod).spec.expect("pod must have a spec");
        let volumes = spec.volumes.expect("pod must have volumes");
        assert_eq!(volumes.len(), 1);
        assert_eq!(volumes[0].name, "secrets-0");
        assert_eq!(
            volumes[0].host_path.as_ref().map(|h| h.path.as_str()),
            Some("/etc/kubernetes/oneinfra/clusters/demo")
        );

        for c in &spec.containers {
            let mounts = c.volume_mounts.as_ref().expect("container must mount secrets");
            assert_eq!(mounts[0].name, "secrets-0");
            assert_eq!(mounts[0].mount_path, "/etc/kubernetes/oneinfra/clusters/demo");
        }
    }
}
