//! Kubeconfigs for control plane components that talk to the local API server.

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use infra_controller_core::{CertificateIssuer, Cluster};
use serde::Serialize;
use std::fmt;

/// A control plane component that authenticates to the API server with a client certificate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Component {
    ControllerManager,
    Scheduler,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Config<'a> {
    api_version: &'static str,
    kind: &'static str,
    clusters: [Named<'a, ClusterEntry>; 1],
    users: [Named<'a, UserEntry>; 1],
    contexts: [Named<'a, ContextEntry<'a>>; 1],
    #[serde(rename = "current-context")]
    current_context: &'a str,
}

#[derive(Debug, Serialize)]
struct Named<'a, T> {
    name: &'a str,
    #[serde(flatten)]
    entry: T,
}

#[derive(Debug, Serialize)]
struct ClusterEntry {
    cluster: ClusterData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct ClusterData {
    server: String,
    certificate_authority_data: String,
}

#[derive(Debug, Serialize)]
struct UserEntry {
    user: UserData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct UserData {
    client_certificate_data: String,
    client_key_data: String,
}

#[derive(Debug, Serialize)]
struct ContextEntry<'a> {
    context: ContextData<'a>,
}

#[derive(Debug, Serialize)]
struct ContextData<'a> {
    cluster: &'a str,
    user: &'a str,
}

/// Renders a kubeconfig that authenticates `component` to the cluster's API server at
/// `endpoint`.
///
/// The client certificate is issued by the cluster's existing API server client CA, and the API
/// server's CA is embedded as the trust anchor.
pub fn render(
    issuer: &dyn CertificateIssuer,
    cluster: &Cluster,
    endpoint: &str,
    component: Component,
) -> Result<String> {
    let client = issuer
        .issue_client_certificate(
            &cluster.certificate_authorities.api_server_client,
            component.common_name(),
            &[],
        )
        .with_context(|| format!("failed to issue client certificate for {}", component))?;

    let user = component.common_name();
    let config = Config {
        api_version: "v1",
        kind: "Config",
        clusters: [Named {
            name: &cluster.name,
            entry: ClusterEntry {
                cluster: ClusterData {
                    server: endpoint.to_string(),
                    certificate_authority_data: STANDARD
                        .encode(&cluster.certificate_authorities.api_server.certificate),
                },
            },
        }],
        users: [Named {
            name: user,
            entry: UserEntry {
                user: UserData {
                    client_certificate_data: STANDARD.encode(&client.certificate),
                    client_key_data: STANDARD.encode(&client.private_key),
                },
            },
        }],
        contexts: [Named {
            name: &cluster.name,
            entry: ContextEntry {
                context: ContextData {
                    cluster: &cluster.name,
                    user,
                },
            },
        }],
        current_context: &cluster.name,
    };

    serde_yaml::to_string(&config).context("failed to serialize kubeconfig")
}

// === impl Component ===

impl Component {
    /// The user the API server authenticates this component as.
    pub fn common_name(self) -> &'static str {
        match self {
            Self::ControllerManager => "system:kube-controller-manager",
            Self::Scheduler => "system:kube-scheduler",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ControllerManager => f.write_str("kube-controller-manager"),
            Self::Scheduler => f.write_str("kube-scheduler"),
        }
    }
}
