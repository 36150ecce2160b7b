#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod cluster;
pub mod hypervisor;
pub mod node;
pub mod pki;
pub mod pod;

pub use self::{
    cluster::{CertificateAuthorities, Cluster, Clusters, NameError},
    hypervisor::{Hypervisor, PodHandle},
    node::{Node, NodeRole},
    pki::{CertificateAuthority, CertificateIssuer, KeyPair},
    pod::{Container, Pod},
};

/// The address at which control plane components reach their local API server.
pub const LOCAL_API_SERVER_ENDPOINT: &str = "https://127.0.0.1:6443";

/// The API server's secure port inside its container.
pub const API_SERVER_SECURE_PORT: u16 = 6443;
