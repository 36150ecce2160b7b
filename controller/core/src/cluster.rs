use crate::pki::{CertificateAuthority, KeyPair};
use std::collections::BTreeMap;
use thiserror::Error;

/// Clusters indexed by name.
pub type Clusters = BTreeMap<String, Cluster>;

/// A tenant cluster's identity and certificate material.
///
/// Certificates are generated and rotated elsewhere; a `Cluster` value is a snapshot that stays
/// unchanged for the duration of a reconcile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cluster {
    pub name: String,
    pub certificate_authorities: CertificateAuthorities,

    /// The API server's serving certificate and key.
    pub api_server: KeyPair,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CertificateAuthorities {
    /// Issued the API server's serving certificate. Clients trust it to reach the API server.
    pub api_server: CertificateAuthority,

    /// Signs the client certificates the API server accepts.
    pub api_server_client: CertificateAuthority,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("cluster name must not be empty")]
    Empty,

    #[error("cluster name {0:?} must not contain a path separator")]
    Separator(String),

    #[error("cluster name {0:?} must not be a dot segment")]
    DotSegment(String),
}

// === impl Cluster ===

impl Cluster {
    /// Checks that the cluster name can be used as a single filesystem path segment.
    ///
    /// Secrets and pods are namespaced by cluster name, so a name that escapes its segment could
    /// collide with another cluster's files on a shared hypervisor.
    pub fn validate_name(&self) -> Result<(), NameError> {
        validate_name(&self.name)
    }
}

pub fn validate_name(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name.contains('/') || name.contains('\\') {
        return Err(NameError::Separator(name.to_string()));
    }
    if name == "." || name == ".." {
        return Err(NameError::DotSegment(name.to_string()));
    }
    Ok(())
}
