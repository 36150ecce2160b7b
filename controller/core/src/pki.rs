use anyhow::Result;
use std::fmt;

/// A PEM-encoded certificate and its private key.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub certificate: String,
    pub private_key: String,
}

/// A certificate authority's PEM-encoded certificate and signing key.
#[derive(Clone, PartialEq, Eq)]
pub struct CertificateAuthority {
    pub certificate: String,
    pub private_key: String,
}

/// Issues client certificates signed by an existing authority.
///
/// Key generation and signing happen outside of the reconciler; implementations must sign with
/// the provided authority rather than creating a new one.
pub trait CertificateIssuer: Send + Sync {
    fn issue_client_certificate(
        &self,
        ca: &CertificateAuthority,
        common_name: &str,
        organizations: &[&str],
    ) -> Result<KeyPair>;
}

// === impl KeyPair ===

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("certificate", &self.certificate)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

// === impl CertificateAuthority ===

impl fmt::Debug for CertificateAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CertificateAuthority")
            .field("certificate", &self.certificate)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_private_keys() {
        let pair = KeyPair {
            certificate: "CERT".to_string(),
            private_key: "SECRET".to_string(),
        };
        let out = format!("{:?}", pair);
        assert!(out.contains("CERT"));
        assert!(!out.contains("SECRET"));

        let ca = CertificateAuthority {
            certificate: "CA".to_string(),
            private_key: "SECRET".to_string(),
        };
        assert!(!format!("{:?}", ca).contains("SECRET"));
    }
}
