//! Externally-supplied configuration for the bootstrap.
//!
//! The bootstrap never reads ambient process state; the host passes the
//! credential locations in explicitly, which keeps the subsystem testable
//! against temporary directories.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Filesystem locations of the node's TLS credential files.
///
/// Both paths come from the host's configuration store; this subsystem only
/// references them, it does not own or validate them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialPaths {
    /// Where the private key PEM is (or should be) stored
    pub key_path: PathBuf,
    /// Where the certificate PEM is (or should be) stored
    pub cert_path: PathBuf,
}

impl CredentialPaths {
    /// Build from the host's configured key and certificate file settings.
    pub fn new(key_path: impl Into<PathBuf>, cert_path: impl Into<PathBuf>) -> Self {
        Self {
            key_path: key_path.into(),
            cert_path: cert_path.into(),
        }
    }
}
