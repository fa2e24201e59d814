use std::fmt;
use std::io;

use thiserror::Error;

/// Result type alias for TLS bootstrap operations
pub type Result<T> = std::result::Result<T, TlsSetupError>;

/// Which of the two credential files an operation was touching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    /// The node's private key file
    PrivateKey,
    /// The node's certificate file
    Certificate,
}

impl CredentialKind {
    /// Human-readable name used in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PrivateKey => "private key",
            Self::Certificate => "certificate",
        }
    }
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while bootstrapping TLS on a node.
///
/// All of these are fatal to the enclosing administrative operation; the
/// one non-fatal condition (a build without cryptographic support) is
/// reported as a warning by [`crate::setup_tls`] instead of an error.
#[derive(Error, Debug)]
pub enum TlsSetupError {
    /// The RNG or modular-exponentiation primitives failed
    #[error("unable to generate RSA private key: {reason}")]
    KeyGeneration {
        /// Failure reported by the crypto backend
        reason: String,
    },

    /// Building or signing the self-signed certificate failed
    #[error("unable to create self-signed certificate: {reason}")]
    CertificateGeneration {
        /// Failure reported by the certificate builder
        reason: String,
    },

    /// A credential file could not be opened for writing
    #[error("unable to open {kind} file '{path}' for writing")]
    OpenForWrite {
        /// Which file was being opened
        kind: CredentialKind,
        /// The configured path
        path: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A credential file was opened but the PEM payload could not be written
    #[error("unable to store {kind} in '{path}'")]
    WriteCredential {
        /// Which file was being written
        kind: CredentialKind,
        /// The configured path
        path: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The configuration collaborator rejected a change or reload request
    #[error("unable to update cluster settings: {reason}")]
    Settings {
        /// Failure reported by the collaborator
        reason: String,
    },
}

impl TlsSetupError {
    /// Returns the credential file involved, if this is a persistence error.
    #[must_use]
    pub const fn credential_kind(&self) -> Option<CredentialKind> {
        match self {
            Self::OpenForWrite { kind, .. } | Self::WriteCredential { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Returns true if the error happened while persisting credentials.
    #[must_use]
    pub const fn is_persistence_error(&self) -> bool {
        self.credential_kind().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_for_write_message_names_kind_and_path() {
        let err = TlsSetupError::OpenForWrite {
            kind: CredentialKind::PrivateKey,
            path: "/etc/quorumdb/server.key".to_string(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert_eq!(
            err.to_string(),
            "unable to open private key file '/etc/quorumdb/server.key' for writing"
        );
        assert_eq!(err.credential_kind(), Some(CredentialKind::PrivateKey));
        assert!(err.is_persistence_error());
    }

    #[test]
    fn generation_errors_carry_no_credential_kind() {
        let err = TlsSetupError::KeyGeneration {
            reason: "rng failure".to_string(),
        };
        assert_eq!(err.credential_kind(), None);
        assert!(!err.is_persistence_error());
    }
}
