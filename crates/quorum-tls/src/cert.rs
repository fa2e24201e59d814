//! Self-signed certificate construction.
//!
//! The certificate exists only to make opportunistic encryption possible
//! without operator intervention. It is deliberately minimal: one constant
//! serial, a fixed common name identifying it as auto-generated, and issuer
//! equal to subject.

use rcgen::{Certificate, CertificateParams, DistinguishedName, DnType};
use time::OffsetDateTime;

use crate::error::{Result, TlsSetupError};
use crate::keygen::NodeKeyPair;

/// Common name marking the credential as auto-generated by the bootstrap.
pub const AUTO_TLS_COMMON_NAME: &str = "quorum-auto-tls";

/// Serial number of the one certificate ever issued per node.
pub const CERTIFICATE_SERIAL: u64 = 1;

/// Build a self-signed certificate around the node's key.
///
/// Validity is `not_before == not_after == now`: the cluster does not check
/// expiry on these credentials, but the dates must be present for the
/// certificate to parse. A partially-built certificate is never returned;
/// any failure aborts with [`TlsSetupError::CertificateGeneration`].
pub fn build_self_signed(key: &NodeKeyPair) -> Result<Certificate> {
    let mut params = CertificateParams::default();

    params.serial_number = Some(CERTIFICATE_SERIAL.into());

    // TODO pick a real validity window once the product decides whether
    // these credentials should expire at all.
    let now = OffsetDateTime::now_utc();
    params.not_before = now;
    params.not_after = now;

    let mut subject = DistinguishedName::new();
    subject.push(DnType::CommonName, AUTO_TLS_COMMON_NAME);
    params.distinguished_name = subject;

    // self_signed sets issuer == subject and signs with the node's own key,
    // SHA-256 per the key's pinned algorithm.
    params
        .self_signed(key.signing_key())
        .map_err(|e| TlsSetupError::CertificateGeneration {
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::ResourceGuard;
    use crate::keygen::generate_rsa_key;
    fn certificate_der(cert_pem: &str) -> Vec<u8> {
        let block = pem::parse(cert_pem).unwrap();
        assert_eq!(block.tag(), "CERTIFICATE");
        block.contents().to_vec()
    }

    #[test]
    fn certificate_is_self_signed_with_fixed_identity() {
        let mut guard = ResourceGuard::new();
        let key = generate_rsa_key(&mut guard).unwrap();
        let certificate = build_self_signed(&key).unwrap();

        let der = certificate_der(&certificate.pem());
        let (_, parsed) = x509_parser::parse_x509_certificate(&der).unwrap();

        assert_eq!(parsed.subject().to_string(), parsed.issuer().to_string());
        let cn = parsed
            .subject()
            .iter_common_name()
            .next()
            .and_then(|attr| attr.as_str().ok());
        assert_eq!(cn, Some(AUTO_TLS_COMMON_NAME));
        assert_eq!(parsed.raw_serial(), &[1]);
    }

    #[test]
    fn validity_window_is_zero_length() {
        let mut guard = ResourceGuard::new();
        let key = generate_rsa_key(&mut guard).unwrap();
        let certificate = build_self_signed(&key).unwrap();

        let der = certificate_der(&certificate.pem());
        let (_, parsed) = x509_parser::parse_x509_certificate(&der).unwrap();

        let validity = parsed.validity();
        assert_eq!(validity.not_before, validity.not_after);
    }

    #[test]
    fn signature_verifies_against_own_key_only() {
        let mut guard = ResourceGuard::new();
        let key = generate_rsa_key(&mut guard).unwrap();
        let certificate = build_self_signed(&key).unwrap();

        let unrelated_key = generate_rsa_key(&mut guard).unwrap();
        let unrelated = build_self_signed(&unrelated_key).unwrap();

        let der = certificate_der(&certificate.pem());
        let (_, parsed) = x509_parser::parse_x509_certificate(&der).unwrap();
        let other_der = certificate_der(&unrelated.pem());
        let (_, other) = x509_parser::parse_x509_certificate(&other_der).unwrap();

        // Self-signed check: the embedded public key verifies the signature.
        assert!(parsed.verify_signature(None).is_ok());
        // An unrelated key does not.
        assert!(parsed
            .verify_signature(Some(&other.tbs_certificate.subject_pki))
            .is_err());
    }
}
