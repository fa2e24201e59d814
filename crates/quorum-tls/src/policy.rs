//! Decides whether TLS should be enabled automatically during setup.

/// The strict outbound connection-security mode.
///
/// Only this exact value triggers auto-provisioning: a node that requires
/// encryption for its own outbound connections can safely assume the rest of
/// the cluster expects encryption too.
pub const SSLMODE_REQUIRE: &str = "require";

/// The outbound sslmode default that predates TLS-by-default releases.
pub const HISTORICAL_OUTBOUND_SSLMODE: &str = "prefer";

/// Returns true iff the configured outbound sslmode warrants enabling TLS
/// automatically.
///
/// Any mode looser than `require` means the operator made an explicit choice
/// not to force encryption, and the bootstrap must not override that.
#[must_use]
pub fn should_auto_enable_tls(outbound_sslmode: &str) -> bool {
    outbound_sslmode == SSLMODE_REQUIRE
}
