//! Orchestrates the one-time TLS bootstrap during extension install/upgrade.
//!
//! The orchestrator only sequences policy, credential provisioning and the
//! host's configuration collaborators; everything about how settings are
//! stored or reloaded lives behind [`ClusterSettings`].

use tracing::info;

use crate::error::Result;

#[cfg(feature = "tls")]
use crate::config::CredentialPaths;
#[cfg(feature = "tls")]
use crate::guard::ResourceGuard;
#[cfg(feature = "tls")]
use crate::policy;
#[cfg(feature = "tls")]
use crate::store::{self, Provisioned};

/// An opaque, well-formed configuration change request.
///
/// The subsystem never interprets the host's storage format; it only asks
/// for one of these to be persisted durably.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingChange {
    /// Turn inter-node TLS on
    EnableTls,
    /// Revert the outbound sslmode to its historical default
    /// ([`policy::HISTORICAL_OUTBOUND_SSLMODE`](crate::policy::HISTORICAL_OUTBOUND_SSLMODE))
    ResetOutboundSslMode,
}

/// The host's configuration collaborators, bundled.
///
/// Covers the durable configuration store, the reload trigger, and the
/// connection-parameter reader. Reload is invoked synchronously after every
/// change so later checks within the same administrative operation observe
/// the new values.
pub trait ClusterSettings {
    /// Is TLS currently active on this node?
    fn tls_enabled(&self) -> bool;

    /// Current value of the outbound connection-security mode setting.
    fn outbound_sslmode(&self) -> String;

    /// Durably persist a configuration change.
    fn apply(&mut self, change: SettingChange) -> Result<()>;

    /// Re-read persisted configuration into the running process.
    fn reload(&mut self) -> Result<()>;
}

/// Enable TLS automatically when the node's own settings call for it.
///
/// No-op when TLS is already on, or when the outbound sslmode is anything
/// looser than `require`. Otherwise the stored configuration is changed
/// first, credentials are provisioned if missing, and a reload makes the
/// change visible within the current operation. Any generation or
/// persistence failure aborts the enclosing administrative operation;
/// resources allocated up to that point are still released.
#[cfg(feature = "tls")]
pub fn setup_tls(settings: &mut dyn ClusterSettings, paths: &CredentialPaths) -> Result<()> {
    if settings.tls_enabled() {
        return Ok(());
    }
    if !policy::should_auto_enable_tls(&settings.outbound_sslmode()) {
        return Ok(());
    }

    info!("extension created on a node without TLS enabled, turning it on during setup");
    settings.apply(SettingChange::EnableTls)?;

    // TLS-on requires a key and certificate; chances are the operator has
    // not installed any, so provision a self-signed pair when needed. The
    // guard scopes every cryptographic resource to this bootstrap.
    let mut guard = ResourceGuard::new();
    let outcome = store::ensure_credentials(paths, &mut guard)?;
    drop(guard);

    if outcome == Provisioned::Created {
        info!(
            key = %paths.key_path.display(),
            cert = %paths.cert_path.display(),
            "self signed credentials installed"
        );
    }

    settings.reload()?;
    Ok(())
}

/// Degraded entry point for builds without cryptographic support: warn and
/// do nothing, never fail the enclosing operation.
#[cfg(not(feature = "tls"))]
pub fn setup_tls(
    _settings: &mut dyn ClusterSettings,
    _paths: &crate::config::CredentialPaths,
) -> Result<()> {
    tracing::warn!("cannot set up TLS on a node built without cryptographic support");
    Ok(())
}

/// Revert the outbound sslmode default for clusters upgraded across the
/// TLS-by-default boundary.
///
/// Called only when the fleet-wide default changed in a later release and
/// this node never opted into TLS; reinstating the old default avoids
/// silently imposing encryption overhead on an existing cluster. No
/// cryptographic content, available on every build.
pub fn reset_outbound_sslmode_default(settings: &mut dyn ClusterSettings) -> Result<()> {
    info!(
        "resetting outbound sslmode to its old default, the new default is \
         incompatible with the current TLS setting"
    );
    settings.apply(SettingChange::ResetOutboundSslMode)?;
    settings.reload()?;
    Ok(())
}
