//! # quorum-tls
//!
//! Automatic TLS bootstrap for QuorumDB cluster nodes.
//!
//! When the extension is first created on a node, this crate decides whether
//! inter-node encryption should be turned on by default and, if so, makes
//! sure a private key and matching certificate exist at the configured
//! locations — generating a self-signed RSA-2048 pair when none is
//! installed. It also carries the compensating upgrade step that reverts the
//! outbound sslmode default on clusters that never opted into TLS.
//!
//! ## Data Flow
//!
//! ```text
//! setup_tls()
//!   ├── already on? ──────────────────────────────► no-op
//!   ├── policy::should_auto_enable_tls("require"?) ► no-op unless strict
//!   ├── settings.apply(EnableTls)
//!   ├── store::ensure_credentials()
//!   │     ├── certificate parseable on disk? ─────► AlreadyPresent
//!   │     └── keygen → cert → write key, write cert (ResourceGuard scoped)
//!   └── settings.reload()
//! ```
//!
//! The subsystem is deliberately narrow: one long-lived self-signed leaf
//! certificate per node, no CA, no renewal, no revocation. Credentials are
//! never refreshed once a parseable certificate exists.
//!
//! Everything host-specific (how settings are stored, how reloads happen) is
//! behind the [`ClusterSettings`] trait; the two callable entry points are
//! [`setup_tls`] and [`reset_outbound_sslmode_default`]. On builds without
//! the `tls` feature, `setup_tls` logs a warning and does nothing.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod guard;
pub mod policy;

#[cfg(feature = "tls")]
pub mod cert;
#[cfg(feature = "tls")]
pub mod keygen;
#[cfg(feature = "tls")]
pub mod store;

pub use bootstrap::{reset_outbound_sslmode_default, setup_tls, ClusterSettings, SettingChange};
pub use config::CredentialPaths;
pub use error::{CredentialKind, Result, TlsSetupError};
pub use guard::ResourceGuard;

#[cfg(feature = "tls")]
pub use store::{ensure_credentials, Provisioned};
