//! Error types for the bootstrap pipeline.
//!
//! Three stages, three errors: `ConfigError` (pre-flight, no side
//! effects yet), [`ProvisionError`] (credential setup; `initialized`
//! untouched, safe to retry), [`ApplyError`] (role-specific setup; the
//! delegated engine's detail is surfaced unwrapped).

use std::path::PathBuf;
use thiserror::Error;

use replboot_core::ConfigError;

/// Errors during credential provisioning.
///
/// Always fatal for the run. Partial credential state is not valid:
/// the orchestrator never proceeds to role configuration past one of
/// these, and `initialized` is left unchanged so the retry redoes the
/// whole phase.
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// Filesystem or permission failure while writing an artifact.
    #[error("filesystem error at {path}: {source}")]
    Io {
        /// Artifact path involved.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Key generation, parsing, or encoding failed.
    #[error("ssh key error: {0}")]
    Key(#[from] ssh_key::Error),
}

/// Errors from role-specific setup.
///
/// Propagated without extra wrapping; the replication engine's own
/// message is more informative than any wrapper could be.
#[derive(Error, Debug)]
pub enum ApplyError {
    /// Filesystem failure while writing engine configuration.
    #[error("filesystem error at {path}: {source}")]
    Io {
        /// Artifact path involved.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failure reported by the replication engine collaborator.
    #[error("{0}")]
    Engine(String),
}

/// Top-level error for a convergence pass.
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// Configuration invalid (including an unrecognized role). Aborts
    /// before any side effect.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Credential provisioning failed.
    #[error(transparent)]
    Provision(#[from] ProvisionError),

    /// Role-specific configuration failed.
    #[error(transparent)]
    Apply(#[from] ApplyError),
}
