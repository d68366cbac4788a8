//! # replboot
//!
//! Bootstraps a two-node (master/slave) PostgreSQL replication
//! topology: resolves the node's role, provisions the SSH key material
//! used to rsync WAL segments between the nodes, and idempotently
//! transitions the node from unconfigured to replication-configured
//! across repeated convergence passes.
//!
//! # Two-phase bootstrap
//!
//! Slave bootstrap (base backup, WAL catch-up) needs SSH trust to
//! already be mutual, and trust setup on one node depends on the peer's
//! public key being available. The first pass across the fleet is
//! therefore dedicated purely to key exchange:
//!
//! ```text
//! Uninitialized --pass 1--> CredentialsReady   (keys written,
//!                                               initialized = true,
//!                                               role apply deferred)
//! CredentialsReady --pass 2--> RoleApplied     (master or slave
//!                                               replication config)
//! ```
//!
//! Every step is convergent: a pass re-run with identical inputs is a
//! no-op, and a failed pass is safely retried from scratch.
//!
//! # Collaborator seams
//!
//! The database engine's own replication machinery sits behind the
//! [`ReplicationEngine`] trait and the pg_hba rule writer behind
//! [`HbaWriter`]; production implementations only write configuration
//! artifacts — the replication protocol itself stays in PostgreSQL.

pub mod configure;
pub mod engine;
pub mod error;
mod fsutil;
pub mod hba;
pub mod orchestrator;
pub mod provision;
pub mod resolver;

// Re-exports for convenience.
pub use engine::{PostgresEngine, ReplicationEngine};
pub use error::{ApplyError, BootstrapError, ProvisionError};
pub use hba::{FileHbaWriter, HbaWriter};
pub use orchestrator::{BootstrapOrchestrator, ConvergenceReport};
pub use replboot_core::{
    BootstrapPhase, BootstrapState, ConfigError, CredentialBundle, HbaRule, NodeRole,
    NodeTopologyConfig,
};

/// Result type for replboot operations.
pub type Result<T> = std::result::Result<T, BootstrapError>;
