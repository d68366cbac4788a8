//! The bootstrap state machine.
//!
//! One convergence pass per invocation:
//!
//! 1. Resolve the role. Failure aborts before any side effect.
//! 2. Write the hba rules, then ensure credentials (every pass).
//! 3. If `initialized` was already true entering the run, apply the
//!    role configuration and reach `RoleApplied`. Otherwise set
//!    `initialized = true` and stop at `CredentialsReady` — role apply
//!    is deferred to the next pass so that key exchange across the
//!    fleet completes before any node tries to sync from its peer.
//!
//! The orchestrator mutates exactly the `initialized` field and returns
//! the updated config; persisting it is the caller's job.

use tracing::info;

use replboot_core::{
    BootstrapPhase, BootstrapState, CredentialBundle, NodeRole, NodeTopologyConfig,
};

use crate::engine::ReplicationEngine;
use crate::hba::HbaWriter;
use crate::{configure, provision, resolver, Result};

/// Drives the idempotent two-phase bootstrap over its collaborators.
#[derive(Debug)]
pub struct BootstrapOrchestrator<E, H> {
    engine: E,
    hba: H,
}

/// Outcome of one successful convergence pass.
#[derive(Debug)]
pub struct ConvergenceReport {
    /// Role this node resolved to.
    pub role: NodeRole,
    /// State the pass converged to (`CredentialsReady` or `RoleApplied`).
    pub state: BootstrapState,
    /// Key material ensured during the pass.
    pub credentials: CredentialBundle,
    /// The topology config, with `initialized` possibly flipped to
    /// true. The caller persists this.
    pub config: NodeTopologyConfig,
}

impl<E: ReplicationEngine, H: HbaWriter> BootstrapOrchestrator<E, H> {
    /// Build an orchestrator over the engine and hba collaborators.
    pub const fn new(engine: E, hba: H) -> Self {
        Self { engine, hba }
    }

    /// Run one convergence pass.
    ///
    /// Each step is idempotent; on failure the caller's remedy is to
    /// fix the underlying cause and re-run. `initialized` is only set
    /// after credential provisioning succeeded, and never unset.
    pub fn converge(&self, mut config: NodeTopologyConfig) -> Result<ConvergenceReport> {
        // Pre-flight: an invalid role is fatal and nothing may have
        // touched the filesystem yet.
        let role = resolver::resolve(&config)?;
        let phase = BootstrapPhase::from_initialized(config.initialized);
        info!(%role, %phase, "starting replication convergence pass");

        // Peer trust rules must exist before the credentials that
        // reference them.
        self.hba.write_rules(&config.pg_hba)?;
        let credentials = provision::ensure(&config)?;

        let state = match phase {
            BootstrapPhase::RoleApply => {
                configure::apply(role, &config, &self.engine)?;
                BootstrapState::RoleApplied
            }
            BootstrapPhase::CredentialSetup => {
                // First pass: keys only. The peer may not have our
                // public key yet, so role apply waits for the next run.
                config.initialized = true;
                info!("first pass complete, role configuration deferred to next run");
                BootstrapState::CredentialsReady
            }
        };

        Ok(ConvergenceReport {
            role,
            state,
            credentials,
            config,
        })
    }
}
