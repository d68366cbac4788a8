//! Role-specific configuration dispatch.

use tracing::info;

use replboot_core::{NodeRole, NodeTopologyConfig};

use crate::engine::ReplicationEngine;
use crate::error::ApplyError;

/// Apply the setup procedure for the resolved role.
///
/// Must only be invoked once credentials are confirmed present (the
/// orchestrator sequences this). Engine failures propagate unchanged.
/// The match is exhaustive over the two-variant role, so no third
/// branch can be reached after resolution.
pub fn apply<E: ReplicationEngine + ?Sized>(
    role: NodeRole,
    config: &NodeTopologyConfig,
    engine: &E,
) -> Result<(), ApplyError> {
    match role {
        NodeRole::Master => {
            info!(slaves = config.slave_addresses.len(), "configuring master replication");
            engine.configure_master(config)
        }
        NodeRole::Slave => {
            info!(master = %config.master_address, "configuring slave replication");
            engine.configure_slave(config)
        }
    }
}
