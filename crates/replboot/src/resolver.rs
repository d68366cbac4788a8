//! Role resolution: the pre-flight validation of `node_type`.

use replboot_core::{ConfigError, NodeRole, NodeTopologyConfig};

/// Resolve the configured node role.
///
/// Pure, no side effects. A failure here is fatal and must abort the
/// run before any filesystem activity; the orchestrator guarantees
/// this by resolving first.
pub fn resolve(config: &NodeTopologyConfig) -> Result<NodeRole, ConfigError> {
    config.node_type.parse()
}
