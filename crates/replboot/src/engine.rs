//! Replication engine collaborator.
//!
//! The engine trait is the seam to PostgreSQL's own replication
//! machinery. The production implementation only produces
//! configuration artifacts — streaming replication and WAL replay stay
//! entirely inside PostgreSQL.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use replboot_core::NodeTopologyConfig;

use crate::error::ApplyError;
use crate::fsutil::{self, Owner};

/// Database-engine collaborator for role-specific replication setup.
pub trait ReplicationEngine {
    /// Publish the WAL archive location and allow slave connections.
    fn configure_master(&self, config: &NodeTopologyConfig) -> Result<(), ApplyError>;

    /// Point the server at the master for streaming replication, with
    /// shipped WAL segments as the catch-up fallback.
    fn configure_slave(&self, config: &NodeTopologyConfig) -> Result<(), ApplyError>;
}

/// Production engine: writes a managed configuration fragment into the
/// cluster's `conf.d/` and, for slaves, drops `standby.signal`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresEngine;

impl PostgresEngine {
    /// Location of the managed config fragment for `config`'s cluster,
    /// whether or not it exists yet.
    #[must_use]
    pub fn fragment_path(config: &NodeTopologyConfig) -> PathBuf {
        config.pg_data_dir.join("conf.d").join("replication.conf")
    }

    fn write_fragment(
        config: &NodeTopologyConfig,
        content: &str,
    ) -> Result<(), ApplyError> {
        let path = Self::fragment_path(config);
        let owner = Owner::from_config(config);

        if let Some(parent) = path.parent() {
            fsutil::ensure_private_dir(parent, owner).map_err(|source| ApplyError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let changed = Self::write(&path, content, owner)?;
        if changed {
            info!(path = %path.display(), "replication config fragment written");
        } else {
            debug!(path = %path.display(), "replication config fragment already converged");
        }
        Ok(())
    }

    fn write(path: &Path, content: &str, owner: Owner) -> Result<bool, ApplyError> {
        fsutil::write_if_changed(path, content, 0o600, owner).map_err(|source| ApplyError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl ReplicationEngine for PostgresEngine {
    fn configure_master(&self, config: &NodeTopologyConfig) -> Result<(), ApplyError> {
        let wal_dir = config.pg_wal_dir.display();
        let content = format!(
            "# Managed by replboot. Master replication settings.\n\
             wal_level = replica\n\
             max_wal_senders = 10\n\
             archive_mode = on\n\
             archive_command = 'test ! -f {wal_dir}/%f && cp %p {wal_dir}/%f'\n"
        );
        Self::write_fragment(config, &content)
    }

    fn configure_slave(&self, config: &NodeTopologyConfig) -> Result<(), ApplyError> {
        let wal_dir = config.pg_wal_dir.display();
        let master = &config.master_address;
        let content = format!(
            "# Managed by replboot. Slave replication settings.\n\
             hot_standby = on\n\
             primary_conninfo = 'host={master} user=replication application_name=replboot'\n\
             restore_command = 'cp {wal_dir}/%f %p'\n"
        );
        Self::write_fragment(config, &content)?;

        // Presence of standby.signal is what puts the server in
        // standby mode; content is irrelevant.
        let signal = config.pg_data_dir.join("standby.signal");
        Self::write(&signal, "", Owner::from_config(config))?;
        Ok(())
    }
}
