//! Host-based-authentication rule writing.
//!
//! The rules themselves are opaque descriptors; PostgreSQL owns their
//! grammar. This module only renders them into the cluster's
//! `pg_hba.conf`, which must happen before the credential phase
//! completes so peer trust rules exist before credentials reference
//! them.

use std::path::PathBuf;

use tracing::{debug, info};

use replboot_core::{HbaRule, NodeTopologyConfig};

use crate::error::ProvisionError;
use crate::fsutil::{self, Owner};

/// Collaborator seam for the pg_hba rule writer.
pub trait HbaWriter {
    /// Render the configured rules into the cluster's auth config.
    fn write_rules(&self, rules: &[HbaRule]) -> Result<(), ProvisionError>;
}

/// File-backed writer managing `pg_hba.conf` in the data directory.
#[derive(Debug, Clone)]
pub struct FileHbaWriter {
    path: PathBuf,
    owner: Owner,
}

impl FileHbaWriter {
    /// Writer for the cluster described by `config`
    /// (`<pg_data_dir>/pg_hba.conf`, owned by the service account).
    #[must_use]
    pub fn for_cluster(config: &NodeTopologyConfig) -> Self {
        Self {
            path: config.pg_data_dir.join("pg_hba.conf"),
            owner: Owner::from_config(config),
        }
    }

    /// The file this writer manages.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl HbaWriter for FileHbaWriter {
    fn write_rules(&self, rules: &[HbaRule]) -> Result<(), ProvisionError> {
        let mut content =
            String::from("# Managed by replboot. Manual edits will be overwritten.\n");
        for rule in rules {
            content.push_str(&rule.render());
            content.push('\n');
        }

        if let Some(parent) = self.path.parent() {
            fsutil::ensure_private_dir(parent, self.owner).map_err(|source| {
                ProvisionError::Io {
                    path: parent.to_path_buf(),
                    source,
                }
            })?;
        }

        let changed = fsutil::write_if_changed(&self.path, &content, 0o600, self.owner)
            .map_err(|source| ProvisionError::Io {
                path: self.path.clone(),
                source,
            })?;
        if changed {
            info!(path = %self.path.display(), rules = rules.len(), "pg_hba rules written");
        } else {
            debug!(path = %self.path.display(), "pg_hba rules already converged");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn test_config(root: &Path) -> NodeTopologyConfig {
        NodeTopologyConfig {
            node_type: "master".to_string(),
            master_address: String::new(),
            slave_addresses: Vec::new(),
            pg_hba: Vec::new(),
            pg_wal_dir: root.join("wal"),
            pg_data_dir: root.join("data"),
            service_home: root.join("home"),
            peer_public_keys: Vec::new(),
            service_uid: None,
            service_gid: None,
            initialized: false,
        }
    }

    fn replication_rule(addr: &str) -> HbaRule {
        HbaRule {
            conn_type: "host".to_string(),
            database: "replication".to_string(),
            user: "replication".to_string(),
            address: Some(addr.to_string()),
            method: "md5".to_string(),
        }
    }

    #[test]
    fn test_writes_rendered_rules() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let writer = FileHbaWriter::for_cluster(&config);

        writer
            .write_rules(&[replication_rule("10.0.0.2/32")])
            .unwrap();

        let content = fs::read_to_string(config.pg_data_dir.join("pg_hba.conf")).unwrap();
        assert!(content.starts_with("# Managed by replboot"));
        assert!(content.contains("host\treplication\treplication\t10.0.0.2/32\tmd5"));
    }

    #[test]
    fn test_rewrite_only_on_change() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let writer = FileHbaWriter::for_cluster(&config);
        let path = config.pg_data_dir.join("pg_hba.conf");

        writer
            .write_rules(&[replication_rule("10.0.0.2/32")])
            .unwrap();
        let before = fs::read_to_string(&path).unwrap();

        writer
            .write_rules(&[replication_rule("10.0.0.2/32")])
            .unwrap();
        assert_eq!(before, fs::read_to_string(&path).unwrap());

        writer
            .write_rules(&[replication_rule("10.0.0.3/32")])
            .unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("10.0.0.3/32"));
    }
}
