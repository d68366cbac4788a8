//! Node topology configuration.
//!
//! The topology config is the single persisted input to a convergence
//! pass. The orchestrator reads every field and mutates exactly one:
//! the `initialized` flag that splits bootstrap into its two phases.
//! Callers persist the returned config with [`NodeTopologyConfig::save`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Topology configuration for one node of a master/slave pair.
///
/// The address and hba fields may be populated by hand or by a
/// discovery service; this crate is agnostic to their origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeTopologyConfig {
    /// Intended role: `"master"` or `"slave"` (case-sensitive).
    pub node_type: String,

    /// Network address of the master. Consumed by the slave role to
    /// know where to stream from.
    #[serde(default)]
    pub master_address: String,

    /// Addresses of the slaves. Consumed by the master role for
    /// connection/auth rules.
    #[serde(default)]
    pub slave_addresses: Vec<String>,

    /// Host-based-authentication rules to render into `pg_hba.conf`.
    #[serde(default)]
    pub pg_hba: Vec<HbaRule>,

    /// Directory where shipped WAL segments are staged.
    pub pg_wal_dir: PathBuf,

    /// PostgreSQL data directory (receives the managed replication
    /// config fragment and, on slaves, `standby.signal`).
    pub pg_data_dir: PathBuf,

    /// Home directory of the database service account; `.ssh/` and the
    /// key material live underneath it.
    #[serde(default = "default_service_home")]
    pub service_home: PathBuf,

    /// Additional OpenSSH public key lines to authorize (typically the
    /// peer's key, populated by discovery).
    #[serde(default)]
    pub peer_public_keys: Vec<String>,

    /// Uid of the service account. Ownership of created artifacts is
    /// applied only when both uid and gid are set.
    #[serde(default)]
    pub service_uid: Option<u32>,

    /// Gid of the service account.
    #[serde(default)]
    pub service_gid: Option<u32>,

    /// Whether the credential-setup pass has completed. Transitions
    /// only false -> true, exactly once, after credentials exist.
    #[serde(default)]
    pub initialized: bool,
}

fn default_service_home() -> PathBuf {
    PathBuf::from("/var/lib/pgsql")
}

impl NodeTopologyConfig {
    /// Load the topology config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Persist the topology config, creating parent directories as
    /// needed. Called after a pass that flipped `initialized`.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// One host-based-authentication rule descriptor.
///
/// Rendered verbatim into `pg_hba.conf`; the rule grammar itself is
/// PostgreSQL's business, not ours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HbaRule {
    /// Connection type (`host`, `hostssl`, `local`, ...).
    pub conn_type: String,
    /// Database name or keyword (`replication`, `all`, ...).
    pub database: String,
    /// User name or keyword.
    pub user: String,
    /// CIDR address; absent for `local` rules.
    #[serde(default)]
    pub address: Option<String>,
    /// Auth method (`md5`, `scram-sha-256`, `trust`, ...).
    pub method: String,
}

impl HbaRule {
    /// Render the rule as one `pg_hba.conf` line.
    #[must_use]
    pub fn render(&self) -> String {
        match &self.address {
            Some(addr) => format!(
                "{}\t{}\t{}\t{}\t{}",
                self.conn_type, self.database, self.user, addr, self.method
            ),
            None => format!(
                "{}\t{}\t{}\t{}",
                self.conn_type, self.database, self.user, self.method
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NodeTopologyConfig {
        NodeTopologyConfig {
            node_type: "master".to_string(),
            master_address: "10.0.0.1".to_string(),
            slave_addresses: vec!["10.0.0.2".to_string()],
            pg_hba: vec![HbaRule {
                conn_type: "host".to_string(),
                database: "replication".to_string(),
                user: "replication".to_string(),
                address: Some("10.0.0.2/32".to_string()),
                method: "md5".to_string(),
            }],
            pg_wal_dir: PathBuf::from("/var/lib/pgsql/pg_wal_archive"),
            pg_data_dir: PathBuf::from("/var/lib/pgsql/data"),
            service_home: PathBuf::from("/var/lib/pgsql"),
            peer_public_keys: Vec::new(),
            service_uid: None,
            service_gid: None,
            initialized: false,
        }
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("replication.toml");

        let config = sample();
        config.save(&path).unwrap();
        let loaded = NodeTopologyConfig::load(&path).unwrap();

        assert_eq!(loaded.node_type, "master");
        assert_eq!(loaded.slave_addresses, vec!["10.0.0.2"]);
        assert_eq!(loaded.pg_hba, config.pg_hba);
        assert!(!loaded.initialized);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = NodeTopologyConfig::load(Path::new("/nonexistent/replication.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_optional_fields_default() {
        let toml_src = r#"
            node_type = "slave"
            master_address = "10.0.0.1"
            pg_wal_dir = "/var/lib/pgsql/pg_wal_archive"
            pg_data_dir = "/var/lib/pgsql/data"
        "#;
        let config: NodeTopologyConfig = toml::from_str(toml_src).unwrap();
        assert!(!config.initialized);
        assert!(config.slave_addresses.is_empty());
        assert!(config.peer_public_keys.is_empty());
        assert_eq!(config.service_home, PathBuf::from("/var/lib/pgsql"));
        assert_eq!(config.service_uid, None);
    }

    #[test]
    fn test_json_serialization() {
        let config = sample();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: NodeTopologyConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.node_type, config.node_type);
        assert_eq!(parsed.pg_wal_dir, config.pg_wal_dir);
    }

    #[test]
    fn test_hba_render() {
        let rule = HbaRule {
            conn_type: "host".to_string(),
            database: "replication".to_string(),
            user: "replication".to_string(),
            address: Some("10.0.0.2/32".to_string()),
            method: "md5".to_string(),
        };
        assert_eq!(rule.render(), "host\treplication\treplication\t10.0.0.2/32\tmd5");

        let local = HbaRule {
            conn_type: "local".to_string(),
            database: "all".to_string(),
            user: "postgres".to_string(),
            address: None,
            method: "peer".to_string(),
        };
        assert_eq!(local.render(), "local\tall\tpostgres\tpeer");
    }
}
