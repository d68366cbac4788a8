//! `replboot init-config` - write a starter topology config.

use anyhow::{bail, Result};

use crate::cli::args::InitConfigArgs;

/// Commented starter config. Addresses use documentation ranges; the
/// operator (or a discovery service) fills in the real topology.
const TEMPLATE: &str = r#"# replboot topology configuration.
#
# One file per node. A discovery service may populate the address,
# pg_hba, and peer key fields instead of an operator.

# Role of this node: "master" or "slave" (case-sensitive).
node_type = "master"

# Address of the master node (consumed by the slave role).
master_address = "192.0.2.10"

# Addresses of the slave nodes (consumed by the master role).
slave_addresses = ["192.0.2.11"]

# Where shipped WAL segments are staged.
pg_wal_dir = "/var/lib/pgsql/pg_wal_archive"

# PostgreSQL data directory.
pg_data_dir = "/var/lib/pgsql/data"

# Home directory of the database service account; key material lives
# under its .ssh directory.
service_home = "/var/lib/pgsql"

# OpenSSH public key lines of peers to authorize.
peer_public_keys = []

# Flipped to true by the first convergence pass. Leave as-is.
initialized = false

# Host-based-authentication rules rendered into pg_hba.conf.
[[pg_hba]]
conn_type = "host"
database = "replication"
user = "replication"
address = "192.0.2.11/32"
method = "md5"
"#;

/// Write the starter config, refusing to clobber an existing file.
pub fn execute(args: &InitConfigArgs) -> Result<()> {
    if args.config.exists() {
        bail!("refusing to overwrite existing config at {}", args.config.display());
    }
    if let Some(parent) = args.config.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&args.config, TEMPLATE)?;
    println!("wrote starter config to {}", args.config.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use replboot_core::NodeTopologyConfig;

    #[test]
    fn test_template_parses_as_topology_config() {
        let config: NodeTopologyConfig = toml::from_str(TEMPLATE).unwrap();
        assert_eq!(config.node_type, "master");
        assert!(!config.initialized);
        assert_eq!(config.pg_hba.len(), 1);
        assert_eq!(config.pg_hba[0].address.as_deref(), Some("192.0.2.11/32"));
    }
}
