//! Credential provisioning.
//!
//! Ensures the SSH key material used to rsync WAL segments between the
//! master and slave nodes. Runs on every convergence pass regardless
//! of phase; when the artifacts already match the desired state the
//! pass is a true no-op.
//!
//! An existing private key is never regenerated — the peer's
//! authorized_keys references it, and replacing it would silently break
//! the trust relationship WAL shipping depends on.

use std::fs;
use std::path::{Path, PathBuf};

use rand_core::OsRng;
use ssh_key::private::{Ed25519Keypair, KeypairData};
use ssh_key::{LineEnding, PrivateKey};
use tracing::{debug, info};

use replboot_core::{CredentialBundle, NodeTopologyConfig};

use crate::error::ProvisionError;
use crate::fsutil::{self, Owner};

/// Comment embedded in generated keys, identifying their purpose.
const KEY_COMMENT: &str = "postgres-wal-shipping";

/// Private key file name under `<service_home>/.ssh/`.
const PRIVATE_KEY_FILE: &str = "id_ed25519";

/// Where the credential artifacts live for a given topology, whether
/// or not they exist yet. The single source for these paths; anything
/// reporting on them (e.g. the status command) derives them from here.
#[derive(Debug, Clone)]
pub struct CredentialPaths {
    /// OpenSSH private key.
    pub private_key: PathBuf,
    /// Matching public key.
    pub public_key: PathBuf,
    /// authorized_keys file granting the peer(s) access.
    pub authorized_keys: PathBuf,
}

/// Compute the artifact locations for `config`. Pure; no side effects.
#[must_use]
pub fn credential_paths(config: &NodeTopologyConfig) -> CredentialPaths {
    let ssh_dir = config.service_home.join(".ssh");
    CredentialPaths {
        private_key: ssh_dir.join(PRIVATE_KEY_FILE),
        public_key: ssh_dir.join(format!("{PRIVATE_KEY_FILE}.pub")),
        authorized_keys: ssh_dir.join("authorized_keys"),
    }
}

/// Idempotently ensure the node's credential bundle.
///
/// Side effects: creates the WAL staging directory, the service
/// account's home and `.ssh` directories (all 0700), and writes the
/// private key, public key, and authorized_keys files (all 0600).
/// Any filesystem failure is fatal for the run; the caller must not
/// proceed to role configuration past a partial bundle.
pub fn ensure(config: &NodeTopologyConfig) -> Result<CredentialBundle, ProvisionError> {
    let owner = Owner::from_config(config);

    ensure_dir(&config.pg_wal_dir, owner)?;
    ensure_dir(&config.service_home, owner)?;
    ensure_dir(&config.service_home.join(".ssh"), owner)?;

    let CredentialPaths {
        private_key: key_path,
        public_key: pub_path,
        authorized_keys: auth_path,
    } = credential_paths(config);

    let private_key = if key_path.exists() {
        debug!(path = %key_path.display(), "reusing existing replication key");
        let content = fs::read_to_string(&key_path).map_err(|source| ProvisionError::Io {
            path: key_path.clone(),
            source,
        })?;
        PrivateKey::from_openssh(&content)?
    } else {
        info!(path = %key_path.display(), "generating replication keypair");
        let keypair = Ed25519Keypair::random(&mut OsRng);
        let private_key = PrivateKey::new(KeypairData::Ed25519(keypair), KEY_COMMENT)?;
        let encoded = private_key.to_openssh(LineEnding::LF)?;
        write_artifact(&key_path, &encoded, owner)?;
        private_key
    };

    let public_line = private_key.public_key().to_openssh()?;
    write_artifact(&pub_path, &format!("{public_line}\n"), owner)?;
    write_artifact(&auth_path, &authorized_keys_content(&public_line, config), owner)?;

    Ok(CredentialBundle {
        private_key: key_path,
        public_key: pub_path,
        authorized_keys: auth_path,
        public_key_line: public_line,
    })
}

/// Desired authorized_keys content: the node's own public key (both
/// nodes of a pair may share one identity), then any peer keys
/// populated by discovery, deduplicated in order.
fn authorized_keys_content(own_line: &str, config: &NodeTopologyConfig) -> String {
    let mut entries: Vec<&str> = vec![own_line];
    for peer in &config.peer_public_keys {
        let peer = peer.trim();
        if !peer.is_empty() && !entries.contains(&peer) {
            entries.push(peer);
        }
    }
    let mut content = entries.join("\n");
    content.push('\n');
    content
}

fn ensure_dir(path: &Path, owner: Owner) -> Result<(), ProvisionError> {
    fsutil::ensure_private_dir(path, owner).map_err(|source| ProvisionError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_artifact(path: &Path, content: &str, owner: Owner) -> Result<(), ProvisionError> {
    let changed =
        fsutil::write_if_changed(path, content, 0o600, owner).map_err(|source| {
            ProvisionError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;
    if changed {
        info!(path = %path.display(), "credential artifact written");
    } else {
        debug!(path = %path.display(), "credential artifact already converged");
    }
    Ok(())
}
