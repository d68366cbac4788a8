//! Credential bundle produced by the provisioner.

use std::path::PathBuf;

/// The on-disk key material used to rsync WAL segments between the
/// master and slave nodes.
///
/// Created once per node identity and reused on every later run;
/// regenerating an existing bundle would invalidate the peer's trust
/// in this node, so the provisioner never does it.
#[derive(Debug, Clone)]
pub struct CredentialBundle {
    /// OpenSSH private key (mode 0600).
    pub private_key: PathBuf,
    /// Matching public key (mode 0600).
    pub public_key: PathBuf,
    /// authorized_keys file granting the peer(s) access (mode 0600).
    pub authorized_keys: PathBuf,
    /// The node's own public key as an OpenSSH one-liner, ready to hand
    /// to the peer via discovery.
    pub public_key_line: String,
}
