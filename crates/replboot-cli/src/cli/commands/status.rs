//! `replboot status` - read-only report on bootstrap progress.

use anyhow::Result;

use replboot::{provision, resolver, FileHbaWriter, PostgresEngine};
use replboot_core::{BootstrapPhase, NodeTopologyConfig};

use crate::cli::args::StatusArgs;

/// Print the resolved role, the phase the next pass would run in, and
/// which credential artifacts exist. Performs no side effects.
pub fn execute(args: &StatusArgs) -> Result<()> {
    let config = NodeTopologyConfig::load(&args.config)?;
    let role = resolver::resolve(&config)?;
    let phase = BootstrapPhase::from_initialized(config.initialized);

    println!("role:        {role}");
    println!("initialized: {}", config.initialized);
    println!("next pass:   {phase}");

    // Artifact locations come from the components that write them, so
    // this report cannot drift from what a pass actually produces.
    let paths = provision::credential_paths(&config);
    let artifacts = [
        ("wal dir", config.pg_wal_dir.clone()),
        ("private key", paths.private_key),
        ("public key", paths.public_key),
        ("authorized_keys", paths.authorized_keys),
        (
            "pg_hba.conf",
            FileHbaWriter::for_cluster(&config).path().to_path_buf(),
        ),
        ("replication.conf", PostgresEngine::fragment_path(&config)),
    ];
    for (label, path) in artifacts {
        let presence = if path.exists() { "present" } else { "missing" };
        println!("{label}: {presence} ({})", path.display());
    }
    Ok(())
}
