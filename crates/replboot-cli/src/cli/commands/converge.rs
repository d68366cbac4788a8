//! `replboot converge` - run one convergence pass.

use anyhow::Result;

use replboot::{BootstrapOrchestrator, FileHbaWriter, NodeTopologyConfig, PostgresEngine};

use crate::cli::args::ConvergeArgs;

/// Load the topology config, run one pass of the bootstrap state
/// machine, and persist the (possibly updated) config.
///
/// An invalid role aborts before any side effect; the process exits
/// non-zero with the resolver's message.
pub fn execute(args: &ConvergeArgs) -> Result<()> {
    let config = NodeTopologyConfig::load(&args.config)?;

    let hba = FileHbaWriter::for_cluster(&config);
    let orchestrator = BootstrapOrchestrator::new(PostgresEngine, hba);
    let report = orchestrator.converge(config)?;

    report.config.save(&args.config)?;

    println!("role:   {}", report.role);
    println!("state:  {}", report.state);
    println!("pubkey: {}", report.credentials.public_key_line);
    Ok(())
}
