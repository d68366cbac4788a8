//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Bootstrap PostgreSQL master/slave replication, one idempotent
/// convergence pass per invocation.
///
/// The first pass on a node establishes SSH key material and marks the
/// node initialized; the second pass applies the role-specific
/// replication configuration. Re-running a converged node is a no-op.
#[derive(Parser, Debug)]
#[command(name = "replboot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one convergence pass and persist the updated config
    Converge(ConvergeArgs),

    /// Report the resolved role, bootstrap phase, and artifact state
    Status(StatusArgs),

    /// Write a commented starter topology config
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug)]
pub struct ConvergeArgs {
    /// Path to the topology config file
    #[arg(
        short,
        long,
        env = "REPLBOOT_CONFIG",
        default_value = "/etc/replboot/replication.toml"
    )]
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Path to the topology config file
    #[arg(
        short,
        long,
        env = "REPLBOOT_CONFIG",
        default_value = "/etc/replboot/replication.toml"
    )]
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct InitConfigArgs {
    /// Where to write the starter config (refuses to overwrite)
    #[arg(
        short,
        long,
        env = "REPLBOOT_CONFIG",
        default_value = "/etc/replboot/replication.toml"
    )]
    pub config: PathBuf,
}
