//! # replboot-cli
//!
//! Command-line interface for replboot. One convergence pass per
//! invocation, driven by an external scheduler (cron, a config
//! management run, a systemd timer) that guarantees single-flight
//! execution per node.

pub mod cli;

pub use cli::run;
