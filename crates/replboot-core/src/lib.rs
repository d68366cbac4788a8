//! # replboot-core
//!
//! Core types for replboot, the two-node PostgreSQL replication
//! bootstrapper.
//!
//! This crate holds the data model shared by the domain library and the
//! CLI: the persisted [`NodeTopologyConfig`], the resolved [`NodeRole`],
//! the per-run [`BootstrapPhase`], the [`CredentialBundle`] describing
//! the key material on disk, and the configuration-level error type.
//!
//! No component in this crate touches the filesystem except
//! [`NodeTopologyConfig::load`] / [`NodeTopologyConfig::save`], which
//! own the TOML persistence of the topology config (including the
//! `initialized` flag that drives the two-phase bootstrap).

pub mod config;
pub mod credentials;
pub mod error;
pub mod role;

// Re-exports for convenience.
pub use config::{HbaRule, NodeTopologyConfig};
pub use credentials::CredentialBundle;
pub use error::ConfigError;
pub use role::{BootstrapPhase, BootstrapState, NodeRole};
