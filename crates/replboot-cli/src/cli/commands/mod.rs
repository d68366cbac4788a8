//! Command implementations.

pub mod converge;
pub mod init_config;
pub mod status;
