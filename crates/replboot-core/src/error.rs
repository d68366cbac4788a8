//! Configuration-level errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, validating, or persisting the node
/// topology configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `node_type` is not exactly `"master"` or `"slave"`.
    ///
    /// This is fatal and unrecoverable: the operator must fix the
    /// configuration. It is never coerced to a default role.
    #[error("node_type must be set to either \"master\" or \"slave\", got {value:?}")]
    InvalidRole {
        /// The rejected `node_type` value.
        value: String,
    },

    /// Config file could not be read or written.
    #[error("config io error at {path}: {source}")]
    Io {
        /// Path of the config file involved.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`crate::NodeTopologyConfig`].
    #[error("config parse error at {path}: {source}")]
    Parse {
        /// Path of the config file involved.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// Config could not be serialized back to TOML.
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
