//! Node role and bootstrap phase types.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// The replication role of a node.
///
/// Exactly two values exist; an unrecognized `node_type` is a fatal
/// configuration error, never a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// Serves WAL to slaves and allows their replication connections.
    Master,
    /// Streams from the master, falling back to shipped WAL segments.
    Slave,
}

impl FromStr for NodeRole {
    type Err = ConfigError;

    /// Case-sensitive exact match. `"Master"`, `"MASTER"`, `""` and
    /// friends are all rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "master" => Ok(Self::Master),
            "slave" => Ok(Self::Slave),
            other => Err(ConfigError::InvalidRole {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Master => f.write_str("master"),
            Self::Slave => f.write_str("slave"),
        }
    }
}

/// Which phase a convergence pass runs in.
///
/// Derived from the persisted `initialized` flag at the start of each
/// run; never stored itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapPhase {
    /// First run: establish key material only, defer role config.
    CredentialSetup,
    /// Subsequent runs: credentials exist fleet-wide, apply role config.
    RoleApply,
}

impl BootstrapPhase {
    /// Derive the phase from the `initialized` flag as persisted at the
    /// start of the run.
    #[must_use]
    pub const fn from_initialized(initialized: bool) -> Self {
        if initialized {
            Self::RoleApply
        } else {
            Self::CredentialSetup
        }
    }
}

impl fmt::Display for BootstrapPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CredentialSetup => f.write_str("credential-setup"),
            Self::RoleApply => f.write_str("role-apply"),
        }
    }
}

/// The state a convergence pass has reached.
///
/// `Uninitialized` is the entry state of a node that has never
/// completed a pass; a successful pass always leaves the node in one of
/// the other two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    /// No pass has completed yet.
    Uninitialized,
    /// Key material is in place; role config deferred to the next pass.
    CredentialsReady,
    /// Role-specific replication configuration has been applied.
    RoleApplied,
}

impl fmt::Display for BootstrapState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => f.write_str("uninitialized"),
            Self::CredentialsReady => f.write_str("credentials-ready"),
            Self::RoleApplied => f.write_str("role-applied"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parses_exact_values() {
        assert_eq!("master".parse::<NodeRole>().unwrap(), NodeRole::Master);
        assert_eq!("slave".parse::<NodeRole>().unwrap(), NodeRole::Slave);
    }

    #[test]
    fn test_role_rejects_everything_else() {
        for bad in ["", "Master", "MASTER", "replica", "standby", " slave"] {
            let err = bad.parse::<NodeRole>().unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidRole { ref value } if value == bad),
                "expected InvalidRole for {bad:?}"
            );
        }
    }

    #[test]
    fn test_phase_from_initialized() {
        assert_eq!(
            BootstrapPhase::from_initialized(false),
            BootstrapPhase::CredentialSetup
        );
        assert_eq!(
            BootstrapPhase::from_initialized(true),
            BootstrapPhase::RoleApply
        );
    }

    #[test]
    fn test_display_strings() {
        assert_eq!(NodeRole::Master.to_string(), "master");
        assert_eq!(BootstrapState::CredentialsReady.to_string(), "credentials-ready");
        assert_eq!(BootstrapPhase::RoleApply.to_string(), "role-apply");
    }
}
