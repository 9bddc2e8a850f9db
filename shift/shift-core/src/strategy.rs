//! Strategy - Migration mode to read/write fan-out
//!
//! TigerStyle: A pure table lookup. The mode is fixed for the process
//! lifetime; the resolver honors any mode, including skipped steps.
//!
//! | Mode               | read-A | read-B | write-A | write-B |
//! |--------------------|--------|--------|---------|---------|
//! | `source_only`      | yes    | no     | yes     | no      |
//! | `double_write`     | yes    | no     | yes     | yes     |
//! | `read_migration`   | no     | yes    | yes     | yes     |
//! | `destination_only` | no     | yes    | no      | yes     |

use std::str::FromStr;

use serde::{Deserialize, Serialize};

// =============================================================================
// Migration Mode
// =============================================================================

/// Phase of the migration, advanced by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationMode {
    /// Only the source store is used.
    #[default]
    SourceOnly,
    /// Read the source, write both.
    DoubleWrite,
    /// Read the destination, write both.
    ReadMigration,
    /// Only the destination store is used.
    DestinationOnly,
}

impl MigrationMode {
    /// Get string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SourceOnly => "source_only",
            Self::DoubleWrite => "double_write",
            Self::ReadMigration => "read_migration",
            Self::DestinationOnly => "destination_only",
        }
    }

    /// Get all modes in rollout order.
    #[must_use]
    pub fn all() -> &'static [MigrationMode] {
        &[
            Self::SourceOnly,
            Self::DoubleWrite,
            Self::ReadMigration,
            Self::DestinationOnly,
        ]
    }

    /// The next step of the rollout, if any. Informational only.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::SourceOnly => Some(Self::DoubleWrite),
            Self::DoubleWrite => Some(Self::ReadMigration),
            Self::ReadMigration => Some(Self::DestinationOnly),
            Self::DestinationOnly => None,
        }
    }
}

impl std::fmt::Display for MigrationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MigrationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "source_only" | "mongodb_only" => Ok(Self::SourceOnly),
            "double_write" => Ok(Self::DoubleWrite),
            "read_migration" => Ok(Self::ReadMigration),
            "destination_only" | "cassandra_only" => Ok(Self::DestinationOnly),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

/// Invalid strategy configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Mode name not recognized.
    #[error("unknown migration mode {0:?} (expected source_only, double_write, read_migration or destination_only)")]
    UnknownMode(String),

    /// Boolean setting not recognized.
    #[error("invalid boolean {value:?} for {key}")]
    InvalidBool {
        /// Setting name
        key: String,
        /// Offending value
        value: String,
    },

    /// Any other rejected setting.
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        /// Setting name
        key: String,
        /// Offending value
        value: String,
        /// Why it was rejected
        reason: String,
    },
}

// =============================================================================
// Strategy
// =============================================================================

/// Resolved read/write fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Strategy {
    /// Mode this was resolved from
    pub mode: MigrationMode,
    /// Read from the source store (A)
    pub read_a: bool,
    /// Read from the destination store (B)
    pub read_b: bool,
    /// Write to the source store (A)
    pub write_a: bool,
    /// Write to the destination store (B)
    pub write_b: bool,
}

impl Strategy {
    /// Resolve a mode. `extra_write_to_destination` forces write-B on.
    #[must_use]
    pub fn resolve(mode: MigrationMode, extra_write_to_destination: bool) -> Self {
        let (read_a, read_b, write_a, write_b) = match mode {
            MigrationMode::SourceOnly => (true, false, true, false),
            MigrationMode::DoubleWrite => (true, false, true, true),
            MigrationMode::ReadMigration => (false, true, true, true),
            MigrationMode::DestinationOnly => (false, true, false, true),
        };
        let strategy = Self {
            mode,
            read_a,
            read_b,
            write_a,
            write_b: write_b || extra_write_to_destination,
        };

        // Postconditions
        assert!(strategy.read_a || strategy.read_b, "some store must be readable");
        assert!(strategy.write_a || strategy.write_b, "some store must be writable");
        strategy
    }

    /// True when writes fan out to both stores.
    #[must_use]
    pub fn is_dual_write(&self) -> bool {
        self.write_a && self.write_b
    }
}
