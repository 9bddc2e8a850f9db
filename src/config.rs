//! Configuration - Environment settings for the blogshift binary
//!
//! Read once at start. `main` loads `.env` before calling [`AppConfig::from_env`].

use shift_core::{ConfigError, MigrationMode, Strategy, ENDPOINT_MEMORY, NAMESPACE_DEFAULT};

// =============================================================================
// Variable Names
// =============================================================================

/// Migration mode name.
pub const ENV_MIGRATION_MODE: &str = "MIGRATION_MODE";

/// Historical name for [`ENV_MIGRATION_MODE`].
pub const ENV_MIGRATION_MODE_LEGACY: &str = "READ_SOURCE";

/// Force destination writes on in every mode.
pub const ENV_EXTRA_WRITE: &str = "EXTRA_WRITE_TO_DESTINATION";

/// Historical name for [`ENV_EXTRA_WRITE`].
pub const ENV_EXTRA_WRITE_LEGACY: &str = "WRITE_BOTH";

/// Source store endpoint.
pub const ENV_STORE_A_ENDPOINT: &str = "STORE_A_ENDPOINT";

/// Source store namespace.
pub const ENV_STORE_A_NAMESPACE: &str = "STORE_A_NAMESPACE";

/// Destination store endpoint.
pub const ENV_STORE_B_ENDPOINT: &str = "STORE_B_ENDPOINT";

/// Destination store namespace.
pub const ENV_STORE_B_NAMESPACE: &str = "STORE_B_NAMESPACE";

/// Every key [`AppConfig::from_env`] reads.
pub const ENV_KEYS: [&str; 8] = [
    ENV_MIGRATION_MODE,
    ENV_MIGRATION_MODE_LEGACY,
    ENV_EXTRA_WRITE,
    ENV_EXTRA_WRITE_LEGACY,
    ENV_STORE_A_ENDPOINT,
    ENV_STORE_A_NAMESPACE,
    ENV_STORE_B_ENDPOINT,
    ENV_STORE_B_NAMESPACE,
];

// =============================================================================
// Config Types
// =============================================================================

/// Where one store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// `memory://` or a `postgres://` URL
    pub endpoint: String,
    /// Logical namespace (Postgres schema)
    pub namespace: String,
}

impl StoreConfig {
    /// True for the in-process simulation store.
    pub fn is_memory(&self) -> bool {
        self.endpoint.starts_with(ENDPOINT_MEMORY)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: ENDPOINT_MEMORY.to_string(),
            namespace: NAMESPACE_DEFAULT.to_string(),
        }
    }
}

/// Process-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub mode: MigrationMode,
    pub extra_write_to_destination: bool,
    pub source: StoreConfig,
    pub destination: StoreConfig,
}

impl AppConfig {
    /// Read from the process environment.
    ///
    /// Only the recognized keys are read. Other variables are never
    /// inspected, whatever their encoding.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut vars = Vec::with_capacity(ENV_KEYS.len());
        for key in ENV_KEYS {
            match std::env::var(key) {
                Ok(value) => vars.push((key, value)),
                Err(std::env::VarError::NotPresent) => {}
                Err(std::env::VarError::NotUnicode(raw)) => {
                    return Err(ConfigError::InvalidValue {
                        key: key.to_string(),
                        value: raw.to_string_lossy().into_owned(),
                        reason: "not valid UTF-8".to_string(),
                    });
                }
            }
        }
        Self::from_vars(vars)
    }

    /// Read from explicit key/value pairs. Unknown keys are ignored.
    ///
    /// When both the current and the historical name of a setting are
    /// present, the current name wins.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut mode = None;
        let mut mode_legacy = None;
        let mut extra = None;
        let mut extra_legacy = None;
        let mut config = Self::default();

        for (key, value) in vars {
            let value = value.into();
            match key.as_ref() {
                ENV_MIGRATION_MODE => mode = Some(value),
                ENV_MIGRATION_MODE_LEGACY => mode_legacy = Some(value),
                ENV_EXTRA_WRITE => extra = Some((ENV_EXTRA_WRITE, value)),
                ENV_EXTRA_WRITE_LEGACY => extra_legacy = Some((ENV_EXTRA_WRITE_LEGACY, value)),
                ENV_STORE_A_ENDPOINT => config.source.endpoint = non_empty(ENV_STORE_A_ENDPOINT, value)?,
                ENV_STORE_A_NAMESPACE => config.source.namespace = non_empty(ENV_STORE_A_NAMESPACE, value)?,
                ENV_STORE_B_ENDPOINT => config.destination.endpoint = non_empty(ENV_STORE_B_ENDPOINT, value)?,
                ENV_STORE_B_NAMESPACE => config.destination.namespace = non_empty(ENV_STORE_B_NAMESPACE, value)?,
                _ => {}
            }
        }

        if let Some(raw) = mode.or(mode_legacy) {
            config.mode = raw.parse()?;
        }
        if let Some((key, raw)) = extra.or(extra_legacy) {
            config.extra_write_to_destination = parse_bool(key, &raw)?;
        }
        Ok(config)
    }

    /// Resolve the read/write fan-out for this configuration.
    pub fn strategy(&self) -> Strategy {
        Strategy::resolve(self.mode, self.extra_write_to_destination)
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}

fn non_empty(key: &str, value: String) -> Result<String, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value,
            reason: "must not be empty".to_string(),
        });
    }
    Ok(value)
}
