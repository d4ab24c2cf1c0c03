use serde::Deserialize;
use thiserror::Error as ThisError;

/// Default upper bound on a single serialized asset payload.
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 4 * 1024 * 1024;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to parse ledger config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("max_payload_bytes must be greater than zero")]
    ZeroPayloadLimit,
}

///
/// LedgerConfig
///
/// Runtime knobs for the contract. Every field is optional in TOML.
///
/// ```toml
/// max_payload_bytes = 65536
/// debug = true
/// metrics = false
/// ```
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    pub max_payload_bytes: usize,
    pub debug: bool,
    pub metrics: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            debug: false,
            metrics: true,
        }
    }
}

impl LedgerConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.max_payload_bytes == 0 {
            return Err(ConfigError::ZeroPayloadLimit);
        }

        Ok(())
    }

    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub const fn with_max_payload_bytes(mut self, max_payload_bytes: usize) -> Self {
        self.max_payload_bytes = max_payload_bytes;
        self
    }

    #[must_use]
    pub const fn with_metrics(mut self, metrics: bool) -> Self {
        self.metrics = metrics;
        self
    }
}
