//! Engine configuration.
//!
//! Defaults work for interactive use. A few environment variables can
//! override them:
//!
//! - `LOB_ORDER_CAPACITY`    (default: "10000")
//! - `LOB_VERIFY_INVARIANTS` (default: "false")

use std::env;
use std::str::FromStr;

use thiserror::Error;

/// Default number of order slots to pre-allocate.
pub const DEFAULT_ORDER_CAPACITY: usize = 10_000;

/// Failure while reading configuration from the environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The variable was set but could not be parsed.
    #[error("invalid value {value:?} for {key}")]
    InvalidValue {
        /// Environment variable name
        key: &'static str,
        /// The raw value that failed to parse
        value: String,
    },
}

/// Matching engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of resting orders to pre-allocate storage for.
    pub order_capacity: usize,

    /// Run the full book audit after every submit/cancel.
    /// Panics on the first violated invariant.
    pub verify_invariants: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            order_capacity: DEFAULT_ORDER_CAPACITY,
            verify_invariants: false,
        }
    }
}

impl EngineConfig {
    /// Construct a config from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            order_capacity: read_env_or_default("LOB_ORDER_CAPACITY", defaults.order_capacity)?,
            verify_invariants: read_env_or_default(
                "LOB_VERIFY_INVARIANTS",
                defaults.verify_invariants,
            )?,
        })
    }

    /// Set the pre-allocated order capacity.
    pub fn with_capacity(mut self, order_capacity: usize) -> Self {
        self.order_capacity = order_capacity;
        self
    }

    /// Enable or disable the per-call invariant audit.
    pub fn with_invariant_checks(mut self, enabled: bool) -> Self {
        self.verify_invariants = enabled;
        self
    }
}

fn read_env_or_default<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        Err(_) => Ok(default),
    }
}
