//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// Required configuration keys are not set.
    #[error("Configuration is incomplete (missing: {})", missing.join(", "))]
    NotConfigured { missing: Vec<&'static str> },
}
