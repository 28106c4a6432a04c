//! Configuration errors.

use thiserror::Error;

use crate::error::DomainError;

/// Failure to load or validate a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML was malformed or had fields of the wrong type.
    #[error("cannot parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field held a value outside its allowed range.
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),

    /// A numeric field was rejected by the engine's own validation.
    #[error("invalid configuration: {0}")]
    Domain(#[from] DomainError),
}
