//! Configuration loaded from TOML.
//!
//! [`Config`] groups the engine parameters ([`MathConfig`]) and the
//! subgraph connection ([`SubgraphConfig`]). Sections and fields that are
//! left out take their defaults, which target the 0.3 % USDC/ETH pool on
//! the hosted Uniswap v3 subgraph.
//!
//! ```toml
//! [math]
//! tick_base = 1.0001
//!
//! [subgraph]
//! pool_id = "0x8ad599c3a0ff1de082011efddc58f1908eb6e6d8"
//! page_size = 1000
//! retries = 5
//! timeout_secs = 30
//! ```

mod error;
mod math;
mod subgraph;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use error::ConfigError;
pub use math::MathConfig;
pub use subgraph::{SubgraphConfig, DEFAULT_ENDPOINT, DEFAULT_POOL_ID, MAX_PAGE_SIZE};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub math: MathConfig,
    pub subgraph: SubgraphConfig,
}

impl Config {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed TOML, otherwise whatever
    /// [`Config::validate`] reports.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`Config::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// The first invalid field found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.math.tick_math()?;
        self.subgraph.validate()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let Ok(config) = Config::from_toml_str("") else {
            panic!("expected Ok");
        };
        assert_eq!(config, Config::default());
    }

    #[test]
    fn sections_override_defaults() {
        let Ok(config) = Config::from_toml_str(
            "[math]\ntick_base = 1.0005\n\n[subgraph]\nretries = 0\n",
        ) else {
            panic!("expected Ok");
        };
        assert!((config.math.tick_base - 1.0005).abs() < f64::EPSILON);
        assert_eq!(config.subgraph.retries, 0);
        assert_eq!(config.subgraph.page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn invalid_section_fails_validation() {
        assert!(matches!(
            Config::from_toml_str("[subgraph]\npage_size = 0\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_toml_str("[math]\ntick_base = 0.5\n"),
            Err(ConfigError::Domain(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            Config::from_file("/nonexistent/clmm-liquidity.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
