//! Subgraph connection settings.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Hosted Uniswap v3 subgraph on mainnet.
pub const DEFAULT_ENDPOINT: &str = "https://api.thegraph.com/subgraphs/name/uniswap/uniswap-v3";

/// The 0.3 % USDC/ETH pool.
pub const DEFAULT_POOL_ID: &str = "0x8ad599c3a0ff1de082011efddc58f1908eb6e6d8";

/// Largest page The Graph serves for a single collection query.
pub const MAX_PAGE_SIZE: u32 = 1_000;

/// Where and how to query pool data.
///
/// Every field has a default, so a TOML file only names what it changes:
///
/// ```
/// use clmm_liquidity::config::SubgraphConfig;
///
/// let config: SubgraphConfig = toml::from_str(r#"
///     pool_id = "0x88e6a0c2ddd26feeb64f039a2c41296fcb3f5640"
///     retries = 2
/// "#).expect("valid toml");
/// assert_eq!(config.retries, 2);
/// assert_eq!(config.page_size, 1_000);
/// config.validate().expect("valid config");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubgraphConfig {
    /// GraphQL endpoint URL.
    pub endpoint: String,
    /// Pool contract address, lowercase hex.
    pub pool_id: String,
    /// Items requested per page for ticks and positions.
    pub page_size: u32,
    /// Retries after a failed request; `0` disables retrying.
    pub retries: u32,
    /// Timeout of a single request.
    pub timeout_secs: u64,
}

impl Default for SubgraphConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            pool_id: DEFAULT_POOL_ID.to_string(),
            page_size: MAX_PAGE_SIZE,
            retries: 5,
            timeout_secs: 30,
        }
    }
}

impl SubgraphConfig {
    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] for an empty endpoint or pool id, a page
    /// size outside `1..=1000`, or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("subgraph endpoint must not be empty"));
        }
        if self.pool_id.trim().is_empty() {
            return Err(ConfigError::Invalid("pool id must not be empty"));
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::Invalid("page size must be between 1 and 1000"));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout must be greater than zero"));
        }
        Ok(())
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
