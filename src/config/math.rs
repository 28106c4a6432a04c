//! Engine parameters.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::domain::TickBase;
use crate::math::TickMath;

/// Parameters of the tick/price conversion.
///
/// ```
/// use clmm_liquidity::config::MathConfig;
///
/// let config: MathConfig = toml::from_str("tick_base = 1.001").expect("valid toml");
/// let tick_math = config.tick_math().expect("valid base");
/// assert!((tick_math.base().get() - 1.001).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MathConfig {
    /// Exponential base of the tick index; `1.0001` on Uniswap v3.
    pub tick_base: f64,
}

impl Default for MathConfig {
    fn default() -> Self {
        Self {
            tick_base: TickBase::UNISWAP_V3.get(),
        }
    }
}

impl MathConfig {
    /// Builds the [`TickMath`] described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Domain`] if the base is not finite and
    /// greater than one.
    pub fn tick_math(&self) -> Result<TickMath, ConfigError> {
        Ok(TickMath::new(TickBase::new(self.tick_base)?))
    }
}
