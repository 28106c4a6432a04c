//! Token decimal places and human-readable scaling.

use crate::error::{DomainError, Result};

use super::Price;

/// Maximum allowed decimal places (EVM standard).
const MAX_DECIMALS: u8 = 18;

/// Number of decimal places of an ERC-20 token.
///
/// The engine never scales amounts by itself: raw on-chain amounts and the
/// raw price `token1/token0` are consistent with each other, and converting
/// them for display is the caller's job. These helpers do that conversion.
///
/// # Examples
///
/// ```
/// use clmm_liquidity::domain::Decimals;
///
/// let usdc = Decimals::new(6).expect("6 is valid");
/// assert!((usdc.to_human(1_500_000.0) - 1.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Decimals(u8);

impl Decimals {
    /// Zero decimal places.
    pub const ZERO: Self = Self(0);

    /// Maximum standard decimal places (18).
    pub const MAX: Self = Self(MAX_DECIMALS);

    /// Creates a new `Decimals` value after validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidDecimals`] if `value` exceeds 18.
    pub const fn new(value: u8) -> Result<Self> {
        if value > MAX_DECIMALS {
            return Err(DomainError::InvalidDecimals("decimals must be 0..=18"));
        }
        Ok(Self(value))
    }

    /// Returns the raw decimal count.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Returns `10^decimals`.
    #[must_use]
    pub fn factor(&self) -> f64 {
        10f64.powi(i32::from(self.0))
    }

    /// Converts a raw amount (smallest units) to whole tokens.
    #[must_use]
    pub fn to_human(&self, raw: f64) -> f64 {
        raw / self.factor()
    }

    /// Converts whole tokens to a raw amount (smallest units).
    #[must_use]
    pub fn to_raw(&self, human: f64) -> f64 {
        human * self.factor()
    }
}

/// Converts a raw `token1/token0` price into whole-token units:
/// `raw / 10^(decimals1 - decimals0)`.
///
/// # Errors
///
/// Same as [`Price::new`] if the adjusted price under- or overflows.
///
/// # Examples
///
/// ```
/// use clmm_liquidity::domain::{adjust_price, Decimals, Price};
///
/// // USDC (6) / WETH (18): a raw price of 3.5e8 is 3.5e-4 WETH per USDC.
/// let raw = Price::new(3.5e8).expect("positive");
/// let adjusted = adjust_price(raw, Decimals::new(6).expect("valid"), Decimals::new(18).expect("valid"))
///     .expect("finite");
/// assert!((adjusted.get() - 3.5e-4).abs() < 1e-16);
/// ```
pub fn adjust_price(raw: Price, base: Decimals, quote: Decimals) -> Result<Price> {
    let exponent = i32::from(quote.get()) - i32::from(base.get());
    Price::new(raw.get() / 10f64.powi(exponent))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn decimals(v: u8) -> Decimals {
        let Ok(d) = Decimals::new(v) else {
            panic!("valid decimals");
        };
        d
    }

    #[test]
    fn valid_range() {
        assert_eq!(decimals(0), Decimals::ZERO);
        assert_eq!(decimals(18), Decimals::MAX);
    }

    #[test]
    fn invalid_nineteen() {
        let Err(e) = Decimals::new(19) else {
            panic!("expected Err");
        };
        assert_eq!(e, DomainError::InvalidDecimals("decimals must be 0..=18"));
    }

    #[test]
    fn human_scaling() {
        let eth = decimals(18);
        assert!((eth.to_human(2e18) - 2.0).abs() < 1e-12);
        assert!((eth.to_raw(2.0) - 2e18).abs() < 1.0);
    }

    #[test]
    fn zero_decimals_identity() {
        assert!((Decimals::ZERO.to_human(42.0) - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn adjust_price_same_decimals_is_identity() {
        let Ok(p) = Price::new(1.25) else {
            panic!("expected Ok");
        };
        let Ok(adj) = adjust_price(p, decimals(18), decimals(18)) else {
            panic!("expected Ok");
        };
        assert_eq!(adj, p);
    }

    #[test]
    fn adjust_price_base_has_more_decimals() {
        // WBTC (8) / USDC (6): raw 2.5e2 means 25_000 USDC per WBTC.
        let Ok(p) = Price::new(250.0) else {
            panic!("expected Ok");
        };
        let Ok(adj) = adjust_price(p, decimals(8), decimals(6)) else {
            panic!("expected Ok");
        };
        assert!((adj.get() - 25_000.0).abs() < 1e-9);
    }
}
