//! Uniswap v3 fee tiers and their tick spacings.

use core::fmt;

/// Hundredths of a basis point per unit of fee (`1_000_000` = 100 %).
const FEE_DENOMINATOR: f64 = 1_000_000.0;

/// Tick spacing used for tiers without a registered spacing.
const DEFAULT_TICK_SPACING: u32 = 60;

/// A pool fee tier, in hundredths of a basis point as the factory stores it
/// (`3000` is 0.30 %).
///
/// Only ticks that are multiples of the tier's spacing can be initialized.
///
/// # Examples
///
/// ```
/// use clmm_liquidity::domain::FeeTier;
///
/// let tier = FeeTier::TIER_0_30_PERCENT;
/// assert_eq!(tier.tick_spacing(), 60);
/// assert!((tier.as_fraction() - 0.003).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeeTier(u32);

impl FeeTier {
    /// 0.01 % fee, stable pairs pegged to each other (spacing 1).
    pub const TIER_0_01_PERCENT: Self = Self(100);

    /// 0.05 % fee, stablecoin and correlated pairs (spacing 10).
    pub const TIER_0_05_PERCENT: Self = Self(500);

    /// 0.30 % fee, standard volatile pairs (spacing 60).
    pub const TIER_0_30_PERCENT: Self = Self(3_000);

    /// 1.00 % fee, exotic pairs (spacing 200).
    pub const TIER_1_00_PERCENT: Self = Self(10_000);

    /// Creates a fee tier from its raw on-chain value.
    #[must_use]
    pub const fn new(hundredths_of_bip: u32) -> Self {
        Self(hundredths_of_bip)
    }

    /// Returns the raw on-chain value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Tick spacing enforced by the factory for this tier; unknown tiers
    /// fall back to 60.
    #[must_use]
    pub const fn tick_spacing(&self) -> u32 {
        match self.0 {
            100 => 1,
            500 => 10,
            3_000 => 60,
            10_000 => 200,
            _ => DEFAULT_TICK_SPACING,
        }
    }

    /// Returns `true` for one of the four factory-enabled tiers.
    #[must_use]
    pub const fn is_standard(&self) -> bool {
        matches!(self.0, 100 | 500 | 3_000 | 10_000)
    }

    /// The fee as a fraction of the swapped amount.
    #[must_use]
    pub fn as_fraction(&self) -> f64 {
        f64::from(self.0) / FEE_DENOMINATOR
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", f64::from(self.0) / 10_000.0)
    }
}
