//! Concentrated liquidity position.

use core::fmt;

use super::{Liquidity, Price, PriceRange, TokenAmounts};
use crate::error::Result;
use crate::math::{amounts_for_liquidity, RangeComposition};

/// A liquidity provider's position: liquidity `L` deposited over a
/// [`PriceRange`].
///
/// The token amounts are not stored. They are a function of the current
/// price relative to the range and are derived on demand with
/// [`Position::amounts_at`].
///
/// # Examples
///
/// ```
/// use clmm_liquidity::domain::{Liquidity, Position, Price, PriceRange};
///
/// let range = PriceRange::from_f64(1500.0, 2500.0).expect("ordered");
/// let position = Position::new(Liquidity::new(847.2).expect("nonnegative"), range);
///
/// // Above the range, everything has been converted to the quote asset.
/// let above = Price::new(3000.0).expect("positive");
/// let amounts = position.amounts_at(above).expect("valid");
/// assert_eq!(amounts.base(), 0.0);
/// assert!(amounts.quote() > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    liquidity: Liquidity,
    range: PriceRange,
}

impl Position {
    /// Creates a new `Position`. The range invariant is already enforced by
    /// [`PriceRange`].
    #[must_use]
    pub const fn new(liquidity: Liquidity, range: PriceRange) -> Self {
        Self { liquidity, range }
    }

    /// Returns the position's liquidity.
    #[must_use]
    pub const fn liquidity(&self) -> Liquidity {
        self.liquidity
    }

    /// Returns the position's price range.
    #[must_use]
    pub const fn range(&self) -> PriceRange {
        self.range
    }

    /// Where `price` sits relative to this position's range.
    #[must_use]
    pub fn composition(&self, price: Price) -> RangeComposition {
        RangeComposition::classify(&self.range, price)
    }

    /// Returns `true` if the position is earning fees at `price`, i.e. the
    /// price lies strictly inside the range.
    #[must_use]
    pub fn is_active(&self, price: Price) -> bool {
        self.composition(price) == RangeComposition::InRange
    }

    /// Token amounts held at the given current price.
    ///
    /// # Errors
    ///
    /// Same as [`amounts_for_liquidity`].
    pub fn amounts_at(&self, price: Price) -> Result<TokenAmounts> {
        amounts_for_liquidity(self.liquidity, &self.range, price)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({}, liquidity={})", self.range, self.liquidity)
    }
}
