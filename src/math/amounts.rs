//! Token amounts held by liquidity over a price range.
//!
//! For liquidity `L` over `[pa, pb]` at current price `p`:
//!
//! ```text
//! p <= pa       x = L (√pb − √pa) / (√pa √pb)      y = 0
//! pa < p < pb   x = L (√pb − √p)  / (√p  √pb)      y = L (√p − √pa)
//! p >= pb       x = 0                               y = L (√pb − √pa)
//! ```
//!
//! The three pieces agree at the boundaries, so the amounts are continuous
//! in `p`: `x` falls and `y` rises as the price moves up through the range.

use core::fmt;

use crate::domain::{Liquidity, Price, PriceRange, SqrtPrice, TokenAmounts};
use crate::error::{DomainError, Result};

/// Where the current price sits relative to a position's range, which
/// decides the assets the position holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeComposition {
    /// `p <= pa`: only the base asset; the position waits to sell it as
    /// the price rises into the range.
    BelowRange,
    /// `pa < p < pb`: both assets.
    InRange,
    /// `p >= pb`: only the quote asset; all base has been sold.
    AboveRange,
}

impl RangeComposition {
    /// Classifies `price` against `range`. The boundaries themselves count
    /// as outside (single-asset).
    #[must_use]
    pub fn classify(range: &PriceRange, price: Price) -> Self {
        Self::classify_sqrt(range.sqrt_lower(), range.sqrt_upper(), price.sqrt())
    }

    fn classify_sqrt(lower: SqrtPrice, upper: SqrtPrice, current: SqrtPrice) -> Self {
        if current <= lower {
            Self::BelowRange
        } else if current >= upper {
            Self::AboveRange
        } else {
            Self::InRange
        }
    }

    /// Returns `true` if a position in this state can hold base asset.
    #[must_use]
    pub const fn holds_base(&self) -> bool {
        matches!(self, Self::BelowRange | Self::InRange)
    }

    /// Returns `true` if a position in this state can hold quote asset.
    #[must_use]
    pub const fn holds_quote(&self) -> bool {
        matches!(self, Self::InRange | Self::AboveRange)
    }
}

impl fmt::Display for RangeComposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::BelowRange => "below range",
            Self::InRange => "in range",
            Self::AboveRange => "above range",
        };
        f.write_str(label)
    }
}

/// Amounts of base and quote asset held by liquidity `L` over `range` at
/// the current `price`.
///
/// # Errors
///
/// Returns [`DomainError::NonFinite`] if an amount overflows `f64`.
///
/// # Examples
///
/// ```
/// use clmm_liquidity::domain::{Liquidity, Price, PriceRange};
/// use clmm_liquidity::math::amounts_for_liquidity;
///
/// let range = PriceRange::from_f64(1.0, 4.0).expect("ordered");
/// let l = Liquidity::new(100.0).expect("nonnegative");
///
/// // Below the range: base only, L (1/√1 − 1/√4) = 50.
/// let below = amounts_for_liquidity(l, &range, Price::new(0.5).expect("positive"))
///     .expect("finite");
/// assert!((below.base() - 50.0).abs() < 1e-12);
/// assert_eq!(below.quote(), 0.0);
/// ```
pub fn amounts_for_liquidity(
    liquidity: Liquidity,
    range: &PriceRange,
    price: Price,
) -> Result<TokenAmounts> {
    amounts_for_liquidity_sqrt(
        liquidity,
        range.sqrt_lower(),
        range.sqrt_upper(),
        price.sqrt(),
    )
}

/// Same as [`amounts_for_liquidity`] with the bounds and the current price
/// given as square roots, the form pool state is stored in.
///
/// # Errors
///
/// - [`DomainError::InvalidRange`] if `sqrt_lower >= sqrt_upper`.
/// - [`DomainError::NonFinite`] if an amount overflows `f64`.
pub fn amounts_for_liquidity_sqrt(
    liquidity: Liquidity,
    sqrt_lower: SqrtPrice,
    sqrt_upper: SqrtPrice,
    sqrt_current: SqrtPrice,
) -> Result<TokenAmounts> {
    if sqrt_lower >= sqrt_upper {
        return Err(DomainError::InvalidRange(
            "lower sqrt price must be below upper sqrt price",
        ));
    }
    let l = liquidity.get();
    match RangeComposition::classify_sqrt(sqrt_lower, sqrt_upper, sqrt_current) {
        RangeComposition::BelowRange => {
            TokenAmounts::base_only(base_between(l, sqrt_lower, sqrt_upper))
        }
        RangeComposition::InRange => TokenAmounts::new(
            base_between(l, sqrt_current, sqrt_upper),
            quote_between(l, sqrt_lower, sqrt_current),
        ),
        RangeComposition::AboveRange => {
            TokenAmounts::quote_only(quote_between(l, sqrt_lower, sqrt_upper))
        }
    }
}

/// `L (√b − √a) / (√a √b)`, the base asset released between two prices.
fn base_between(l: f64, a: SqrtPrice, b: SqrtPrice) -> f64 {
    l * (b.get() - a.get()) / (a.get() * b.get())
}

/// `L (√b − √a)`, the quote asset absorbed between two prices.
fn quote_between(l: f64, a: SqrtPrice, b: SqrtPrice) -> f64 {
    l * (b.get() - a.get())
}

/// Signed change of a position's reserves when the price moves.
///
/// Positive means the position gained that asset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmountDeltas {
    base: f64,
    quote: f64,
}

impl AmountDeltas {
    /// Change of the base asset `Δx`.
    #[must_use]
    pub const fn base(&self) -> f64 {
        self.base
    }

    /// Change of the quote asset `Δy`.
    #[must_use]
    pub const fn quote(&self) -> f64 {
        self.quote
    }

    /// Applies the deltas to a starting balance.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NegativeAmount`] if a delta exceeds what the
    /// starting balance holds.
    pub fn apply(&self, start: TokenAmounts) -> Result<TokenAmounts> {
        TokenAmounts::new(start.base() + self.base, start.quote() + self.quote)
    }
}

impl fmt::Display for AmountDeltas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Δbase={} Δquote={}", self.base, self.quote)
    }
}

/// Reserve changes of liquidity `L` over `range` as the price moves from
/// `from` to `to`: `Δx = L Δ(1/√p)`, `Δy = L Δ√p`.
///
/// Both prices are clamped into the range first: outside of it the
/// reserves do not change.
///
/// # Errors
///
/// Returns [`DomainError::NonFinite`] if a delta overflows `f64`.
///
/// # Examples
///
/// ```
/// use clmm_liquidity::domain::{Liquidity, Price, PriceRange};
/// use clmm_liquidity::math::amount_deltas;
///
/// let range = PriceRange::from_f64(1.0, 4.0).expect("ordered");
/// let l = Liquidity::new(100.0).expect("nonnegative");
/// let (from, to) = (Price::new(2.25).expect("positive"), Price::new(9.0).expect("positive"));
///
/// // 1.5 → clamped 2.0: the quote side grows by 50, the base side drains.
/// let d = amount_deltas(l, &range, from, to).expect("finite");
/// assert!((d.quote() - 50.0).abs() < 1e-9);
/// assert!(d.base() < 0.0);
/// ```
pub fn amount_deltas(
    liquidity: Liquidity,
    range: &PriceRange,
    from: Price,
    to: Price,
) -> Result<AmountDeltas> {
    let (lo, hi) = (range.sqrt_lower(), range.sqrt_upper());
    let s_from = from.sqrt().clamp(lo, hi).get();
    let s_to = to.sqrt().clamp(lo, hi).get();
    let l = liquidity.get();

    let base = l * (1.0 / s_to - 1.0 / s_from);
    let quote = l * (s_to - s_from);
    if !base.is_finite() || !quote.is_finite() {
        return Err(DomainError::NonFinite("amount delta must be finite"));
    }
    Ok(AmountDeltas { base, quote })
}
