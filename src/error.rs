//! Error types for the liquidity-math engine.
//!
//! Every fallible operation in [`domain`](crate::domain),
//! [`math`](crate::math) and [`analytics`](crate::analytics) returns
//! [`DomainError`]. Each variant carries a static message naming the
//! precondition that the input violated, so callers can report it without
//! further context.
//!
//! Failures of the engine are never transient: they mean the numeric input
//! was invalid. Retrying belongs to the network adapter, which has its own
//! [`SubgraphError`](crate::subgraph::SubgraphError).

use thiserror::Error;

/// A violated numeric precondition.
///
/// # Examples
///
/// ```
/// use clmm_liquidity::domain::Price;
/// use clmm_liquidity::error::DomainError;
///
/// let err = Price::new(0.0).err();
/// assert_eq!(
///     err,
///     Some(DomainError::NonPositivePrice("price must be strictly positive"))
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum DomainError {
    /// A price or square-root price was zero or negative.
    #[error("non-positive price: {0}")]
    NonPositivePrice(&'static str),

    /// An input or intermediate value was NaN or infinite.
    #[error("non-finite value: {0}")]
    NonFinite(&'static str),

    /// A range with `lower >= upper`.
    #[error("invalid range: {0}")]
    InvalidRange(&'static str),

    /// A tick outside `[-887272, 887272]`.
    #[error("invalid tick: {0}")]
    InvalidTick(&'static str),

    /// A tick base that is not finite and greater than one.
    #[error("invalid tick base: {0}")]
    InvalidTickBase(&'static str),

    /// A tick spacing of zero or beyond the tick domain.
    #[error("invalid tick spacing: {0}")]
    InvalidTickSpacing(&'static str),

    /// The current price does not lie where the operation requires it to.
    #[error("price outside range: {0}")]
    PriceOutsideRange(&'static str),

    /// A denominator evaluated to zero.
    #[error("zero denominator: {0}")]
    ZeroDenominator(&'static str),

    /// A square root of a negative quantity was required.
    #[error("negative radicand: {0}")]
    NegativeRadicand(&'static str),

    /// A token amount was negative.
    #[error("negative amount: {0}")]
    NegativeAmount(&'static str),

    /// A liquidity value (supplied or reconstructed) was negative.
    #[error("negative liquidity: {0}")]
    NegativeLiquidity(&'static str),

    /// Token decimals outside `0..=18`.
    #[error("invalid decimals: {0}")]
    InvalidDecimals(&'static str),

    /// Integer liquidity accumulation left the `i128` range.
    #[error("overflow: {0}")]
    Overflow(&'static str),
}

/// Convenience alias used throughout the engine.
pub type Result<T> = core::result::Result<T, DomainError>;
