//! Per-tick change of aggregate pool liquidity.

use core::fmt;

use super::Tick;

/// The signed change `liquidityNet` applied to the pool's active liquidity
/// when the price crosses `tick` moving upward.
///
/// Crossing downward applies the negation. A position over `[a, b)` adds
/// `+L` at `a` and `-L` at `b`, so the deltas of a consistent pool sum to
/// zero over all ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickLiquidityDelta {
    tick: Tick,
    liquidity_net: i128,
}

impl TickLiquidityDelta {
    /// Creates a new delta.
    #[must_use]
    pub const fn new(tick: Tick, liquidity_net: i128) -> Self {
        Self {
            tick,
            liquidity_net,
        }
    }

    /// The initialized tick.
    #[must_use]
    pub const fn tick(&self) -> Tick {
        self.tick
    }

    /// The signed liquidity change on upward crossing.
    #[must_use]
    pub const fn liquidity_net(&self) -> i128 {
        self.liquidity_net
    }
}

impl fmt::Display for TickLiquidityDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick {}: {:+}", self.tick, self.liquidity_net)
    }
}
