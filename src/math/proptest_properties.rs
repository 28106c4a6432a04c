//! Property-based tests using `proptest` for the liquidity math.
//!
//! 1. **Tick round trip**: `price_to_tick(tick_to_price(t)) == t`.
//! 2. **Square-root round trip**: `sqrt_price_to_price(price_to_sqrt_price(p)) ≈ p`.
//! 3. **Liquidity recovery**: amounts from `L` fed back in recover `L`.
//! 4. **Monotonicity**: base never grows and quote never shrinks as `p` rises.
//! 5. **Boundaries**: no quote at `pa`, no base at `pb`.
//! 6. **Reconstruction**: walking `liquidityNet` matches the open positions.

use proptest::prelude::*;

use crate::domain::{Liquidity, Price, PriceRange, Tick, TickLiquidityDelta};
use crate::math::{
    amounts_for_liquidity, liquidity_for_amounts, price_to_sqrt_price, price_to_tick,
    sqrt_price_to_price, tick_to_price, LiquidityDistribution, TickMath,
};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn price(v: f64) -> Price {
    let Ok(p) = Price::new(v) else {
        panic!("valid price {v}");
    };
    p
}

fn range(lower: f64, upper: f64) -> PriceRange {
    let Ok(r) = PriceRange::from_f64(lower, upper) else {
        panic!("valid range [{lower}, {upper}]");
    };
    r
}

fn liquidity(v: f64) -> Liquidity {
    let Ok(l) = Liquidity::new(v) else {
        panic!("valid liquidity {v}");
    };
    l
}

fn relative_error(actual: f64, expected: f64) -> f64 {
    ((actual - expected) / expected).abs()
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn tick_strategy() -> impl Strategy<Value = i32> {
    -887_272i32..=887_272
}

/// Log-uniform price over thirty orders of magnitude either side of one.
fn price_strategy() -> impl Strategy<Value = f64> {
    (-30.0f64..30.0).prop_map(|e| 10f64.powf(e))
}

fn liquidity_strategy() -> impl Strategy<Value = f64> {
    (0.0f64..12.0).prop_map(|e| 10f64.powf(e))
}

/// `(pa, pb, position of √p inside [√pa, √pb] as a fraction)`.
fn range_strategy() -> impl Strategy<Value = (f64, f64, f64)> {
    (-4.0f64..4.0, 0.005f64..2.0, 0.01f64..0.99)
        .prop_map(|(e, width, t)| (10f64.powf(e), 10f64.powf(e + width), t))
}

fn interior_price(pa: f64, pb: f64, t: f64) -> f64 {
    let s = pa.sqrt() + t * (pb.sqrt() - pa.sqrt());
    s * s
}

// ---------------------------------------------------------------------------
// Properties 1-2: Price encodings
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn prop_tick_round_trip(tick_val in tick_strategy()) {
        let Ok(tick) = Tick::new(tick_val) else {
            return Ok(());
        };
        let Ok(p) = tick_to_price(tick) else {
            panic!("tick {tick_val} must map to a finite price");
        };
        let Ok(back) = price_to_tick(p) else {
            panic!("price {} must map back to a tick", p.get());
        };
        prop_assert_eq!(back, tick, "round trip of tick {} gave {}", tick_val, back.get());
    }

    #[test]
    fn prop_sqrt_round_trip(p in price_strategy()) {
        let Ok(back) = sqrt_price_to_price(price_to_sqrt_price(price(p))) else {
            panic!("square of a valid sqrt price is a valid price");
        };
        prop_assert!(
            relative_error(back.get(), p) < 1e-12,
            "sqrt round trip of {} gave {}", p, back.get()
        );
    }
}

// ---------------------------------------------------------------------------
// Properties 3-5: Amounts and liquidity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_liquidity_recovered_from_amounts(
        l in liquidity_strategy(),
        (pa, pb, t) in range_strategy(),
    ) {
        let r = range(pa, pb);
        let p = price(interior_price(pa, pb, t));
        prop_assume!(r.contains(p));

        let Ok(amounts) = amounts_for_liquidity(liquidity(l), &r, p) else {
            panic!("finite amounts");
        };
        let Ok(back) = liquidity_for_amounts(amounts, &r, p) else {
            panic!("liquidity from in-range amounts");
        };
        prop_assert!(
            relative_error(back.get(), l) < 1e-9,
            "L = {} recovered as {} over [{}, {}] at {}", l, back.get(), pa, pb, p.get()
        );
    }

    #[test]
    fn prop_amounts_monotone_in_price(
        l in liquidity_strategy(),
        (pa, pb, _) in range_strategy(),
        lo in -0.5f64..1.5,
        step in 0.0f64..0.5,
    ) {
        let r = range(pa, pb);
        // Log-interpolated, so `t` below 0 or above 1 lands outside the range.
        let at = |t: f64| {
            let Ok(a) = amounts_for_liquidity(liquidity(l), &r, price(pa * (pb / pa).powf(t))) else {
                panic!("finite amounts");
            };
            a
        };
        let before = at(lo);
        let after = at(lo + step);
        let tolerance = 1e-12 * l.max(1.0) * (pb.sqrt() + 1.0 / pa.sqrt());
        prop_assert!(after.base() <= before.base() + tolerance,
            "base grew from {} to {}", before.base(), after.base());
        prop_assert!(after.quote() + tolerance >= before.quote(),
            "quote shrank from {} to {}", before.quote(), after.quote());
    }

    #[test]
    fn prop_single_asset_at_bounds(
        l in liquidity_strategy(),
        (pa, pb, _) in range_strategy(),
    ) {
        let r = range(pa, pb);
        let Ok(at_lower) = amounts_for_liquidity(liquidity(l), &r, r.lower()) else {
            panic!("finite amounts");
        };
        let Ok(at_upper) = amounts_for_liquidity(liquidity(l), &r, r.upper()) else {
            panic!("finite amounts");
        };
        prop_assert_eq!(at_lower.quote(), 0.0);
        prop_assert_eq!(at_upper.base(), 0.0);
    }
}

// ---------------------------------------------------------------------------
// Property 6: Reconstruction from liquidityNet
// ---------------------------------------------------------------------------

fn positions_strategy() -> impl Strategy<Value = Vec<(i32, i32, u64)>> {
    prop::collection::vec(
        (-50i32..50, 1i32..20, 1u64..u64::MAX).prop_map(|(lo, width, l)| {
            (lo * 60, (lo + width) * 60, l)
        }),
        1..12,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_reconstruction_matches_positions(positions in positions_strategy()) {
        let deltas = positions.iter().flat_map(|&(lo, hi, l)| {
            let (Ok(lo), Ok(hi)) = (Tick::new(lo), Tick::new(hi)) else {
                panic!("ticks within domain");
            };
            [
                TickLiquidityDelta::new(lo, i128::from(l)),
                TickLiquidityDelta::new(hi, -i128::from(l)),
            ]
        });
        let Ok(dist) = LiquidityDistribution::new(deltas, TickMath::UNISWAP_V3) else {
            panic!("no overflow for u64 liquidities");
        };

        for segment in dist.segments_from_lowest() {
            let Ok(segment) = segment else {
                panic!("aggregate of open positions is never negative");
            };
            let expected: u128 = positions
                .iter()
                .filter(|&&(lo, hi, _)| lo <= segment.lower().get() && segment.lower().get() < hi)
                .map(|&(_, _, l)| u128::from(l))
                .sum();
            prop_assert_eq!(segment.liquidity(), expected);
            prop_assert_eq!(dist.liquidity_at(segment.lower()), Ok(expected));
        }
    }
}
