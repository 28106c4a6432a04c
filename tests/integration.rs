//! Integration tests exercising the public API end to end.
//!
//! These follow a liquidity provider's questions through the engine:
//! how much of the other asset a deposit needs, where a range must start
//! for given holdings, how reserves move with the price, and whether the
//! pool's tick data adds up to the liquidity it reports.

#![allow(clippy::panic)]

use clmm_liquidity::analytics::{current_range_amounts, summarize_positions};
use clmm_liquidity::config::Config;
use clmm_liquidity::domain::{
    Liquidity, Position, Price, PriceRange, Tick, TickLiquidityDelta, TokenAmounts,
};
use clmm_liquidity::error::DomainError;
use clmm_liquidity::math::{
    amount_deltas, amounts_for_liquidity, liquidity_for_amounts, liquidity_for_base,
    lower_bound_for_amounts, upper_bound_for_amounts, LiquidityDistribution, RangeComposition,
    TickMath,
};
use clmm_liquidity::subgraph::{SubgraphClient, SubgraphError};
use clmm_liquidity::traits::GraphqlTransport;
use serde_json::{json, Value};

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
        panic!("valid range");
    };
    r
}

fn tick(v: i32) -> Tick {
    let Ok(t) = Tick::new(v) else {
        panic!("valid tick {v}");
    };
    t
}

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

// ---------------------------------------------------------------------------
// Deposits
// ---------------------------------------------------------------------------

#[test]
fn deposit_of_two_eth_needs_matching_usdc() {
    let p = price(2000.0);
    let r = range(1500.0, 2500.0);

    let Ok(l) = liquidity_for_base(2.0, &r, p) else {
        panic!("price is below the upper bound");
    };
    assert_close(l.get(), 847.213_595_5, 1e-6);

    let Ok(amounts) = amounts_for_liquidity(l, &r, p) else {
        panic!("finite amounts");
    };
    assert_close(amounts.base(), 2.0, 1e-9);
    assert_close(amounts.quote(), 5076.10, 0.01);
}

#[test]
fn lower_bound_from_holdings() {
    let Ok(pa) = lower_bound_for_amounts(2.0, 4000.0, price(2000.0), price(3000.0)) else {
        panic!("solvable");
    };
    assert_close(pa.get(), 1333.33, 0.01);

    // Closing the loop: that range consumes exactly the holdings.
    let r = range(pa.get(), 3000.0);
    let Ok(amounts) = TokenAmounts::new(2.0, 4000.0) else {
        panic!("nonnegative amounts");
    };
    let Ok(l) = liquidity_for_amounts(amounts, &r, price(2000.0)) else {
        panic!("in range");
    };
    let Ok(back) = amounts_for_liquidity(l, &r, price(2000.0)) else {
        panic!("finite amounts");
    };
    assert_close(back.base(), 2.0, 1e-9);
    assert_close(back.quote(), 4000.0, 1e-6);
}

#[test]
fn upper_bound_inverts_lower_bound() {
    let Ok(pa) = lower_bound_for_amounts(2.0, 4000.0, price(2000.0), price(3000.0)) else {
        panic!("solvable");
    };
    let Ok(pb) = upper_bound_for_amounts(2.0, 4000.0, price(2000.0), pa) else {
        panic!("solvable");
    };
    assert_close(pb.get(), 3000.0, 1e-6);
}

#[test]
fn holdings_that_fit_no_range_are_rejected() {
    // The quote side alone would need a lower bound at or below zero.
    assert!(matches!(
        lower_bound_for_amounts(0.001, 1.0e9, price(2000.0), price(3000.0)),
        Err(DomainError::PriceOutsideRange(_))
    ));
}

// ---------------------------------------------------------------------------
// Price moves
// ---------------------------------------------------------------------------

#[test]
fn price_move_rebalances_position() {
    let r = range(4000.0 / 3.0, 3000.0);
    let Ok(start) = TokenAmounts::new(2.0, 4000.0) else {
        panic!("nonnegative amounts");
    };
    let Ok(l) = liquidity_for_amounts(start, &r, price(2000.0)) else {
        panic!("in range");
    };
    assert_close(l.get(), 487.417, 1e-3);

    let Ok(at_2500) = amounts_for_liquidity(l, &r, price(2500.0)) else {
        panic!("finite amounts");
    };
    assert_close(at_2500.base(), 0.849_364, 1e-5);
    assert_close(at_2500.quote(), 6572.90, 0.01);

    let Ok(deltas) = amount_deltas(l, &r, price(2000.0), price(2500.0)) else {
        panic!("finite deltas");
    };
    assert_close(deltas.base(), -1.150_636, 1e-5);
    assert_close(deltas.quote(), 2572.90, 0.01);
    let Ok(applied) = deltas.apply(start) else {
        panic!("deltas stay within holdings");
    };
    assert_close(applied.base(), at_2500.base(), 1e-9);
    assert_close(applied.quote(), at_2500.quote(), 1e-6);
}

#[test]
fn leaving_the_range_converts_fully() {
    let r = range(1500.0, 2500.0);
    let Ok(l) = Liquidity::new(847.213_595_5) else {
        panic!("nonnegative");
    };
    let Ok(above) = amounts_for_liquidity(l, &r, price(4000.0)) else {
        panic!("finite amounts");
    };
    let Ok(below) = amounts_for_liquidity(l, &r, price(1000.0)) else {
        panic!("finite amounts");
    };
    assert_eq!(RangeComposition::classify(&r, price(4000.0)), RangeComposition::AboveRange);
    assert_eq!(above.base(), 0.0);
    assert!(above.quote() > 0.0);
    assert_eq!(below.quote(), 0.0);
    assert!(below.base() > 0.0);
}

// ---------------------------------------------------------------------------
// Pool reconstruction
// ---------------------------------------------------------------------------

/// Serves one page of ticks, then the pool.
struct PoolFixture {
    ticks: Value,
}

impl GraphqlTransport for PoolFixture {
    fn execute(&self, query: &str, _variables: &Value) -> Result<Value, SubgraphError> {
        if query.contains("ticks(") {
            return Ok(self.ticks.clone());
        }
        Ok(json!({"pools": [{
            "id": "0xpool",
            "tick": "30",
            "sqrtPrice": "79347087983665980000000000000",
            "liquidity": "1500000000000000000",
            "feeTier": "3000",
            "token0": {"symbol": "USDC", "decimals": "6"},
            "token1": {"symbol": "WETH", "decimals": "18"}
        }]}))
    }
}

fn fixture() -> PoolFixture {
    PoolFixture {
        ticks: json!({"ticks": [
            {"tickIdx": "-600", "liquidityNet": "1000000000000000000"},
            {"tickIdx": "-60", "liquidityNet": "500000000000000000"},
            {"tickIdx": "120", "liquidityNet": "-500000000000000000"},
            {"tickIdx": "600", "liquidityNet": "-1000000000000000000"}
        ]}),
    }
}

#[test]
fn tick_data_adds_up_to_reported_liquidity() {
    let client = SubgraphClient::new(fixture());
    let Ok(pool) = client.pool("0xpool") else {
        panic!("pool decodes");
    };
    let Ok(dist) = client.distribution("0xpool", TickMath::UNISWAP_V3) else {
        panic!("ticks decode");
    };
    assert_eq!(dist.liquidity_at(pool.tick()), Ok(pool.liquidity_raw()));
    assert_eq!(dist.liquidity_at(tick(-600)), Ok(1_000_000_000_000_000_000));
    assert_eq!(dist.liquidity_at(tick(600)), Ok(0));
}

#[test]
fn locked_reserves_match_open_positions() {
    let tm = TickMath::UNISWAP_V3;
    let raw = [(-600, 600, 1_000_000_000_000_000_000u128), (-60, 120, 500_000_000_000_000_000)];
    let deltas = raw.iter().flat_map(|&(lo, hi, l)| {
        let Ok(net) = i128::try_from(l) else {
            panic!("fits i128");
        };
        [TickLiquidityDelta::new(tick(lo), net), TickLiquidityDelta::new(tick(hi), -net)]
    });
    let Ok(dist) = LiquidityDistribution::new(deltas, tm) else {
        panic!("no overflow");
    };
    let positions: Vec<Position> = raw
        .iter()
        .map(|&(lo, hi, l)| {
            let (Ok(pa), Ok(pb)) = (tm.tick_to_price(tick(lo)), tm.tick_to_price(tick(hi))) else {
                panic!("valid ticks");
            };
            let Ok(r) = PriceRange::new(pa, pb) else {
                panic!("ordered");
            };
            Position::new(Liquidity::from_raw(l), r)
        })
        .collect();

    let p = price(1.003);
    let (Ok(locked), Ok(summary)) = (dist.total_locked(p), summarize_positions(&positions, p))
    else {
        panic!("finite amounts");
    };
    let total = summary.total();
    assert!(((locked.base() - total.base()) / total.base()).abs() < 1e-9);
    assert!(((locked.quote() - total.quote()) / total.quote()).abs() < 1e-9);
    assert_eq!(summary.in_range(), 2);
}

#[test]
fn current_range_of_fixture_pool() {
    let client = SubgraphClient::new(fixture());
    let Ok(pool) = client.pool("0xpool") else {
        panic!("pool decodes");
    };
    let Ok(amounts) = current_range_amounts(
        pool.liquidity(),
        pool.tick(),
        pool.sqrt_price(),
        pool.tick_spacing(),
        &TickMath::UNISWAP_V3,
    ) else {
        panic!("valid current range");
    };
    assert!(amounts.base() > 0.0);
    assert!(amounts.quote() > 0.0);
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn config_drives_tick_math() {
    let Ok(config) = Config::from_toml_str(
        r#"
        [math]
        tick_base = 1.001

        [subgraph]
        pool_id = "0x88e6a0c2ddd26feeb64f039a2c41296fcb3f5640"
        page_size = 100
        "#,
    ) else {
        panic!("valid config");
    };
    let Ok(tm) = config.math.tick_math() else {
        panic!("valid base");
    };
    assert_eq!(tm.price_to_tick(price(2.0)), Ok(tick(693)));
    assert_eq!(config.subgraph.page_size, 100);
    assert_eq!(config.subgraph.retries, 5);
}

#[test]
fn config_rejects_bad_tick_base() {
    assert!(Config::from_toml_str("[math]\ntick_base = 1.0\n").is_err());
}
