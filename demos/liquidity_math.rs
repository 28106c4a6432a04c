//! Worked examples of the liquidity formulas, with hand-picked numbers.
//!
//! A liquidity provider with ETH and USDC asks:
//!
//! 1. How much USDC goes with 2 ETH in the range `[1500, 2500]` at 2000?
//! 2. With 2 ETH, 4000 USDC and a top of 3000, where must the range start?
//! 3. What does that position hold after the price moves?
//!
//! # Run
//!
//! ```bash
//! cargo run --example liquidity_math -- --target-price 2500
//! ```

use anyhow::Result;
use clap::Parser;
use clmm_liquidity::domain::{Price, PriceRange, TokenAmounts};
use clmm_liquidity::math::{
    amount_deltas, amounts_for_liquidity, liquidity_for_amounts, liquidity_for_base,
    lower_bound_for_amounts, price_to_tick, tick_to_price, RangeComposition, RangeRatios,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "liquidity_math")]
#[command(about = "Concentrated-liquidity worked examples")]
struct Cli {
    /// ETH deposited in the first example
    #[arg(long, default_value_t = 2.0)]
    eth: f64,

    /// Price the third example moves to
    #[arg(long, default_value_t = 2500.0)]
    target_price: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();
    info!(eth = cli.eth, target = cli.target_price, "running worked examples");

    // ── 1. Quote needed for a base deposit ──────────────────────────────
    let price = Price::new(2000.0)?;
    let range = PriceRange::from_f64(1500.0, 2500.0)?;
    let l = liquidity_for_base(cli.eth, &range, price)?;
    let amounts = amounts_for_liquidity(l, &range, price)?;
    println!("=== Example 1: deposit {} ETH ===", cli.eth);
    println!("  Range:      [{}, {}]", range.lower(), range.upper());
    println!("  Liquidity:  {:.2}", l.get());
    println!("  USDC needed: {:.2}", amounts.quote());

    // ── 2. Missing lower bound ──────────────────────────────────────────
    let upper = Price::new(3000.0)?;
    let lower = lower_bound_for_amounts(2.0, 4000.0, price, upper)?;
    let range = PriceRange::new(lower, upper)?;
    let ratios = RangeRatios::of_range(&range, price)?;
    println!("\n=== Example 2: 2 ETH + 4000 USDC, top at {upper} ===");
    println!("  Lower bound: {:.2}", lower.get());
    println!("  Relative:    {ratios}");
    println!(
        "  Ticks:       [{}, {}]",
        price_to_tick(lower)?,
        price_to_tick(upper)?
    );

    // ── 3. Reserves after a price move ──────────────────────────────────
    let start = TokenAmounts::new(2.0, 4000.0)?;
    let l = liquidity_for_amounts(start, &range, price)?;
    let target = Price::new(cli.target_price)?;
    let after = amounts_for_liquidity(l, &range, target)?;
    let deltas = amount_deltas(l, &range, price, target)?;
    println!("\n=== Example 3: price moves to {target} ===");
    println!("  Composition: {}", RangeComposition::classify(&range, target));
    println!("  Holdings:    {:.4} ETH, {:.2} USDC", after.base(), after.quote());
    println!("  Change:      {deltas}");
    println!("  Check:       {}", deltas.apply(start)?);

    // ── Tick encoding ───────────────────────────────────────────────────
    let tick = price_to_tick(price)?;
    println!("\nPrice {price} sits at tick {tick}; that tick starts at {:.4}", tick_to_price(tick)?.get());

    Ok(())
}
