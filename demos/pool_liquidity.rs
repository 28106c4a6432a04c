//! Liquidity distribution and fee-implied volatility of a live pool.
//!
//! Fetches the pool and its initialized ticks from the Uniswap v3
//! subgraph, walks the tick ranges outward from the current price, and
//! prints the reserves locked in each one. Finishes with the volatility
//! implied by the last few days of volume.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=clmm_liquidity=debug cargo run --example pool_liquidity -- --config pool.toml
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::DateTime;
use clap::Parser;
use clmm_liquidity::analytics::{current_range_amounts, current_range_base_equivalent, implied_volatility};
use clmm_liquidity::config::Config;
use clmm_liquidity::domain::{adjust_price, Price, TokenAmounts};
use clmm_liquidity::math::{Direction, TickSegment};
use clmm_liquidity::subgraph::{PoolRecord, SubgraphClient};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pool_liquidity")]
#[command(about = "Liquidity distribution of a Uniswap v3 pool")]
struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pool to inspect, overriding the configuration
    #[arg(long)]
    pool_id: Option<String>,

    /// Print every spacing-wide range, not only initialized ticks
    #[arg(long)]
    all_ticks: bool,

    /// Days of volume for the volatility estimate
    #[arg(long, default_value_t = 5)]
    days: u32,
}

fn human(pool: &PoolRecord, amounts: TokenAmounts) -> (f64, f64) {
    (
        pool.token0().decimals().to_human(amounts.base()),
        pool.token1().decimals().to_human(amounts.quote()),
    )
}

fn print_segment(pool: &PoolRecord, segment: &TickSegment, current: Price) -> Result<()> {
    let locked = segment.locked_amounts(current)?;
    let (base, quote) = human(pool, locked);
    let price = adjust_price(segment.lower_price(), pool.token0().decimals(), pool.token1().decimals())?;
    println!(
        "  ticks [{:>7}, {:>7})  price {:>14.8}  {:>16.4} {}  {:>16.4} {}",
        segment.lower().get(),
        segment.upper().get(),
        price.get(),
        base,
        pool.token0().symbol(),
        quote,
        pool.token1().symbol(),
    );
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path).with_context(|| format!("loading {}", path.display()))?,
        None => {
            warn!("no config file given, using defaults");
            Config::default()
        }
    };
    if let Some(pool_id) = cli.pool_id {
        config.subgraph.pool_id = pool_id;
    }
    config.validate()?;
    let tick_math = config.math.tick_math()?;
    let pool_id = config.subgraph.pool_id.clone();

    let client = SubgraphClient::from_config(&config.subgraph)?;
    let pool = client.pool(&pool_id).context("fetching pool")?;
    let distribution = client.distribution(&pool_id, tick_math).context("fetching ticks")?;
    info!(ticks = distribution.len(), "loaded pool");

    let current = pool.price()?;
    println!(
        "=== {}/{} pool {} (fee {}) ===",
        pool.token0().symbol(),
        pool.token1().symbol(),
        pool.id(),
        pool.fee_tier()
    );
    println!("  Current tick:  {}", pool.tick());
    println!(
        "  Current price: {:.8} {} per {}",
        pool.human_price()?.get(),
        pool.token1().symbol(),
        pool.token0().symbol()
    );
    println!("  Liquidity:     {}", pool.liquidity_raw());

    let reconstructed = distribution.liquidity_at(pool.tick())?;
    if reconstructed != pool.liquidity_raw() {
        warn!(reconstructed, reported = pool.liquidity_raw(), "tick data disagrees with pool liquidity");
    }

    // ── Ranges above and below the price ────────────────────────────────
    for direction in [Direction::Up, Direction::Down] {
        println!("\n{direction:?} from the current tick:");
        for segment in distribution.segments_from(pool.tick(), pool.liquidity_raw(), direction) {
            let segment = segment?;
            if cli.all_ticks {
                for piece in segment.split(pool.tick_spacing(), &tick_math)? {
                    print_segment(&pool, &piece, current)?;
                }
            } else {
                print_segment(&pool, &segment, current)?;
            }
        }
    }
    let total = distribution.total_locked(current)?;
    let (base, quote) = human(&pool, total);
    println!(
        "\nTotal locked: {base:.4} {}, {quote:.4} {}",
        pool.token0().symbol(),
        pool.token1().symbol()
    );

    // ── Current range and implied volatility ────────────────────────────
    let in_range = current_range_amounts(
        pool.liquidity(),
        pool.tick(),
        pool.sqrt_price(),
        pool.tick_spacing(),
        &tick_math,
    )?;
    let (base, quote) = human(&pool, in_range);
    println!(
        "Current range holds {base:.4} {}, {quote:.4} {}",
        pool.token0().symbol(),
        pool.token1().symbol()
    );

    let locked = pool.token0().decimals().to_human(current_range_base_equivalent(
        pool.liquidity(),
        pool.tick(),
        pool.tick_spacing(),
        &tick_math,
    )?);
    println!("\n{locked:.0} {} locked in the current range", pool.token0().symbol());
    // The newest day is still in progress.
    let days = client.pool_day_volumes(&pool_id, cli.days.saturating_add(1))?;
    for day in days.iter().skip(1).rev() {
        let iv = implied_volatility(pool.fee_tier(), day.volume_usd(), locked)?;
        let date = DateTime::from_timestamp(day.date(), 0)
            .map_or_else(|| day.date().to_string(), |d| d.format("%b %d, %Y").to_string());
        println!(
            "  {date}: volume {:.0} USD  IV {:.2}%",
            day.volume_usd(),
            iv * 100.0
        );
    }

    Ok(())
}
