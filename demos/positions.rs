//! Reserves held by the open positions of a live pool.
//!
//! Sums the amounts of every position with nonzero liquidity at the
//! current price and checks that the in-range positions add up to the
//! pool's active liquidity. With `--position-id`, reports a single
//! position instead.
//!
//! # Run
//!
//! ```bash
//! cargo run --example positions -- --position-id 34054
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use clmm_liquidity::analytics::summarize_positions;
use clmm_liquidity::config::Config;
use clmm_liquidity::domain::{Decimals, Position, TokenAmounts};
use clmm_liquidity::subgraph::{PoolRecord, SubgraphClient, UreqTransport};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "positions")]
#[command(about = "Reserves of Uniswap v3 positions")]
struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pool whose positions to sum, overriding the configuration
    #[arg(long)]
    pool_id: Option<String>,

    /// Report a single position (NFT id) instead of the whole pool
    #[arg(long)]
    position_id: Option<String>,
}

fn print_amounts(label: &str, amounts: TokenAmounts, tokens: [(&str, Decimals); 2]) {
    let [(symbol0, decimals0), (symbol1, decimals1)] = tokens;
    println!(
        "{label}: {:.6} {symbol0}, {:.6} {symbol1}",
        decimals0.to_human(amounts.base()),
        decimals1.to_human(amounts.quote()),
    );
}

fn single_position(client: &SubgraphClient<UreqTransport>, config: &Config, id: &str) -> Result<()> {
    let tick_math = config.math.tick_math()?;
    let record = client.position(id).context("fetching position")?;
    let pool_id = record.pool_id().context("position has no pool")?;
    let pool = client.pool(pool_id)?;
    let position = record.to_position(&tick_math)?;
    let price = pool.price()?;

    println!("=== Position {} in pool {} ===", record.id(), pool.id());
    println!(
        "  Ticks: [{}, {}]  liquidity {}",
        record.tick_lower(),
        record.tick_upper(),
        record.liquidity_raw()
    );
    println!("  Composition at tick {}: {}", pool.tick(), position.composition(price));
    print_amounts("  Holds", position.amounts_at(price)?, tokens(&pool));
    Ok(())
}

fn tokens(pool: &PoolRecord) -> [(&str, Decimals); 2] {
    [
        (pool.token0().symbol(), pool.token0().decimals()),
        (pool.token1().symbol(), pool.token1().decimals()),
    ]
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(pool_id) = cli.pool_id {
        config.subgraph.pool_id = pool_id;
    }
    let client = SubgraphClient::from_config(&config.subgraph)?;

    if let Some(id) = &cli.position_id {
        return single_position(&client, &config, id);
    }

    let tick_math = config.math.tick_math()?;
    let pool = client.pool(&config.subgraph.pool_id).context("fetching pool")?;
    let records = client.positions(pool.id()).context("fetching positions")?;
    info!(count = records.len(), "loaded positions");
    let positions = records
        .iter()
        .map(|record| record.to_position(&tick_math))
        .collect::<Result<Vec<Position>, _>>()?;

    let summary = summarize_positions(&positions, pool.price()?)?;
    println!(
        "=== {}/{} pool {} ===",
        pool.token0().symbol(),
        pool.token1().symbol(),
        pool.id()
    );
    println!("  Open positions:    {}", summary.positions());
    println!("  In range:          {}", summary.in_range());
    println!("  Active liquidity:  {:.0}", summary.active_liquidity());
    println!("  Pool liquidity:    {}", pool.liquidity_raw());
    print_amounts("  Total held", summary.total(), tokens(&pool));
    Ok(())
}
