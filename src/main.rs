//! lob-sim demo binary.
//!
//! Replays a short order sequence against a fresh engine and prints the
//! resulting trades and top of book. Logging is controlled by `RUST_LOG`
//! (default `info`); engine settings come from `LOB_*` variables.

use lob_sim::types::price::from_fixed_trimmed;
use lob_sim::{EngineConfig, MatchingEngine, Side};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn fmt_price(price: Option<u64>) -> String {
    price.map_or_else(|| "none".to_string(), from_fixed_trimmed)
}

fn print_top(engine: &MatchingEngine) {
    println!("  Best bid: {}", fmt_price(engine.best_bid()));
    println!("  Best ask: {}", fmt_price(engine.best_ask()));
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = EngineConfig::from_env()?;
    info!(
        order_capacity = config.order_capacity,
        verify_invariants = config.verify_invariants,
        "Starting order book simulator"
    );
    let mut engine = MatchingEngine::with_config(config);

    println!("=== Order Book Simulator ===");

    engine.submit(Side::Buy, 99.0, 100)?;
    engine.submit(Side::Buy, 98.5, 200)?;
    engine.submit(Side::Sell, 101.0, 150)?;

    println!("After initial orders:");
    print_top(&engine);

    let aggressive = engine.submit(Side::Buy, 102.0, 300)?;
    println!(
        "\nAggressive buy at 102 (id {}) generated {} trade(s):",
        aggressive.order_id,
        aggressive.trades.len()
    );
    for trade in &aggressive.trades {
        println!(
            "  Trade: buy_id={}, sell_id={}, px={}, qty={}",
            trade.buy_order_id,
            trade.sell_order_id,
            from_fixed_trimmed(trade.price),
            trade.quantity
        );
    }

    println!("\nFinal book state:");
    print_top(&engine);
    println!("  State root: {}", hex::encode(engine.state_root()));

    Ok(())
}
