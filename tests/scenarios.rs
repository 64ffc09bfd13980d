//! Behavioural tests for the matching engine.
//!
//! Covers the reference walkthrough, the price-time laws, and seeded random
//! order flow audited after every call.

use lob_sim::types::price::f64_to_fixed;
use lob_sim::{EngineConfig, EngineError, MatchingEngine, Side, Trade};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn px(price: f64) -> u64 {
    f64_to_fixed(price).unwrap()
}

fn audited_engine() -> MatchingEngine {
    MatchingEngine::with_config(EngineConfig::default().with_invariant_checks(true))
}

fn assert_not_crossed(engine: &MatchingEngine) {
    if let (Some(bid), Some(ask)) = (engine.best_bid(), engine.best_ask()) {
        assert!(bid < ask, "crossed book: bid {} ask {}", bid, ask);
    }
}

// ============================================================================
// REFERENCE WALKTHROUGH
// ============================================================================

#[test]
fn walkthrough() {
    let mut engine = audited_engine();

    let r1 = engine.submit(Side::Buy, 99.0, 100).unwrap();
    assert_eq!(r1.order_id, 1);
    assert!(r1.trades.is_empty());
    assert_eq!(engine.best_bid(), Some(px(99.0)));

    let r2 = engine.submit(Side::Buy, 98.5, 200).unwrap();
    assert_eq!(r2.order_id, 2);
    assert!(r2.trades.is_empty());
    assert_eq!(engine.best_bid(), Some(px(99.0)));

    let r3 = engine.submit(Side::Sell, 101.0, 150).unwrap();
    assert_eq!(r3.order_id, 3);
    assert!(r3.trades.is_empty());
    assert_eq!(engine.best_ask(), Some(px(101.0)));

    let r4 = engine.submit(Side::Buy, 102.0, 300).unwrap();
    assert_eq!(r4.order_id, 4);
    assert_eq!(r4.trades, vec![Trade::new(4, 3, px(101.0), 150)]);
    assert_eq!(r4.remaining, 150);
    assert_eq!(engine.order(4).unwrap().remaining, 150);
    assert_eq!(engine.best_ask(), None);
    assert_eq!(engine.best_bid(), Some(px(102.0)));

    assert!(engine.cancel(2).is_ok());
    assert_eq!(engine.best_bid(), Some(px(102.0)));
    assert_eq!(engine.cancel(2), Err(EngineError::OrderNotFound(2)));

    // Order 1 still rests at 99.0 behind order 4
    let bids = engine.depth(Side::Buy, 10);
    assert_eq!(bids.len(), 2);
    assert_eq!(bids[1].price, px(99.0));
}

// ============================================================================
// LAWS
// ============================================================================

#[test]
fn fifo_within_level() {
    let mut engine = audited_engine();
    for _ in 0..3 {
        engine.submit(Side::Sell, 101.0, 10).unwrap();
    }

    let result = engine.submit(Side::Buy, 101.0, 25).unwrap();
    let sellers: Vec<u64> = result.trades.iter().map(|t| t.sell_order_id).collect();
    assert_eq!(sellers, vec![1, 2, 3]);
    assert_eq!(result.trades[2].quantity, 5);
}

#[test]
fn fifo_survives_cancel_ahead() {
    let mut engine = audited_engine();
    for _ in 0..3 {
        engine.submit(Side::Buy, 99.0, 10).unwrap();
    }
    engine.cancel(1).unwrap();

    let result = engine.submit(Side::Sell, 99.0, 15).unwrap();
    assert_eq!(
        result.trades,
        vec![Trade::new(2, 4, px(99.0), 10), Trade::new(3, 4, px(99.0), 5)]
    );
}

#[test]
fn cancel_from_middle_after_front_filled() {
    let mut engine = audited_engine();
    for _ in 0..4 {
        engine.submit(Side::Sell, 100.0, 10).unwrap();
    }
    // Fill order 1 completely
    engine.submit(Side::Buy, 100.0, 10).unwrap();

    // Order 3 now sits between 2 and 4
    let cancelled = engine.cancel(3).unwrap();
    assert_eq!(cancelled.id, 3);

    let result = engine.submit(Side::Buy, 100.0, 30).unwrap();
    let sellers: Vec<u64> = result.trades.iter().map(|t| t.sell_order_id).collect();
    assert_eq!(sellers, vec![2, 4]);
    assert_eq!(result.remaining, 10);
}

#[test]
fn buy_takes_lowest_ask_first() {
    let mut engine = audited_engine();
    engine.submit(Side::Sell, 103.0, 10).unwrap();
    engine.submit(Side::Sell, 101.0, 10).unwrap();
    engine.submit(Side::Sell, 102.0, 10).unwrap();

    let result = engine.submit(Side::Buy, 103.0, 30).unwrap();
    let prices: Vec<u64> = result.trades.iter().map(|t| t.price).collect();
    assert_eq!(prices, vec![px(101.0), px(102.0), px(103.0)]);
    assert!(engine.is_empty());
}

#[test]
fn sell_takes_highest_bid_first() {
    let mut engine = audited_engine();
    engine.submit(Side::Buy, 97.0, 10).unwrap();
    engine.submit(Side::Buy, 99.0, 10).unwrap();
    engine.submit(Side::Buy, 98.0, 10).unwrap();

    let result = engine.submit(Side::Sell, 98.0, 30).unwrap();
    let prices: Vec<u64> = result.trades.iter().map(|t| t.price).collect();
    assert_eq!(prices, vec![px(99.0), px(98.0)]);
    assert_eq!(result.remaining, 10);
    assert_eq!(engine.best_ask(), Some(px(98.0)));
    assert_eq!(engine.best_bid(), Some(px(97.0)));
}

#[test]
fn aggressor_gets_resting_price() {
    let mut engine = audited_engine();
    engine.submit(Side::Sell, 100.0, 10).unwrap();

    let result = engine.submit(Side::Buy, 150.0, 10).unwrap();
    assert_eq!(result.trades[0].price, px(100.0));
}

#[test]
fn non_marketable_order_rests() {
    let mut engine = audited_engine();
    engine.submit(Side::Sell, 101.0, 10).unwrap();

    let result = engine.submit(Side::Buy, 100.99, 10).unwrap();
    assert!(result.trades.is_empty());
    assert_eq!(engine.best_bid(), Some(px(100.99)));
    assert_eq!(engine.best_ask(), Some(px(101.0)));
}

#[test]
fn flat_round_trip() {
    let mut engine = audited_engine();
    engine.submit(Side::Buy, 50.25, 42).unwrap();

    let result = engine.submit(Side::Sell, 50.25, 42).unwrap();
    assert_eq!(result.trades, vec![Trade::new(1, 2, px(50.25), 42)]);
    assert!(engine.is_empty());
    assert_eq!(engine.best_bid(), None);
    assert_eq!(engine.best_ask(), None);
}

#[test]
fn equal_float_prices_share_level() {
    let mut engine = audited_engine();
    engine.submit(Side::Buy, 0.1 + 0.2, 10).unwrap();
    engine.submit(Side::Buy, 0.3, 10).unwrap();

    assert_eq!(engine.bid_levels(), 1);
    assert_eq!(engine.depth(Side::Buy, 1)[0].order_count, 2);
}

#[test]
fn double_cancel_leaves_state_unchanged() {
    let mut engine = audited_engine();
    engine.submit(Side::Buy, 99.0, 10).unwrap();
    engine.submit(Side::Buy, 98.0, 10).unwrap();
    engine.submit(Side::Sell, 101.0, 10).unwrap();

    engine.cancel(2).unwrap();
    let root = engine.state_root();
    let next_id = engine.peek_next_order_id();

    assert_eq!(engine.cancel(2), Err(EngineError::OrderNotFound(2)));
    assert_eq!(engine.state_root(), root);
    assert_eq!(engine.peek_next_order_id(), next_id);
}

#[test]
fn rejected_order_consumes_no_id() {
    let mut engine = audited_engine();
    engine.submit(Side::Buy, 99.0, 10).unwrap();
    assert!(engine.submit(Side::Buy, 0.0, 10).is_err());
    assert!(engine.submit(Side::Buy, 99.0, 0).is_err());

    let result = engine.submit(Side::Sell, 101.0, 10).unwrap();
    assert_eq!(result.order_id, 2);
}

#[test]
fn ids_never_reused_after_fill_or_cancel() {
    let mut engine = audited_engine();
    let mut seen = std::collections::HashSet::new();

    for i in 0..50 {
        let side = if i % 2 == 0 { Side::Buy } else { Side::Sell };
        let result = engine.submit(side, 100.0, 5).unwrap();
        assert!(seen.insert(result.order_id), "id {} reused", result.order_id);
        if i % 7 == 0 {
            let _ = engine.cancel(result.order_id);
        }
    }
}

// ============================================================================
// SEEDED RANDOM FLOW
// ============================================================================

#[test]
fn random_flow_preserves_invariants() {
    for seed in 0..20u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut engine = audited_engine();
        let mut live: Vec<u64> = Vec::new();

        for _ in 0..500 {
            if !live.is_empty() && rng.gen_bool(0.2) {
                let idx = rng.gen_range(0..live.len());
                let id = live.swap_remove(idx);
                // May already have been filled
                let _ = engine.cancel(id);
                assert_not_crossed(&engine);
                continue;
            }

            let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
            let ticks: u64 = rng.gen_range(95..=105);
            let quantity: u64 = rng.gen_range(1..=50);

            let best_before = engine.book().best_price(side.opposite());
            let result = engine.submit(side, ticks as f64, quantity).unwrap();

            // Fill conservation
            assert_eq!(result.filled_quantity() + result.remaining, quantity);

            // Never trades through the incoming limit; first fill is at the prior best
            for trade in &result.trades {
                assert!(side.crosses(px(ticks as f64), trade.price));
                let (ours, theirs) = match side {
                    Side::Buy => (trade.buy_order_id, trade.sell_order_id),
                    Side::Sell => (trade.sell_order_id, trade.buy_order_id),
                };
                assert_eq!(ours, result.order_id);
                assert!(theirs < result.order_id);
            }
            if let Some(first) = result.trades.first() {
                assert_eq!(Some(first.price), best_before);
            }

            // Trade prices move away from the aggressor's best as levels are consumed
            for pair in result.trades.windows(2) {
                match side {
                    Side::Buy => assert!(pair[0].price <= pair[1].price),
                    Side::Sell => assert!(pair[0].price >= pair[1].price),
                }
            }

            assert_not_crossed(&engine);
            if result.is_resting() {
                live.push(result.order_id);
            }
        }

        engine.book().assert_invariants();
    }
}

#[test]
fn determinism_same_flow_same_root() {
    fn run(seed: u64) -> ([u8; 32], usize) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut engine = MatchingEngine::new();
        let mut trades = 0;
        for _ in 0..2_000 {
            let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
            let price = 100.0 + rng.gen_range(-20i32..=20) as f64 * 0.25;
            let quantity: u64 = rng.gen_range(1..=100);
            trades += engine.submit(side, price, quantity).unwrap().trades.len();
        }
        (engine.state_root(), trades)
    }

    assert_eq!(run(7), run(7));
    assert_ne!(run(7).0, run(8).0);
}
