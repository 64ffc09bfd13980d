//! # lob-sim
//!
//! Single-instrument limit order book simulator with price-time priority
//! matching, for market-microstructure research.
//!
//! ## Architecture
//!
//! - **Types**: Order, Trade, Side and fixed-point price helpers
//! - **OrderBook**: slab-backed price levels plus an id index
//! - **Engine**: id/sequence allocation and the matching loop
//!
//! ## Design Principles
//!
//! 1. **Determinism**: All operations produce identical results for identical inputs
//! 2. **No Floating-Point Keys**: Prices are integer ticks (10^8 scaling)
//! 3. **Pre-allocated Memory**: Slab allocation for O(1) order storage
//! 4. **Synchronous Execution**: One submit/cancel at a time, run to completion
//!
//! ## Example
//!
//! ```
//! use lob_sim::{MatchingEngine, Side};
//! use lob_sim::types::price::f64_to_fixed;
//!
//! let mut engine = MatchingEngine::new();
//! let first = engine.submit(Side::Buy, 99.0, 100).unwrap();
//! assert_eq!(first.order_id, 1);
//! assert_eq!(engine.best_bid(), f64_to_fixed(99.0));
//!
//! assert!(engine.cancel(first.order_id).is_ok());
//! assert!(engine.cancel(first.order_id).is_err());
//! assert!(engine.is_empty());
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, Trade, Side, fixed-point prices
pub mod types;

/// Order book: price levels, index and slab storage
pub mod orderbook;

/// Matching engine: sequencing and price-time matching
pub mod engine;

/// Engine configuration
pub mod config;

/// Error types
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::EngineConfig;
pub use engine::{MatchingEngine, SequenceAllocator, SubmitResult};
pub use error::{EngineError, EngineResult};
pub use orderbook::{LevelSummary, OrderBook};
pub use types::{Order, Side, Trade};
