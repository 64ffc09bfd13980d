//! Matching engine module.
//!
//! ## Design Principles
//!
//! 1. **Determinism**: Same input always produces same output
//! 2. **Fixed-Point Math**: Prices are integer ticks, never float keys
//! 3. **Synchronous Execution**: Each call completes before the next starts
//! 4. **Price-Time Priority**: Best price first, then FIFO
//!
//! ## Matching Rules
//!
//! - **Buy orders** match against asks (lowest price first)
//! - **Sell orders** match against bids (highest price first)
//! - **Partial fills** are supported on both sides
//! - **Unfilled quantity** rests on the book
//! - **Execution price** is always the resting order's price

pub mod matcher;
pub mod sequence;

pub use matcher::{MatchingEngine, SubmitResult};
pub use sequence::SequenceAllocator;
