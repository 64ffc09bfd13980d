//! Core data types for the order book simulator.
//!
//! ## Types
//!
//! - [`Order`]: A limit order
//! - [`Side`]: Buy or Sell
//! - [`Trade`]: One fill between a buy and a sell order
//!
//! ## Fixed-Point Arithmetic
//!
//! Prices are stored as `u64` scaled by 10^8.
//! Example: 98.5 is stored as 9_850_000_000u64

mod order;
mod trade;
pub mod price;

pub use order::{Order, Side};
pub use trade::Trade;
