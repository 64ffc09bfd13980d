//! Order book for a single instrument.
//!
//! ## Architecture
//!
//! - **Slab-based storage**: O(1) order insertion, removal, and lookup
//! - **Price levels**: orders grouped by price in a BTreeMap per side
//! - **Price-time priority**: FIFO ordering at each price level
//! - **Index**: order id → locator for O(1) cancel
//!
//! ## Components
//!
//! - [`OrderNode`]: resting order plus queue links
//! - [`PriceLevel`]: FIFO queue at one price
//! - [`PriceLevelBook`]: all levels of one side, best first
//! - [`OrderIndex`]: id → [`Locator`]
//! - [`OrderBook`]: both sides, the slab and the index kept in lockstep
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Rest order | O(log L) |
//! | Cancel by id | O(log L) |
//! | Fill at front | O(1), O(log L) when a level empties |
//! | Best bid/ask | O(1) |
//!
//! L = number of price levels on the side.

pub mod node;
pub mod level;
pub mod side_book;
pub mod index;
pub mod book;

pub use node::OrderNode;
pub use level::PriceLevel;
pub use side_book::PriceLevelBook;
pub use index::{Locator, OrderIndex};
pub use book::{FrontFill, LevelSummary, OrderBook};
