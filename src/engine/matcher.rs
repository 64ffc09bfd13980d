//! Price-time priority matching engine.
//!
//! ## Submission
//!
//! 1. Validate price and quantity (nothing is allocated or mutated on failure)
//! 2. Allocate an order id and an arrival sequence number
//! 3. While the incoming order has quantity left and crosses the opposite
//!    best price, fill against the oldest order at that price
//! 4. Rest whatever is left on the incoming order's own side
//!
//! Trades always execute at the resting order's price. The loop re-reads
//! the opposite best price after every fill, so levels consumed by a fill
//! are never revisited.

use tracing::{debug, trace, warn};

use crate::config::EngineConfig;
use crate::engine::SequenceAllocator;
use crate::error::{EngineError, EngineResult};
use crate::orderbook::{LevelSummary, OrderBook};
use crate::types::price::{f64_to_fixed, from_fixed_trimmed};
use crate::types::{Order, Side, Trade};

/// Result of one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitResult {
    /// Id assigned to the incoming order
    pub order_id: u64,

    /// Fills in execution order (may be empty)
    pub trades: Vec<Trade>,

    /// Quantity left on the incoming order; rests on the book if non-zero
    pub remaining: u64,
}

impl SubmitResult {
    /// Whether part of the order now rests on the book
    pub fn is_resting(&self) -> bool {
        self.remaining > 0
    }

    /// Total quantity executed by this submission
    pub fn filled_quantity(&self) -> u64 {
        self.trades.iter().map(|t| t.quantity).sum()
    }
}

/// Single-instrument matching engine.
///
/// Every call runs to completion before returning. Callers sharing an
/// engine across threads must serialize access (one owner, or one lock).
///
/// ## Example
///
/// ```
/// use lob_sim::engine::MatchingEngine;
/// use lob_sim::types::{price::f64_to_fixed, Side};
///
/// let mut engine = MatchingEngine::new();
/// engine.submit(Side::Sell, 101.0, 150).unwrap();
///
/// let result = engine.submit(Side::Buy, 102.0, 300).unwrap();
/// assert_eq!(result.trades.len(), 1);
/// assert_eq!(result.trades[0].price, f64_to_fixed(101.0).unwrap());
/// assert_eq!(engine.best_bid(), f64_to_fixed(102.0));
/// assert_eq!(engine.best_ask(), None);
/// ```
#[derive(Debug)]
pub struct MatchingEngine {
    book: OrderBook,
    ids: SequenceAllocator,
    config: EngineConfig,
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchingEngine {
    /// Create an engine with default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            book: OrderBook::with_capacity(config.order_capacity),
            ids: SequenceAllocator::new(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read-only access to the resting book
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Submit a limit order with a floating-point price.
    ///
    /// The price is rounded to the nearest 10^-8 tick. NaN, infinite,
    /// negative or zero prices and zero quantities are rejected with
    /// `InvalidOrder` before an id is allocated.
    pub fn submit(&mut self, side: Side, price: f64, quantity: u64) -> EngineResult<SubmitResult> {
        match f64_to_fixed(price) {
            Some(ticks) => self.submit_fixed(side, ticks, quantity),
            None => {
                warn!(?side, price, quantity, "Rejected order: unrepresentable price");
                Err(EngineError::invalid(format!(
                    "price {price} is not a finite non-negative number in range"
                )))
            }
        }
    }

    /// Submit a limit order with a fixed-point price (scaled by 10^8).
    pub fn submit_fixed(
        &mut self,
        side: Side,
        price: u64,
        quantity: u64,
    ) -> EngineResult<SubmitResult> {
        if price == 0 || quantity == 0 {
            warn!(?side, price, quantity, "Rejected order: non-positive price or quantity");
            return Err(EngineError::invalid(format!(
                "price and quantity must be positive (price={price}, quantity={quantity})"
            )));
        }

        let (order_id, sequence) = self.ids.allocate()?;
        let mut incoming = Order::new(order_id, side, price, quantity, sequence);

        debug!(
            order_id,
            ?side,
            price = %from_fixed_trimmed(price),
            quantity,
            "Order accepted"
        );

        let trades = self.match_incoming(&mut incoming);
        let remaining = incoming.remaining;

        if remaining > 0 {
            self.book.rest(incoming)?;
            debug!(order_id, remaining, "Order resting");
        }

        self.audit();

        Ok(SubmitResult {
            order_id,
            trades,
            remaining,
        })
    }

    /// Cancel a resting order.
    ///
    /// Returns the removed order (with its remaining quantity), or
    /// `OrderNotFound` if it is not resting. A second cancel of the same id
    /// always reports `OrderNotFound` and changes nothing.
    pub fn cancel(&mut self, order_id: u64) -> EngineResult<Order> {
        match self.book.remove(order_id) {
            Ok(order) => {
                debug!(order_id, remaining = order.remaining, "Order cancelled");
                self.audit();
                Ok(order)
            }
            Err(err) => {
                warn!(order_id, "Cancel rejected: order not resting");
                Err(err)
            }
        }
    }

    fn match_incoming(&mut self, incoming: &mut Order) -> Vec<Trade> {
        let side = incoming.side();
        let opposite = side.opposite();
        let mut trades = Vec::new();

        while incoming.remaining > 0 {
            let Some(best) = self.book.best_price(opposite) else {
                break;
            };
            if !side.crosses(incoming.price, best) {
                break;
            }

            let fill = self
                .book
                .fill_front(opposite, incoming.remaining)
                .expect("Best price set but level has no head");
            incoming.fill(fill.quantity);

            let trade = match side {
                Side::Buy => Trade::new(incoming.id, fill.resting_id, fill.price, fill.quantity),
                Side::Sell => Trade::new(fill.resting_id, incoming.id, fill.price, fill.quantity),
            };
            trace!(
                buy = trade.buy_order_id,
                sell = trade.sell_order_id,
                price = %from_fixed_trimmed(trade.price),
                quantity = trade.quantity,
                resting_filled = fill.resting_filled,
                "Fill"
            );
            trades.push(trade);
        }

        trades
    }

    fn audit(&self) {
        if self.config.verify_invariants {
            self.book.assert_invariants();
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Highest resting bid price (fixed-point)
    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.book.best_bid()
    }

    /// Lowest resting ask price (fixed-point)
    #[inline]
    pub fn best_ask(&self) -> Option<u64> {
        self.book.best_ask()
    }

    #[inline]
    pub fn spread(&self) -> Option<u64> {
        self.book.spread()
    }

    /// True iff neither side has a resting order
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.book.is_empty()
    }

    /// A resting order by id
    pub fn order(&self, order_id: u64) -> Option<&Order> {
        self.book.get(order_id)
    }

    /// Top `max_levels` levels of one side, best first
    pub fn depth(&self, side: Side, max_levels: usize) -> Vec<LevelSummary> {
        self.book.depth(side, max_levels)
    }

    /// The id the next accepted submission will receive
    #[inline]
    pub fn peek_next_order_id(&self) -> u64 {
        self.ids.peek_order_id()
    }

    #[inline]
    pub fn order_count(&self) -> usize {
        self.book.order_count()
    }

    #[inline]
    pub fn bid_count(&self) -> usize {
        self.book.bid_count()
    }

    #[inline]
    pub fn ask_count(&self) -> usize {
        self.book.ask_count()
    }

    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.book.bid_levels()
    }

    #[inline]
    pub fn ask_levels(&self) -> usize {
        self.book.ask_levels()
    }

    /// Deterministic hash of the resting book
    pub fn state_root(&self) -> [u8; 32] {
        self.book.compute_state_root()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
