//! Resting order book for a single instrument.
//!
//! ## Architecture
//!
//! - **Slab**: authoritative storage for every resting order
//! - **PriceLevelBook** (x2): bid and ask levels in priority order
//! - **OrderIndex**: order id → (side, price, slab key)
//!
//! Every resting order has exactly one slab node, sits in exactly one level
//! queue and has exactly one index entry. All three are created together in
//! [`OrderBook::rest`] and destroyed together in [`OrderBook::remove`] or
//! [`OrderBook::fill_front`]; no public method touches only one of them.
//!
//! ## Example
//!
//! ```
//! use lob_sim::orderbook::OrderBook;
//! use lob_sim::types::{Order, Side};
//!
//! let mut book = OrderBook::with_capacity(16);
//! book.rest(Order::new(1, Side::Buy, 9_900_000_000, 100, 1)).unwrap();
//! book.rest(Order::new(2, Side::Sell, 10_100_000_000, 150, 2)).unwrap();
//!
//! assert_eq!(book.best_bid(), Some(9_900_000_000));
//! assert_eq!(book.best_ask(), Some(10_100_000_000));
//! assert_eq!(book.spread(), Some(200_000_000));
//! ```

use sha2::{Digest, Sha256};
use slab::Slab;

use crate::error::{EngineError, EngineResult};
use crate::orderbook::{Locator, OrderIndex, OrderNode, PriceLevelBook};
use crate::types::{Order, Side};

/// Aggregated view of one price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSummary {
    /// Level price (fixed-point)
    pub price: u64,
    /// Sum of remaining quantity at this price
    pub total_quantity: u128,
    /// Number of resting orders at this price
    pub order_count: usize,
}

/// Outcome of filling against the front of the best level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontFill {
    /// Id of the resting order that traded
    pub resting_id: u64,
    /// Resting order's price (the execution price)
    pub price: u64,
    /// Quantity executed
    pub quantity: u64,
    /// The resting order was fully filled and removed from the book
    pub resting_filled: bool,
}

/// Single-instrument limit order book.
#[derive(Debug)]
pub struct OrderBook {
    /// Resting order storage
    orders: Slab<OrderNode>,

    /// Bid levels (best = highest)
    bids: PriceLevelBook,

    /// Ask levels (best = lowest)
    asks: PriceLevelBook,

    /// Order id → locator
    index: OrderIndex,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a book with pre-allocated order storage
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            orders: Slab::with_capacity(order_capacity),
            bids: PriceLevelBook::new(Side::Buy),
            asks: PriceLevelBook::new(Side::Sell),
            index: OrderIndex::with_capacity(order_capacity),
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }

    #[inline]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    #[inline]
    pub fn bid_count(&self) -> usize {
        self.bids.order_count()
    }

    #[inline]
    pub fn ask_count(&self) -> usize {
        self.asks.order_count()
    }

    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.bids.level_count()
    }

    #[inline]
    pub fn ask_levels(&self) -> usize {
        self.asks.level_count()
    }

    /// True iff neither side has a resting order
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    pub fn side(&self, side: Side) -> &PriceLevelBook {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    // ========================================================================
    // Order Management
    // ========================================================================

    /// Place an order on its own side of the book.
    ///
    /// The order is appended behind everything already resting at its
    /// price. Fails with `DuplicateOrderId` (and changes nothing) if the id
    /// is already resting, or `InvalidOrder` if nothing is left to rest.
    ///
    /// Returns the slab key of the new node.
    pub fn rest(&mut self, order: Order) -> EngineResult<usize> {
        if order.remaining == 0 {
            return Err(EngineError::invalid(format!(
                "order {} has no remaining quantity to rest",
                order.id
            )));
        }

        let id = order.id;
        let side = order.side();
        let price = order.price;

        let entry = self.orders.vacant_entry();
        let key = entry.key();
        self.index.insert(id, Locator { side, price, key })?;
        entry.insert(OrderNode::new(order));

        match side {
            Side::Buy => self.bids.insert(key, &mut self.orders),
            Side::Sell => self.asks.insert(key, &mut self.orders),
        }

        Ok(key)
    }

    /// Remove a resting order from wherever it sits in its level.
    ///
    /// Returns the removed order, or `OrderNotFound` if the id is not
    /// resting (never existed, already filled or already cancelled).
    ///
    /// # Panics
    ///
    /// Panics if the index entry does not match the slab node it points
    /// at. That state is a defect, not something to recover from.
    pub fn remove(&mut self, order_id: u64) -> EngineResult<Order> {
        let Locator { side, price, key } = self.index.lookup(order_id)?;

        let node = self
            .orders
            .get(key)
            .expect("Index entry points at an empty slab slot");
        assert_eq!(
            node.order_id(),
            order_id,
            "Index entry points at a slot owned by another order"
        );

        match side {
            Side::Buy => self.bids.remove(key, price, &mut self.orders),
            Side::Sell => self.asks.remove(key, price, &mut self.orders),
        };
        self.index.remove(order_id)?;

        Ok(self.orders.remove(key).order)
    }

    /// Fill up to `max_quantity` against the oldest order at the best price
    /// on `side`.
    ///
    /// A resting order whose remaining hits zero is unlinked, de-indexed
    /// and dropped from the slab before this returns; its level goes with
    /// it if that was the last order there. Returns None if `side` is empty.
    pub fn fill_front(&mut self, side: Side, max_quantity: u64) -> Option<FrontFill> {
        let key = self.side(side).front_of_best()?;

        let node = self
            .orders
            .get_mut(key)
            .expect("Level head points at an empty slab slot");
        let quantity = node.fill(max_quantity);
        let resting_id = node.order_id();
        let price = node.price();
        let resting_filled = node.is_filled();

        let orders = &mut self.orders;
        let book = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        book.reduce_quantity(price, quantity);

        if resting_filled {
            book.remove(key, price, orders);
            self.index
                .remove(resting_id)
                .expect("Filled order missing from index");
            orders.remove(key);
        }

        Some(FrontFill {
            resting_id,
            price,
            quantity,
            resting_filled,
        })
    }

    /// Look up a resting order by id
    pub fn get(&self, order_id: u64) -> Option<&Order> {
        let locator = self.index.lookup(order_id).ok()?;
        self.orders.get(locator.key).map(|node| &node.order)
    }

    #[inline]
    pub fn contains_order(&self, order_id: u64) -> bool {
        self.index.contains(order_id)
    }

    /// The oldest order at the best price on `side`
    pub fn front(&self, side: Side) -> Option<&Order> {
        let key = self.side(side).front_of_best()?;
        self.orders.get(key).map(|node| &node.order)
    }

    // ========================================================================
    // Best Bid/Ask
    // ========================================================================

    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.bids.best_price()
    }

    #[inline]
    pub fn best_ask(&self) -> Option<u64> {
        self.asks.best_price()
    }

    #[inline]
    pub fn best_price(&self, side: Side) -> Option<u64> {
        self.side(side).best_price()
    }

    /// best_ask - best_bid, or None if either side is empty
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) if ask >= bid => Some(ask - bid),
            _ => None,
        }
    }

    /// Top `max_levels` levels of `side`, best first
    pub fn depth(&self, side: Side, max_levels: usize) -> Vec<LevelSummary> {
        self.side(side)
            .levels()
            .take(max_levels)
            .map(|level| LevelSummary {
                price: level.price,
                total_quantity: level.total_quantity,
                order_count: level.order_count,
            })
            .collect()
    }

    /// Resting orders of `side` in matching priority order
    pub fn orders_in_priority(&self, side: Side) -> Vec<&Order> {
        self.side(side)
            .levels()
            .flat_map(|level| level.iter(&self.orders).map(|(_, node)| &node.order))
            .collect()
    }

    // ========================================================================
    // Verification
    // ========================================================================

    /// SHA-256 over the SSZ encoding of every resting order, bids then
    /// asks, each walked in price-time priority.
    ///
    /// Identical submission sequences always produce identical roots.
    pub fn compute_state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();

        for side in [Side::Buy, Side::Sell] {
            hasher.update([side.to_u8()]);
            for order in self.orders_in_priority(side) {
                let bytes = ssz_rs::serialize(order).expect("Fixed-size order always serializes");
                hasher.update(&bytes);
            }
        }

        hasher.finalize().into()
    }

    /// Audit every structural invariant of the book.
    ///
    /// # Panics
    ///
    /// Panics with a description of the first violation found.
    pub fn assert_invariants(&self) {
        let mut seen = 0usize;

        for side in [Side::Buy, Side::Sell] {
            let book = self.side(side);
            let mut prev_price: Option<u64> = None;
            let mut side_orders = 0usize;

            for level in book.levels() {
                assert!(!level.is_empty(), "Empty level left at {}", level.price);
                if let Some(prev) = prev_price {
                    assert!(
                        book.is_better(prev, level.price),
                        "{:?} levels out of order: {} before {}",
                        side,
                        prev,
                        level.price
                    );
                } else {
                    assert_eq!(book.best_price(), Some(level.price), "Stale best price");
                }
                prev_price = Some(level.price);

                let mut count = 0usize;
                let mut total = 0u128;
                let mut last_seq: Option<u64> = None;
                let mut last_key: Option<usize> = None;

                for (key, node) in level.iter(&self.orders) {
                    let order = &node.order;
                    assert_eq!(node.prev, last_key, "Broken back link at order {}", order.id);
                    assert_eq!(order.side(), side, "Order {} on the wrong side", order.id);
                    assert_eq!(order.price, level.price, "Order {} at the wrong level", order.id);
                    assert!(
                        order.remaining > 0 && order.remaining <= order.quantity,
                        "Order {} has remaining {} of {}",
                        order.id,
                        order.remaining,
                        order.quantity
                    );
                    if let Some(seq) = last_seq {
                        assert!(seq < order.sequence, "FIFO violated at order {}", order.id);
                    }
                    assert_eq!(
                        self.index.lookup(order.id),
                        Ok(Locator {
                            side,
                            price: level.price,
                            key
                        }),
                        "Index disagrees with queue for order {}",
                        order.id
                    );

                    last_seq = Some(order.sequence);
                    last_key = Some(key);
                    count += 1;
                    total += u128::from(order.remaining);
                }

                assert_eq!(level.tail, last_key, "Level {} tail mismatch", level.price);
                assert_eq!(level.order_count, count, "Level {} count mismatch", level.price);
                assert_eq!(level.total_quantity, total, "Level {} quantity mismatch", level.price);
                side_orders += count;
            }

            if prev_price.is_none() {
                assert!(book.best_price().is_none(), "Best price on an empty side");
            }
            assert_eq!(book.order_count(), side_orders, "{:?} order count mismatch", side);
            seen += side_orders;
        }

        assert_eq!(seen, self.orders.len(), "Slab holds orders outside any level");
        assert_eq!(seen, self.index.len(), "Index holds entries outside any level");
        for (id, locator) in self.index.iter() {
            let node = self
                .orders
                .get(locator.key)
                .unwrap_or_else(|| panic!("Index entry for order {} points at an empty slot", id));
            assert_eq!(node.order_id(), id, "Index entry for order {} points at another order", id);
        }

        if let (Some(bid), Some(ask)) = (self.best_bid(), self.best_ask()) {
            assert!(bid < ask, "Crossed book: bid {} >= ask {}", bid, ask);
        }
    }

    /// Drop every resting order
    pub fn clear(&mut self) {
        self.orders.clear();
        self.bids.clear();
        self.asks.clear();
        self.index.clear();
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
