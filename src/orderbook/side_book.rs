//! One side of the book: price levels ordered by priority.
//!
//! ## Price Ordering
//!
//! - **Bids**: best = highest price
//! - **Asks**: best = lowest price
//!
//! Levels are stored in a `BTreeMap` keyed by fixed-point price. The best
//! price is cached and refreshed only when a level is created or dropped.
//! A level is dropped the moment its queue empties; an empty level is
//! never observable from outside this module.

use std::collections::BTreeMap;

use slab::Slab;

use crate::orderbook::{OrderNode, PriceLevel};
use crate::types::Side;

/// Ordered price → FIFO queue structure for one side.
#[derive(Debug, Clone)]
pub struct PriceLevelBook {
    side: Side,
    levels: BTreeMap<u64, PriceLevel>,
    best: Option<u64>,
    order_count: usize,
}

impl PriceLevelBook {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
            best: None,
            order_count: 0,
        }
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Highest-priority price, or None if the side is empty
    #[inline]
    pub fn best_price(&self) -> Option<u64> {
        self.best
    }

    /// Number of resting orders on this side
    #[inline]
    pub fn order_count(&self) -> usize {
        self.order_count
    }

    /// Number of distinct price levels
    #[inline]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Whether `a` has strictly higher priority than `b` on this side
    #[inline]
    pub fn is_better(&self, a: u64, b: u64) -> bool {
        match self.side {
            Side::Buy => a > b,
            Side::Sell => a < b,
        }
    }

    /// Append a slab node to the back of the queue at its price,
    /// creating the level if absent.
    pub fn insert(&mut self, key: usize, slab: &mut Slab<OrderNode>) {
        let price = slab.get(key).expect("Invalid slab key").price();

        self.levels
            .entry(price)
            .or_insert_with(|| PriceLevel::new(price))
            .push_back(key, slab);
        self.order_count += 1;

        if self.best.map_or(true, |best| self.is_better(price, best)) {
            self.best = Some(price);
        }
    }

    /// Slab key of the oldest order at the best price
    #[inline]
    pub fn front_of_best(&self) -> Option<usize> {
        self.best_level().and_then(PriceLevel::peek_head)
    }

    pub fn best_level(&self) -> Option<&PriceLevel> {
        self.best.and_then(|price| self.levels.get(&price))
    }

    pub fn level(&self, price: u64) -> Option<&PriceLevel> {
        self.levels.get(&price)
    }

    /// Unlink the node at `key` from the level at `price`, dropping the
    /// level if it empties. Returns the order's remaining quantity.
    ///
    /// # Panics
    ///
    /// Panics if no level exists at `price`: the caller's locator is stale.
    pub fn remove(&mut self, key: usize, price: u64, slab: &mut Slab<OrderNode>) -> u64 {
        let level = self
            .levels
            .get_mut(&price)
            .expect("Locator points at a missing price level");
        let quantity = level.remove(key, slab);
        self.order_count -= 1;

        if level.is_empty() {
            self.levels.remove(&price);
            if self.best == Some(price) {
                self.refresh_best();
            }
        }

        quantity
    }

    /// Record a partial fill against an order resting at `price`
    pub fn reduce_quantity(&mut self, price: u64, filled: u64) {
        self.levels
            .get_mut(&price)
            .expect("Partial fill at a missing price level")
            .reduce_quantity(filled);
    }

    /// Levels from best to worst
    pub fn levels(&self) -> Box<dyn Iterator<Item = &PriceLevel> + '_> {
        match self.side {
            Side::Buy => Box::new(self.levels.values().rev()),
            Side::Sell => Box::new(self.levels.values()),
        }
    }

    pub fn clear(&mut self) {
        self.levels.clear();
        self.best = None;
        self.order_count = 0;
    }

    fn refresh_best(&mut self) {
        self.best = match self.side {
            Side::Buy => self.levels.keys().next_back().copied(),
            Side::Sell => self.levels.keys().next().copied(),
        };
    }
}
