//! Price level: the FIFO queue of resting orders at one exact price.
//!
//! ## Queue Structure
//!
//! ```text
//! head (oldest) <-> order2 <-> order3 <-> tail (newest)
//! ```
//!
//! - New orders are appended at the tail
//! - Matching consumes orders from the head
//! - Cancellation unlinks an order from any position in O(1)
//!
//! The order data lives in the slab; a level only holds queue metadata.
//! Unlinking never reorders the remaining nodes, so sequence numbers stay
//! strictly ascending from head to tail.

use slab::Slab;

use crate::orderbook::OrderNode;

/// A price level containing orders at a single price.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Price for this level (fixed-point, scaled by 10^8)
    pub price: u64,

    /// Total remaining quantity at this level (wide enough to never overflow)
    pub total_quantity: u128,

    /// Head of the queue (oldest order, first to match)
    pub head: Option<usize>,

    /// Tail of the queue (newest order)
    pub tail: Option<usize>,

    /// Number of orders at this price level
    pub order_count: usize,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new(price: u64) -> Self {
        Self {
            price,
            total_quantity: 0,
            head: None,
            tail: None,
            order_count: 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// Append an order to the tail of the queue
    ///
    /// # Panics
    ///
    /// Panics if `key` (or the current tail) is not in the slab.
    pub fn push_back(&mut self, key: usize, slab: &mut Slab<OrderNode>) {
        let node = slab.get_mut(key).expect("Invalid slab key");
        debug_assert_eq!(node.price(), self.price, "order queued at the wrong level");
        let quantity = node.remaining();

        node.prev = self.tail;
        node.next = None;

        if let Some(tail_key) = self.tail {
            let tail_node = slab.get_mut(tail_key).expect("Invalid tail key");
            tail_node.next = Some(key);
        } else {
            self.head = Some(key);
        }

        self.tail = Some(key);
        self.order_count += 1;
        self.total_quantity += u128::from(quantity);
    }

    /// Unlink an order from anywhere in the queue
    ///
    /// The node stays in the slab; the caller is responsible for removing
    /// it. Returns the remaining quantity of the unlinked order.
    ///
    /// # Panics
    ///
    /// Panics if `key` or one of its neighbours is not in the slab.
    pub fn remove(&mut self, key: usize, slab: &mut Slab<OrderNode>) -> u64 {
        let node = slab.get(key).expect("Invalid slab key");
        let quantity = node.remaining();
        let prev_key = node.prev;
        let next_key = node.next;

        if let Some(prev) = prev_key {
            slab.get_mut(prev).expect("Invalid prev key").next = next_key;
        } else {
            debug_assert_eq!(self.head, Some(key), "unlinked node is not the head");
            self.head = next_key;
        }

        if let Some(next) = next_key {
            slab.get_mut(next).expect("Invalid next key").prev = prev_key;
        } else {
            debug_assert_eq!(self.tail, Some(key), "unlinked node is not the tail");
            self.tail = prev_key;
        }

        let node = slab.get_mut(key).expect("Invalid slab key");
        node.prev = None;
        node.next = None;

        self.order_count -= 1;
        self.total_quantity -= u128::from(quantity);

        quantity
    }

    /// The head order's slab key (oldest order)
    #[inline]
    pub fn peek_head(&self) -> Option<usize> {
        self.head
    }

    /// Account for a partial fill of one of this level's orders
    pub fn reduce_quantity(&mut self, filled_quantity: u64) {
        self.total_quantity -= u128::from(filled_quantity);
    }

    /// Walk the queue from head (oldest) to tail (newest)
    pub fn iter<'a>(&self, slab: &'a Slab<OrderNode>) -> LevelIter<'a> {
        LevelIter {
            slab,
            cursor: self.head,
        }
    }
}

/// Iterator over `(slab key, node)` pairs of one level in FIFO order.
pub struct LevelIter<'a> {
    slab: &'a Slab<OrderNode>,
    cursor: Option<usize>,
}

impl<'a> Iterator for LevelIter<'a> {
    type Item = (usize, &'a OrderNode);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.cursor?;
        let node = self.slab.get(key).expect("Level links to a missing slab key");
        self.cursor = node.next;
        Some((key, node))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
